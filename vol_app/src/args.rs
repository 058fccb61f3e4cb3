//! Argument parsing
//! Uses library `clap`

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, ValueHint};

pub fn is_frame_count(num: &str) -> Result<(), String> {
    match num.parse::<usize>() {
        Ok(n) if n > 0 => Ok(()),
        Ok(_) => Err("Number must be greater than 0".into()),
        Err(_) => Err("Number required".into()),
    }
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-app")
        .version("0.1.0")
        .about("Headless slice viewer, plays a scripted session over a volume series")
        .arg(
            Arg::new("config")
                .help("Data set configuration (TOML)")
                .long("config")
                .short('c')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("data-path")
                .help("Directory with the volume files, overrides config and SLICER_DATA_PATH")
                .long("data-path")
                .short('d')
                .value_name("DIR")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("frames")
                .help("Number of frames to play")
                .long("frames")
                .short('f')
                .value_name("N")
                .default_value("120")
                .validator(is_frame_count),
        )
        .arg(
            Arg::new("export")
                .help("Write frames and slice stacks as PNG into this directory")
                .long("export")
                .short('e')
                .value_name("DIR")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::DirPath),
        )
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppArgs {
    pub config: Option<PathBuf>,
    pub data_path: Option<PathBuf>,
    pub frames: usize,
    pub export: Option<PathBuf>,
}

impl AppArgs {
    pub fn from_matches(args: &ArgMatches) -> Result<AppArgs, String> {
        let frames = args
            .value_of("frames")
            .ok_or("missing frames")?
            .parse()
            .map_err(|_| "frames must be a number".to_string())?;

        Ok(AppArgs {
            config: args.value_of_os("config").map(PathBuf::from),
            data_path: args.value_of_os("data-path").map(PathBuf::from),
            frames,
            export: args.value_of_os("export").map(PathBuf::from),
        })
    }
}
