//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n > 0 {
                Ok(())
            } else {
                Err("Number must be greater than 0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn can_fit_u8(num: &str) -> Result<(), String> {
    match num.parse::<u8>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Number does not fit in range <0;255>".into()),
    }
}

pub fn is_seed(num: &str) -> Result<(), String> {
    match num.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Seed must be an unsigned 64bit number".into()),
    }
}

pub const GENERATOR_NAMES: &[&str] = &["solid", "shapes", "shell"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Vol-gen")
        .version("0.1.0")
        .about("Generates headless volume series for the slice viewer")
        .arg(
            Arg::new("dims")
                .help("Dimensions of each volume")
                .long("dims")
                .short('d')
                .number_of_values(3)
                .value_names(&["X", "Y", "Z"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .default_values(&["91", "109", "91"])
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("count")
                .help("Number of volumes in the series")
                .long("count")
                .short('n')
                .value_name("N")
                .default_value("10")
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("generator")
                .help("Type of generator")
                .long("generator")
                .short('g')
                .required(true)
                .requires_ifs(&[("shapes", "n-of-shapes"), ("shapes", "object-size")])
                .takes_value(true)
                .value_name("NAME")
                .possible_values(GENERATOR_NAMES),
        )
        .arg(
            Arg::new("sample")
                .help("Value of generated objects")
                .long("sample")
                .value_name("BYTE")
                .default_value("200")
                .validator(can_fit_u8),
        )
        .arg(
            Arg::new("object-size")
                .help("Side of individual generated objects")
                .long("object-size")
                .value_name("SIDE")
                .hide(true) // Hide from help
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("n-of-shapes")
                .help("Number of shapes generated in each volume")
                .long("n-of-shapes")
                .value_name("N")
                .hide(true) // Hide from help
                .validator(is_positive_number),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for RNG, leave out for random seed")
                .long("seed")
                .value_name("SEED")
                .validator(is_seed),
        )
        .arg(
            Arg::new("base")
                .help("File name stem, files are named <BASE>.<i>.<EXT>")
                .long("base")
                .value_name("BASE")
                .default_value("cavebrain"),
        )
        .arg(
            Arg::new("ext")
                .help("File extension")
                .long("ext")
                .value_name("EXT")
                .default_value("img"),
        )
        .arg(
            Arg::new("output-dir")
                .help("Directory to write the series into")
                .long("output-dir")
                .short('o')
                .value_name("DIR")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::DirPath)
                .default_value_os(OsStr::new(".")),
        )
        .arg(
            Arg::new("mark-boundary")
                .help("Mark volume edges and faces as a visual guide")
                .long("mark-boundary"),
        )
}
