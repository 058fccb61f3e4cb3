use config::Config;
use log::info;

mod args;
mod boundary;
mod config;
mod file;
mod generators;
mod orders;

use crate::{args::get_command, generators::generate_dataset};

pub fn main() {
    env_logger::init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    info!("Generating {} volumes", cfg.count);
    info!("{:?}", cfg);

    if let Err(e) = generate_dataset(&cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!(
        "Generating finished, result in {}",
        cfg.output_dir.display()
    );
}
