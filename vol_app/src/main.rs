//! Headless slice viewer
//!
//! Loads a volume series, then plays a scripted session: the head orbits the
//! volume, the wand advances through the series, and each frame composites
//! the slice stack facing the eye.
//!
//! Example:
//! `cargo run --release --bin vol_app -- --data-path volumes --frames 90 --export out`

use std::{sync::Arc, time::Instant};

use log::{debug, info};
use parking_lot::RwLock;
use slicer_lib::{config::DatasetConfig, session::Session, volumetric::VolumeStore, SlicerError};

mod args;
mod compositor;
mod error;
mod export;
mod render_thread;
mod script;

use crate::{
    args::{get_command, AppArgs},
    error::{AppError, Result},
    export::{export_frame, export_stacks},
    render_thread::{RendererFront, SliceRenderer, View},
    script::{ScriptedInput, START_TRAVEL},
};

/// Defaults, then config file, then `SLICER_DATA_PATH`, then the command line
fn dataset_config(args: &AppArgs) -> Result<DatasetConfig> {
    let config = match &args.config {
        Some(path) => DatasetConfig::from_file(path)?,
        None => DatasetConfig::default(),
    };
    let mut config = config.with_env_data_path();
    if let Some(dir) = &args.data_path {
        config.data_path = Some(dir.clone());
    }
    Ok(config)
}

fn run(args: AppArgs) -> Result<()> {
    let dataset = dataset_config(&args)?;
    let store = Arc::new(VolumeStore::from_config(&dataset)?);

    if let Some(dir) = &args.export {
        std::fs::create_dir_all(dir).map_err(SlicerError::from)?;
        for volume in 0..store.volume_count() {
            export_stacks(dir, &store, volume)?;
        }
    }

    let mut session = Session::master(store.volume_count())?;
    let renderer = SliceRenderer::new(store.clone(), Arc::new(RwLock::new(View::default())));
    let mut front = RendererFront::start(renderer);
    let script = ScriptedInput;

    // accumulated joystick travel
    let mut travel = START_TRAVEL;

    for frame in 0..args.frames {
        let started = Instant::now();
        let input = script.frame(frame);

        if let Some(update) = session.pre_exchange(&input) {
            if update.volume_changed {
                info!("Showing volume {}", update.volume);
            }
            if let Some(step) = update.navigation {
                travel += step;
            }
        }

        let head = input.head_position() + travel;
        front.set_view(View {
            eye: session.eye_position(&head),
            volume: session.current_volume(),
        });
        let info = front.render().ok_or(AppError::RendererGone)?;

        if let Some(dir) = &args.export {
            let buffer = front.get_buffer_handle().lock();
            export_frame(dir, frame, store.layout(), &buffer)?;
        }

        let fps = session.frame_done(started.elapsed());
        debug!(
            "Frame {frame}: volume {} with {} slices, {fps:.1} fps",
            info.view.volume, info.slices_drawn
        );
    }

    front.finish();
    info!("Played {} frames at {:.1} fps", args.frames, session.frame_rate());
    Ok(())
}

pub fn main() {
    env_logger::init();

    let matches = get_command().get_matches();
    let args = match AppArgs::from_matches(&matches) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
