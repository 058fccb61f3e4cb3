use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use nalgebra::Vector3;
use rayon::prelude::*;
use slicer_lib::{volumetric::Volume, Result};

use crate::{
    boundary::mark_boundary,
    config::{Config, GeneratorConfig},
    file::write_volume,
    orders::LinearCoordIterator,
};

mod shapes;
mod shell;
mod solid;

pub use shapes::ShapesGenerator;
pub use shell::ShellGenerator;
pub use solid::SolidGenerator;

// Generates one sample at a time, at any location
pub trait SampleGenerator: Send + Sync {
    fn sample_at(&self, coords: Vector3<usize>) -> u8;
}

/// Generator for volume `index` of the series
pub fn get_sample_generator(config: &Config, index: usize) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Solid { sample } => Box::new(SolidGenerator::new(config.dims, sample)),
        GeneratorConfig::Shapes {
            n_of_shapes,
            sample,
            obj_size,
        } => Box::new(ShapesGenerator::new(
            config.dims,
            n_of_shapes,
            sample,
            obj_size,
            config.volume_seed(index),
        )),
        GeneratorConfig::Shell { sample } => Box::new(ShellGenerator::new(
            config.dims,
            sample,
            index,
            config.count,
        )),
    }
}

pub fn generate_volume(config: &Config, index: usize) -> Result<Volume> {
    let gen = get_sample_generator(config, index);
    let mut data: Vec<u8> = LinearCoordIterator::from_dims(config.dims)
        .map(|coords| gen.sample_at(coords))
        .collect();

    if config.mark_boundary {
        mark_boundary(&mut data, config.dims);
    }

    Volume::from_data(config.dims, data)
}

/// Generate the whole series and write it into the output directory
pub fn generate_dataset(config: &Config) -> Result<()> {
    let voxels = Volume::voxel_count(config.dims)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let progress = ProgressBar::new(config.count as u64);
    progress.set_style(
        ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len} ({eta})"),
    );
    progress.set_message("Generating");

    (0..config.count).into_par_iter().try_for_each(|index| {
        let volume = generate_volume(config, index)?;
        write_volume(&config.output_dir, &config.file_name(index), &volume)?;
        progress.inc(1);
        Ok::<_, slicer_lib::SlicerError>(())
    })?;

    progress.finish_with_message("Done");
    info!("Wrote {} volumes of {voxels} bytes", config.count);
    Ok(())
}
