use std::{path::PathBuf, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector3};
use slicer_lib::volumetric::{volume_file_name, Volume};

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| format!("missing {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("bad value {v:?} for {key}")))
        .collect::<Result<Vec<T>, String>>()?;
    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("{key} needs 3 values")),
    }
}

fn parse_value<T: FromStr>(args: &ArgMatches, key: &str) -> Result<T, String> {
    let value = args
        .value_of(key)
        .ok_or_else(|| format!("missing {key}"))?;
    value
        .parse()
        .map_err(|_| format!("bad value {value:?} for {key}"))
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug, Clone)]
pub struct Config {
    /// Dimensions of each volume
    pub dims: Vector3<usize>,
    /// Number of volumes in the series
    pub count: usize,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    pub base_name: String,
    pub extension: String,
    pub output_dir: PathBuf,
    /// Overwrite edges and faces with guide values
    pub mark_boundary: bool,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let dims = values_to_vector3(&args, "dims")?;
        Volume::voxel_count(dims).map_err(|e| e.to_string())?;
        let count = parse_value(&args, "count")?;
        let generator = GeneratorConfig::from_args(&args)?;

        if let GeneratorConfig::Shapes { obj_size, .. } = generator {
            if dims.iter().any(|&d| d < obj_size) {
                return Err(format!(
                    "object-size {obj_size} does not fit volume of {}x{}x{}",
                    dims.x, dims.y, dims.z
                ));
            }
        }

        let base_name = parse_value(&args, "base")?;
        let extension = parse_value(&args, "ext")?;
        let output_dir = args
            .value_of_os("output-dir")
            .ok_or("missing output-dir")?
            .into();
        let mark_boundary = args.is_present("mark-boundary");
        let seed = match args.value_of("seed") {
            Some(_) => Some(parse_value(&args, "seed")?),
            None => None,
        };

        Ok(Config {
            dims,
            count,
            generator,
            base_name,
            extension,
            output_dir,
            mark_boundary,
            seed,
        })
    }

    pub fn file_name(&self, index: usize) -> String {
        volume_file_name(&self.base_name, index, &self.extension)
    }

    /// Seed of one volume of the series
    pub fn volume_seed(&self, index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorConfig {
    /// Whole volume is one value, padded by empty space
    Solid { sample: u8 },
    /// Randomly placed cuboids and spheres
    Shapes {
        n_of_shapes: usize,
        sample: u8,
        obj_size: usize,
    },
    /// Hollow ball with a radial ramp inside, breathing over the series
    Shell { sample: u8 },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig, String> {
        let sample = parse_value(args, "sample")?;

        match args.value_of("generator") {
            Some("solid") => Ok(GeneratorConfig::Solid { sample }),
            Some("shapes") => Ok(GeneratorConfig::Shapes {
                n_of_shapes: parse_value(args, "n-of-shapes")?,
                sample,
                obj_size: parse_value(args, "object-size")?,
            }),
            Some("shell") => Ok(GeneratorConfig::Shell { sample }),
            other => Err(format!("unknown generator {other:?}")),
        }
    }
}
