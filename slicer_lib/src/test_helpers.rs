//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use std::{
    io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use nalgebra::Vector3;

use crate::{config::DatasetConfig, slices::Axis, volumetric::Volume};

fn build(size: Vector3<usize>, sample: impl Fn(usize, usize, usize) -> u8) -> Volume {
    let mut data = Vec::with_capacity(Volume::voxel_count(size).unwrap_or(0));
    for z in 0..size.z {
        for y in 0..size.y {
            for x in 0..size.x {
                data.push(sample(x, y, z));
            }
        }
    }
    Volume::from_data(size, data).expect("helper volume size")
}

/// Every sample has the value `sample`
pub fn solid_volume(size: Vector3<usize>, sample: u8) -> Volume {
    build(size, |_, _, _| sample)
}

/// Samples differ along every axis
pub fn gradient_volume(size: Vector3<usize>) -> Volume {
    build(size, |x, y, z| ((x * 7 + y * 31 + z * 61) % 256) as u8)
}

/// Empty volume with one plane of value `sample`, perpendicular to `axis` at `index`
pub fn plane_volume(size: Vector3<usize>, axis: Axis, index: usize, sample: u8) -> Volume {
    build(size, |x, y, z| {
        let coord = match axis {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        };
        if coord == index {
            sample
        } else {
            0
        }
    })
}

/// Deterministic pseudo random samples
pub fn noise_volume(size: Vector3<usize>, seed: u64) -> Volume {
    build(size, |x, y, z| {
        // splitmix64 of the linear position
        let mut v = seed
            .wrapping_add((x + size.x * (y + size.y * z)) as u64)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15);
        v = (v ^ (v >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        v = (v ^ (v >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (v ^ (v >> 31)) as u8
    })
}

/// Small data set configuration, `count` volumes of 7x5x6 samples
pub fn small_config(dir: &Path, count: usize) -> DatasetConfig {
    DatasetConfig {
        data_path: Some(dir.to_path_buf()),
        base_name: "test".into(),
        extension: "img".into(),
        dims: [7, 5, 6],
        volume_count: count,
        slice_count: 4,
        slice_width: 8,
        slice_height: 6,
        ..Default::default()
    }
}

/// Distinct volumes matching `config`
pub fn dataset_volumes(config: &DatasetConfig) -> Vec<Volume> {
    (0..config.volume_count)
        .map(|i| noise_volume(config.size(), i as u64))
        .collect()
}

/// Write `volumes` as the files of the data set described by `config`
pub fn write_dataset(dir: &Path, config: &DatasetConfig, volumes: &[Volume]) -> io::Result<()> {
    for (index, volume) in volumes.iter().enumerate() {
        std::fs::write(dir.join(config.file_name(index)), volume.as_slice())?;
    }
    Ok(())
}

/// Uniquely named directory under the system temp dir, removed on drop
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> io::Result<ScratchDir> {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("slicer_lib-{}-{id}", std::process::id()));
        if path.exists() {
            std::fs::remove_dir_all(&path)?;
        }
        std::fs::create_dir_all(&path)?;
        Ok(ScratchDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Center of the volume seen from `distance` along `axis`
pub fn eye_on_axis(axis: Axis, distance: f32) -> Vector3<f32> {
    axis.basis() * distance
}

#[cfg(test)]
mod test {
    use nalgebra::vector;

    use super::*;

    #[test]
    fn plane_only_on_index() {
        let volume = plane_volume(vector![3, 3, 3], Axis::Z, 1, 9);
        assert_eq!(volume.get_data(2, 2, 1), Some(9));
        assert_eq!(volume.get_data(2, 2, 0), Some(0));
    }

    #[test]
    fn noise_is_seeded() {
        let size = vector![4, 4, 4];
        assert_eq!(noise_volume(size, 1), noise_volume(size, 1));
        assert_ne!(noise_volume(size, 1), noise_volume(size, 2));
    }

    #[test]
    fn scratch_dir_removed() {
        let dir = ScratchDir::new().unwrap();
        let path = dir.path().to_path_buf();
        assert!(path.is_dir());
        drop(dir);
        assert!(!path.exists());
    }
}
