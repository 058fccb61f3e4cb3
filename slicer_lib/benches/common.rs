pub use criterion::{black_box, Criterion};

pub use nalgebra::{vector, Vector3};
pub use slicer_lib::{
    config::DatasetConfig,
    slices::{Axis, SliceLayout, SliceResampler, SliceStackMut},
    test_helpers::noise_volume,
    volumetric::{Volume, VolumeStore},
    TransferFunction,
};

/// Brain sample dimensions
pub const SAMPLE_SIZE: Vector3<usize> = vector![91, 109, 91];

pub fn sample_layout() -> SliceLayout {
    DatasetConfig::default().layout()
}

pub fn sample_volumes(count: usize) -> Vec<Volume> {
    (0..count as u64)
        .map(|seed| noise_volume(SAMPLE_SIZE, seed))
        .collect()
}
