//! Loaded volumes together with their slice stacks.

use std::path::Path;

use log::{debug, info};
use nalgebra::Vector3;

use crate::{
    config::DatasetConfig,
    error::{Result, SlicerError},
    slices::{Axis, FramePlan, SliceArena, SliceImage, SliceLayout, SliceResampler, SliceStack},
    transfer_functions::TransferFunction,
};

use super::{read_volume, Volume};

/// All volumes of a data set, classified and resampled.
///
/// A store only exists fully populated: loading reads every file first and
/// resamples afterwards, any failure drops everything read so far.
/// After construction the store is immutable and can be shared between threads.
pub struct VolumeStore {
    volumes: Vec<Volume>,
    slices: SliceArena,
    tf: TransferFunction,
}

impl std::fmt::Debug for VolumeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeStore")
            .field("volumes", &self.volumes.len())
            .field("slices", &self.slices)
            .field("tf", &self.tf)
            .finish()
    }
}

impl VolumeStore {
    /// Load the data set from its configured directory.
    pub fn from_config(config: &DatasetConfig) -> Result<VolumeStore> {
        let dir = config.data_dir()?;
        VolumeStore::load(dir, config)
    }

    /// Load `config.volume_count` files from `dir`.
    pub fn load<P>(dir: P, config: &DatasetConfig) -> Result<VolumeStore>
    where
        P: AsRef<Path>,
    {
        config.validate()?;
        let dir = dir.as_ref();
        let size = config.size();

        info!(
            "Loading {} volumes of {}x{}x{} from {dir:?}",
            config.volume_count, size.x, size.y, size.z
        );

        let volumes = (0..config.volume_count)
            .map(|index| read_volume(dir, &config.file_name(index), size))
            .collect::<Result<Vec<_>>>()?;

        VolumeStore::from_volumes(volumes, config.layout(), config.transfer_function)
    }

    /// Build a store from volumes already in memory.
    pub fn from_volumes(
        volumes: Vec<Volume>,
        layout: SliceLayout,
        tf: TransferFunction,
    ) -> Result<VolumeStore> {
        if volumes.is_empty() {
            return Err(SlicerError::InvalidConfig(
                "data set must hold at least one volume".into(),
            ));
        }
        layout.validate()?;

        let mut slices = SliceArena::allocate(layout, volumes.len())?;
        info!(
            "Resampling {} volumes into {} slices of {}x{} per axis, {} bytes of textures",
            volumes.len(),
            layout.slice_count,
            layout.width,
            layout.height,
            slices.total_bytes()
        );

        let resampler = SliceResampler::new(tf);
        for (index, volume) in volumes.iter().enumerate() {
            for axis in Axis::ALL {
                // arena sized for every volume above
                if let Some(mut stack) = slices.stack_mut(index, axis) {
                    resampler.resample(volume, axis, &mut stack);
                }
            }
            debug!("Volume {index} resampled");
        }

        Ok(VolumeStore {
            volumes,
            slices,
            tf,
        })
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn volume(&self, index: usize) -> Option<&Volume> {
        self.volumes.get(index)
    }

    pub fn volume_size(&self, index: usize) -> Option<Vector3<usize>> {
        self.volume(index).map(Volume::get_size)
    }

    pub fn layout(&self) -> SliceLayout {
        self.slices.layout()
    }

    pub fn transfer_function(&self) -> TransferFunction {
        self.tf
    }

    pub fn slices(&self) -> &SliceArena {
        &self.slices
    }

    pub fn stack(&self, volume: usize, axis: Axis) -> Option<SliceStack<'_>> {
        self.slices.stack(volume, axis)
    }

    pub fn slice(&self, volume: usize, axis: Axis, index: usize) -> Option<SliceImage<'_>> {
        self.slices.slice(volume, axis, index)
    }

    /// Slices of `volume` to draw for the eye at `eye` (volume local frame)
    pub fn frame_plan(&self, volume: usize, eye: &Vector3<f32>) -> Option<FramePlan<'_>> {
        FramePlan::for_eye(volume, eye, |axis| self.stack(volume, axis))
    }
}

#[cfg(test)]
mod test {
    use nalgebra::vector;

    use super::*;
    use crate::{slices::DrawOrder, test_helpers::*};

    #[test]
    fn every_stack_resampled() {
        let size = vector![6, 5, 4];
        let volumes = vec![solid_volume(size, 255), solid_volume(size, 0)];
        let store =
            VolumeStore::from_volumes(volumes, SliceLayout::new(3, 4, 4), Default::default())
                .unwrap();

        assert_eq!(store.volume_count(), 2);
        assert_eq!(store.volume_size(1), Some(size));
        assert_eq!(store.volume_size(2), None);
        assert_eq!(store.transfer_function(), TransferFunction::RedYellowRamp);
        for axis in Axis::ALL {
            let dense = store.stack(0, axis).unwrap();
            assert!(dense
                .as_bytes()
                .chunks_exact(4)
                .all(|t| t == [127, 127, 0, 255]));
            let empty = store.stack(1, axis).unwrap();
            assert!(empty.as_bytes().chunks_exact(4).all(|t| t == [0, 0, 0, 255]));
        }
    }

    #[test]
    fn empty_store_rejected() {
        let err = VolumeStore::from_volumes(vec![], SliceLayout::new(3, 4, 4), Default::default());
        assert!(matches!(err, Err(SlicerError::InvalidConfig(_))));
    }

    #[test]
    fn plan_for_current_volume() {
        let size = vector![6, 5, 4];
        let volumes = vec![gradient_volume(size), solid_volume(size, 200)];
        let store =
            VolumeStore::from_volumes(volumes, SliceLayout::new(4, 4, 4), Default::default())
                .unwrap();

        let plan = store.frame_plan(1, &vector![0.0, -3.0, 1.0]).unwrap();
        assert_eq!(plan.volume, 1);
        assert_eq!(plan.axis, Axis::Y);
        assert_eq!(plan.order, DrawOrder::Descending);
        assert_eq!(plan.slice_count(), 4);
        let expected = store.slice(1, Axis::Y, 3).unwrap();
        assert_eq!(plan.slices[0].image.as_bytes(), expected.as_bytes());

        assert!(store.frame_plan(2, &vector![0.0, 0.0, 1.0]).is_none());
    }
}
