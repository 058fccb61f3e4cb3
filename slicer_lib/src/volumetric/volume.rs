use nalgebra::Vector3;

use crate::error::{Result, SlicerError};

/// Grid of 8-bit density samples.
///
/// Samples are laid out with x growing fastest:
/// `z * (size.x * size.y) + y * size.x + x`
#[derive(Clone, PartialEq, Eq)]
pub struct Volume {
    size: Vector3<usize>,
    data: Vec<u8>,
}

impl std::fmt::Debug for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Volume")
            .field("size", &self.size)
            .field("data len ", &self.data.len())
            .finish()
    }
}

impl Volume {
    /// Number of samples of a volume of `size`, an error if it does not fit `usize`
    pub fn voxel_count(size: Vector3<usize>) -> Result<usize> {
        size.iter()
            .try_fold(1usize, |count, &side| count.checked_mul(side))
            .ok_or_else(|| {
                SlicerError::InvalidConfig(format!(
                    "volume size {}x{}x{} is too large",
                    size.x, size.y, size.z
                ))
            })
    }

    /// Wrap samples, `data` must hold exactly one volume.
    pub fn from_data(size: Vector3<usize>, data: Vec<u8>) -> Result<Volume> {
        let expected = Volume::voxel_count(size)?;
        if expected == 0 {
            return Err(SlicerError::InvalidConfig(format!(
                "volume size {}x{}x{} has an empty side",
                size.x, size.y, size.z
            )));
        }
        if data.len() != expected {
            return Err(SlicerError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Volume { size, data })
    }

    pub fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    pub fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        z * (self.size.x * self.size.y) + y * self.size.x + x
    }

    /// Sample at integer coordinates, `None` outside the volume
    pub fn get_data(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
