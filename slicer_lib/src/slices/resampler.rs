//! Volume to slice stack resampling.
//!
//! Nearest neighbour, no interpolation. Slice grids are usually coarser
//! than the volume along some axes and finer along others, aliasing is
//! expected.

use nalgebra::{vector, Vector3};

use crate::{transfer_functions::TransferFunction, volumetric::Volume};

use super::{Axis, SliceLayout, SliceStackMut};

/// Fills slice stacks from a volume through a transfer function.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceResampler {
    tf: TransferFunction,
}

// floor(index * dim / count), exact in integers, result < dim for index < count
fn scale(index: usize, dim: usize, count: usize) -> usize {
    (index as u128 * dim as u128 / count as u128) as usize
}

impl SliceResampler {
    pub fn new(tf: TransferFunction) -> SliceResampler {
        SliceResampler { tf }
    }

    pub fn transfer_function(&self) -> TransferFunction {
        self.tf
    }

    /// Volume coordinate sampled by texel (`column`, `row`) of slice `slice`.
    ///
    /// * X stack -- slice picks x (reversed), column z, row y
    /// * Y stack -- slice picks y, column z, row x
    /// * Z stack -- slice picks z (reversed), column x, row y
    pub fn source_coords(
        size: Vector3<usize>,
        layout: &SliceLayout,
        axis: Axis,
        slice: usize,
        column: usize,
        row: usize,
    ) -> Vector3<usize> {
        let SliceLayout {
            slice_count,
            width,
            height,
        } = *layout;
        let reversed = slice_count - 1 - slice;

        match axis {
            Axis::X => vector![
                scale(reversed, size.x, slice_count),
                scale(row, size.y, height),
                scale(column, size.z, width)
            ],
            Axis::Y => vector![
                scale(row, size.x, height),
                scale(slice, size.y, slice_count),
                scale(column, size.z, width)
            ],
            Axis::Z => vector![
                scale(column, size.x, width),
                scale(row, size.y, height),
                scale(reversed, size.z, slice_count)
            ],
        }
    }

    /// Populate every slice of `stack` from `volume`.
    ///
    /// Deterministic, running it again over the same volume writes identical bytes.
    pub fn resample(&self, volume: &Volume, axis: Axis, stack: &mut SliceStackMut<'_>) {
        let layout = stack.layout();
        let size = volume.get_size();
        let samples = volume.as_slice();
        let table = self.tf.table();

        for (slice_index, slice) in stack.slices_mut().enumerate() {
            // texels are column major, walk rows in the inner loop
            let mut texels = slice.chunks_exact_mut(4);
            for column in 0..layout.width {
                for row in 0..layout.height {
                    let pos =
                        Self::source_coords(size, &layout, axis, slice_index, column, row);
                    let density = samples[volume.get_3d_index(pos.x, pos.y, pos.z)];
                    if let Some(texel) = texels.next() {
                        texel.copy_from_slice(&table[density as usize]);
                    }
                }
            }
        }
    }
}
