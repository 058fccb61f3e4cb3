//! Fixed capacity storage of all slice stacks.
//!
//! Every (volume, axis) pair owns one stack of `slice_count` RGBA images of
//! `width * height` texels. All stacks live in one contiguous buffer
//! allocated up front, stacks of one volume are adjacent (x, y, z).

use std::ops::Range;

use crate::{
    color::Texel,
    error::{Result, SlicerError},
};

use super::Axis;

/// Bytes per RGBA texel
const TEXEL_BYTES: usize = 4;

/// Shape of every slice stack in a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceLayout {
    /// Slices per stack
    pub slice_count: usize,
    /// Columns of a slice image
    pub width: usize,
    /// Rows of a slice image
    pub height: usize,
}

impl SliceLayout {
    pub fn new(slice_count: usize, width: usize, height: usize) -> SliceLayout {
        SliceLayout {
            slice_count,
            width,
            height,
        }
    }

    /// Reject empty sides and stacks whose byte size overflows.
    pub fn validate(&self) -> Result<()> {
        if self.slice_count == 0 || self.width == 0 || self.height == 0 {
            return Err(SlicerError::InvalidConfig(format!(
                "slice layout {}x{}x{} has an empty side",
                self.slice_count, self.width, self.height
            )));
        }
        if self.checked_stack_bytes().is_none() {
            return Err(self.too_large());
        }
        Ok(())
    }

    fn checked_stack_bytes(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(TEXEL_BYTES)?
            .checked_mul(self.slice_count)
    }

    fn too_large(&self) -> SlicerError {
        SlicerError::InvalidConfig(format!(
            "slice layout {}x{}x{} is too large",
            self.slice_count, self.width, self.height
        ))
    }

    /// Size of one slice image, layout must be valid
    pub fn slice_bytes(&self) -> usize {
        self.width * self.height * TEXEL_BYTES
    }

    /// Size of one stack, layout must be valid
    pub fn stack_bytes(&self) -> usize {
        self.slice_count * self.slice_bytes()
    }

    /// Size of an arena holding every stack of `volume_count` volumes
    pub fn arena_bytes(&self, volume_count: usize) -> Result<usize> {
        self.validate()?;
        self.stack_bytes()
            .checked_mul(Axis::ALL.len())
            .and_then(|bytes| bytes.checked_mul(volume_count))
            .ok_or_else(|| self.too_large())
    }

    /// Byte offset of a texel inside a slice image.
    /// Images are stored column by column.
    pub fn texel_offset(&self, column: usize, row: usize) -> usize {
        TEXEL_BYTES * (self.height * column + row)
    }
}

/// Read only view of one slice image.
#[derive(Debug, Clone, Copy)]
pub struct SliceImage<'a> {
    layout: SliceLayout,
    data: &'a [u8],
}

impl<'a> SliceImage<'a> {
    pub fn width(&self) -> usize {
        self.layout.width
    }

    pub fn height(&self) -> usize {
        self.layout.height
    }

    /// Raw RGBA bytes, ready for texture upload
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn texel(&self, column: usize, row: usize) -> Option<Texel> {
        if column >= self.layout.width || row >= self.layout.height {
            return None;
        }
        let offset = self.layout.texel_offset(column, row);
        let bytes = self.data.get(offset..offset + TEXEL_BYTES)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

/// Read only view of one slice stack.
#[derive(Debug, Clone, Copy)]
pub struct SliceStack<'a> {
    layout: SliceLayout,
    data: &'a [u8],
}

impl<'a> SliceStack<'a> {
    pub fn len(&self) -> usize {
        self.layout.slice_count
    }

    pub fn is_empty(&self) -> bool {
        self.layout.slice_count == 0
    }

    pub fn get(&self, index: usize) -> Option<SliceImage<'a>> {
        if index >= self.layout.slice_count {
            return None;
        }
        let size = self.layout.slice_bytes();
        let data = self.data.get(index * size..(index + 1) * size)?;
        Some(SliceImage {
            layout: self.layout,
            data,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = SliceImage<'a>> + 'a {
        let layout = self.layout;
        self.data
            .chunks_exact(layout.slice_bytes())
            .map(move |data| SliceImage { layout, data })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }
}

/// Writable view of one slice stack, handed to the resampler.
#[derive(Debug)]
pub struct SliceStackMut<'a> {
    layout: SliceLayout,
    data: &'a mut [u8],
}

impl<'a> SliceStackMut<'a> {
    pub fn layout(&self) -> SliceLayout {
        self.layout
    }

    /// Slice images in stack order
    pub fn slices_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        let size = self.layout.slice_bytes();
        self.data.chunks_exact_mut(size)
    }

    /// Wrap a caller owned buffer of exactly `layout.stack_bytes()` bytes.
    pub fn from_buffer(layout: SliceLayout, data: &'a mut [u8]) -> Result<SliceStackMut<'a>> {
        layout.validate()?;
        if data.len() != layout.stack_bytes() {
            return Err(SlicerError::SizeMismatch {
                expected: layout.stack_bytes(),
                actual: data.len(),
            });
        }
        Ok(SliceStackMut { layout, data })
    }
}

/// Owner of every slice stack of a store.
pub struct SliceArena {
    layout: SliceLayout,
    volume_count: usize,
    data: Vec<u8>,
}

impl std::fmt::Debug for SliceArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliceArena")
            .field("layout", &self.layout)
            .field("volume_count", &self.volume_count)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl SliceArena {
    /// Allocate zeroed storage for `volume_count` volumes.
    pub fn allocate(layout: SliceLayout, volume_count: usize) -> Result<SliceArena> {
        let data = vec![0; layout.arena_bytes(volume_count)?];
        Ok(SliceArena {
            layout,
            volume_count,
            data,
        })
    }

    pub fn layout(&self) -> SliceLayout {
        self.layout
    }

    pub fn volume_count(&self) -> usize {
        self.volume_count
    }

    /// Texture memory held by the arena
    pub fn total_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn stack_range(&self, volume: usize, axis: Axis) -> Option<Range<usize>> {
        if volume >= self.volume_count {
            return None;
        }
        let size = self.layout.stack_bytes();
        let start = (volume * Axis::ALL.len() + axis.index()) * size;
        Some(start..start + size)
    }

    pub fn stack(&self, volume: usize, axis: Axis) -> Option<SliceStack<'_>> {
        let range = self.stack_range(volume, axis)?;
        Some(SliceStack {
            layout: self.layout,
            data: &self.data[range],
        })
    }

    pub fn stack_mut(&mut self, volume: usize, axis: Axis) -> Option<SliceStackMut<'_>> {
        let range = self.stack_range(volume, axis)?;
        Some(SliceStackMut {
            layout: self.layout,
            data: &mut self.data[range],
        })
    }

    pub fn slice(&self, volume: usize, axis: Axis, index: usize) -> Option<SliceImage<'_>> {
        self.stack(volume, axis)?.get(index)
    }
}
