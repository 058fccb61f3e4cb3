//! Hand-off of one frame to a renderer.

use nalgebra::Vector3;

use super::{select_slices, Axis, DrawOrder, SliceImage, SliceSelection, SliceStack};

/// Half of the side of the cube slices are drawn into, in world units
pub const DEFAULT_HALF_SIZE: f32 = 2.0;

/// Offset of slice `index` along the stack axis.
/// Slices are spread evenly over `<-half_size;half_size>`, a single slice sits in the middle.
pub fn slice_depth(index: usize, count: usize, half_size: f32) -> f32 {
    if count < 2 {
        return 0.0;
    }
    (index as f32 * 2.0 * half_size) / (count - 1) as f32 - half_size
}

/// One slice of a frame, with its place in the stack.
#[derive(Debug, Clone, Copy)]
pub struct PlacedSlice<'a> {
    /// Index inside the stack
    pub index: usize,
    /// Offset along the stack axis, see [`slice_depth`]
    pub depth: f32,
    pub image: SliceImage<'a>,
}

/// Everything a renderer needs to draw one volume for one frame.
/// Slices are listed in draw order, farthest first.
#[derive(Debug, Clone)]
pub struct FramePlan<'a> {
    pub volume: usize,
    pub axis: Axis,
    pub order: DrawOrder,
    pub slices: Vec<PlacedSlice<'a>>,
}

impl<'a> FramePlan<'a> {
    /// Order the slices of `stack` according to `selection`.
    pub fn new(
        volume: usize,
        selection: SliceSelection,
        stack: SliceStack<'a>,
        half_size: f32,
    ) -> FramePlan<'a> {
        let count = stack.len();
        let slices = selection
            .order
            .indices(count)
            .filter_map(|index| {
                stack.get(index).map(|image| PlacedSlice {
                    index,
                    depth: slice_depth(index, count, half_size),
                    image,
                })
            })
            .collect();

        FramePlan {
            volume,
            axis: selection.axis,
            order: selection.order,
            slices,
        }
    }

    /// Plan for the eye position `eye` (volume local frame).
    /// `pick` returns the stack of the selected axis.
    pub fn for_eye(
        volume: usize,
        eye: &Vector3<f32>,
        pick: impl Fn(Axis) -> Option<SliceStack<'a>>,
    ) -> Option<FramePlan<'a>> {
        let selection = select_slices(eye);
        let stack = pick(selection.axis)?;
        Some(FramePlan::new(volume, selection, stack, DEFAULT_HALF_SIZE))
    }

    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }
}
