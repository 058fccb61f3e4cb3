//! Axis aligned slice stacks and everything that reads or writes them.

mod arena;
mod axis;
mod frame;
mod resampler;
mod selector;

pub use arena::{SliceArena, SliceImage, SliceLayout, SliceStack, SliceStackMut};
pub use axis::Axis;
pub use frame::{slice_depth, FramePlan, PlacedSlice, DEFAULT_HALF_SIZE};
pub use resampler::SliceResampler;
pub use selector::{select_slices, DrawOrder, SliceSelection};
