//! Additive slice blending on the CPU
//!
//! Blend factors are source alpha for the incoming slice and destination
//! alpha for the framebuffer, over a transparent black clear color.

use slicer_lib::slices::{SliceImage, SliceLayout};

/// Framebuffer in slice texel order, RGBA
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    layout: SliceLayout,
}

impl Compositor {
    pub fn new(layout: SliceLayout) -> Compositor {
        Compositor { layout }
    }

    pub fn buffer_len(&self) -> usize {
        self.layout.slice_bytes()
    }

    pub fn clear(&self, buffer: &mut [u8]) {
        buffer.fill(0);
    }

    /// `dst = src * src_alpha + dst * dst_alpha`, per channel, saturating
    pub fn blend(&self, buffer: &mut [u8], slice: &SliceImage<'_>) {
        for (dst, src) in buffer
            .chunks_exact_mut(4)
            .zip(slice.as_bytes().chunks_exact(4))
        {
            let src_alpha = u32::from(src[3]);
            let dst_alpha = u32::from(dst[3]);
            for (d, &s) in dst.iter_mut().zip(src) {
                let value = (u32::from(s) * src_alpha + u32::from(*d) * dst_alpha) / 255;
                *d = value.min(255) as u8;
            }
        }
    }

    pub fn layout(&self) -> SliceLayout {
        self.layout
    }
}
