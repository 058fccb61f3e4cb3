//! Transfer functions, density to color.
//!
//! Thresholds are hand tuned for the brain data sets the viewer was built
//! around. Blue is avoided so a blue background can sit behind the volume.

use serde::{Deserialize, Serialize};

use crate::color::{self, Texel, RGBA};

/// Normalized densities below this are black (see-through)
pub const TRANSPARENT_THRESHOLD: f32 = 0.02;
/// Normalized density where the dark red band ends and the ramp starts
pub const RED_EDGE: f32 = 0.1;
/// Point of the remapped ramp where green jumps towards yellow
pub const YELLOW_EDGE: f32 = 0.3;
/// Larger exponents darken the grays
pub const GRAY_EXPONENT: f32 = 1.4;
/// Keeps the brightest texels away from (255, 255, 255)
pub const DECLIP: f32 = 0.5;

/// Selectable classification strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransferFunction {
    /// Dark red for faint tissue, ramping through red to yellow
    #[default]
    #[serde(rename = "red_yellow")]
    RedYellowRamp,
    /// Dark gray to white
    #[serde(rename = "grayscale")]
    GrayscaleRamp,
}

impl TransferFunction {
    /// Classify one voxel into a texel ready for upload.
    pub fn classify(self, density: u8) -> Texel {
        color::quantize(self.color(density), DECLIP)
    }

    /// Unquantized color of a density.
    pub fn color(self, density: u8) -> RGBA {
        let br = density as f32 / 255.0;
        if br < TRANSPARENT_THRESHOLD {
            return color::mono(0.0, 1.0);
        }
        match self {
            TransferFunction::RedYellowRamp => red_yellow_ramp(br),
            TransferFunction::GrayscaleRamp => grayscale_ramp(br),
        }
    }

    /// Lookup table of all 256 classified densities
    pub fn table(self) -> [Texel; 256] {
        let mut table = [[0; 4]; 256];
        for (density, texel) in table.iter_mut().enumerate() {
            *texel = self.classify(density as u8);
        }
        table
    }
}

/// Classify with the default transfer function.
pub fn classify(density: u8) -> Texel {
    TransferFunction::default().classify(density)
}

// br in <TRANSPARENT_THRESHOLD;1>
fn red_yellow_ramp(br: f32) -> RGBA {
    // remap edge..1 to 0..1
    let ramp = (br - RED_EDGE) / (1.0 - RED_EDGE);
    if ramp < 0.0 {
        return color::new(0.7, 0.0, 0.08, 1.0);
    }

    let r = 0.7 + (1.0 - 0.7) * ramp;
    let g = if ramp > YELLOW_EDGE {
        (ramp - YELLOW_EDGE) / (1.0 - YELLOW_EDGE) * 0.25 + 0.75
    } else {
        ramp * 0.6
    };
    let b = 0.4 * (1.0 - ramp);

    color::new(r, g, b, 1.0)
}

// Saturates to white well before br reaches 1
fn grayscale_ramp(br: f32) -> RGBA {
    let v = (0.2 + 0.7 * (br / RED_EDGE)).powf(GRAY_EXPONENT);
    color::mono(v, 1.0)
}
