use nalgebra::Vector3;

use super::SampleGenerator;

/// Empty margin around the solid block
const PAD: usize = 2;

/// Generate solid volume
/// All samples inside the padding are the same
pub struct SolidGenerator {
    /// The sample value
    sample: u8,
    pad: usize,
    dims: Vector3<usize>,
}

impl SolidGenerator {
    pub fn new(dims: Vector3<usize>, sample: u8) -> SolidGenerator {
        SolidGenerator {
            sample,
            pad: PAD,
            dims,
        }
    }
}

impl SampleGenerator for SolidGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        let inside = coords
            .iter()
            .zip(self.dims.iter())
            .all(|(&c, &d)| c >= self.pad && c + self.pad < d);
        if inside {
            self.sample
        } else {
            0
        }
    }
}
