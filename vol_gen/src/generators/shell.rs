use nalgebra::Vector3;

use super::SampleGenerator;

/// Inner radius of the wall, as a fraction of the outer radius
const WALL: f32 = 0.8;

/// Hollow ball with a radial ramp inside.
///
/// The radius grows and shrinks over the series so consecutive volumes
/// differ, the way a scan over time would.
pub struct ShellGenerator {
    center: Vector3<f32>,
    radius: f32,
    sample: u8,
}

impl ShellGenerator {
    pub fn new(dims: Vector3<usize>, sample: u8, index: usize, count: usize) -> ShellGenerator {
        let dims = dims.cast::<f32>();
        let phase = if count > 0 {
            index as f32 / count as f32
        } else {
            0.0
        };
        let breathe = 0.85 + 0.15 * (phase * std::f32::consts::TAU).sin();

        ShellGenerator {
            center: (dims - Vector3::repeat(1.0)) / 2.0,
            radius: dims.min() * 0.45 * breathe,
            sample,
        }
    }
}

impl SampleGenerator for ShellGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        let r = (coords.cast::<f32>() - self.center).magnitude() / self.radius;
        if r > 1.0 {
            0
        } else if r >= WALL {
            self.sample
        } else {
            // brighter toward the middle
            let ramp = 1.0 - r / WALL;
            (f32::from(self.sample) * (0.1 + 0.4 * ramp)) as u8
        }
    }
}
