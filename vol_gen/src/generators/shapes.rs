use std::ops::RangeBounds;

use nalgebra::{vector, Vector3};

use super::SampleGenerator;

/// Generate volume with a number of randomly placed shapes
pub struct ShapesGenerator {
    shapes: Vec<ShapeInfo>,
}

impl ShapesGenerator {
    pub fn new(
        dims: Vector3<usize>,
        n_of_shapes: usize,
        sample: u8,
        obj_size: usize,
        seed: Option<u64>,
    ) -> ShapesGenerator {
        let size = vector![obj_size, obj_size, obj_size];
        let variance = size / 4;
        let random_shape_gen = ShapeInfoGenerator::new(dims, size, variance, sample, 10, seed);
        let shapes = random_shape_gen.get_shapes(n_of_shapes);
        ShapesGenerator { shapes }
    }
}

impl SampleGenerator for ShapesGenerator {
    fn sample_at(&self, coords: Vector3<usize>) -> u8 {
        for shape in &self.shapes {
            if shape.contains(coords) {
                let offset = coords - shape.position_low;
                let sample = shape.render_at(offset);
                if sample != 0 {
                    return sample;
                }
            }
        }
        0
    }
}

// # of enum ShapeType variants
const N_OF_SHAPE_KINDS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Cuboid,
    Sphere,
}

/// One shape in volume, bounds inclusive
#[derive(Debug)]
pub struct ShapeInfo {
    pub position_low: Vector3<usize>,
    pub position_high: Vector3<usize>,
    pub shape_type: ShapeType,
    pub sample: u8,
}

impl ShapeInfo {
    fn contains(&self, coords: Vector3<usize>) -> bool {
        (0..3).all(|i| coords[i] >= self.position_low[i] && coords[i] <= self.position_high[i])
    }

    fn render_at(&self, offset: Vector3<usize>) -> u8 {
        match self.shape_type {
            ShapeType::Cuboid => self.sample,
            ShapeType::Sphere => self.render_sphere(offset),
        }
    }

    fn render_sphere(&self, offset: Vector3<usize>) -> u8 {
        let extent = (self.position_high - self.position_low).cast::<f32>();
        let center = extent / 2.0;
        let r = extent.min() / 2.0;

        if (offset.cast::<f32>() - center).magnitude() <= r {
            self.sample
        } else {
            0
        }
    }
}

/// Generate shapes
/// Helper type
pub struct ShapeInfoGenerator {
    rng: fastrand::Rng,
    vol_dims: Vector3<usize>,
    size: Vector3<usize>,
    size_variance: Vector3<usize>,
    sample: u8,
    sample_variance: u8,
}

impl ShapeInfoGenerator {
    #[must_use]
    pub fn new(
        vol_dims: Vector3<usize>,
        size: Vector3<usize>,
        size_variance: Vector3<usize>,
        sample: u8,
        sample_variance: u8,
        seed: Option<u64>,
    ) -> Self {
        let rng = fastrand::Rng::new();
        if let Some(seed) = seed {
            rng.seed(seed);
        }

        Self {
            rng,
            vol_dims,
            size,
            size_variance,
            sample,
            sample_variance,
        }
    }

    fn random_shape(&self) -> ShapeType {
        if self.rng.u8(0..N_OF_SHAPE_KINDS) == 0 {
            ShapeType::Cuboid
        } else {
            ShapeType::Sphere
        }
    }

    fn random_vector<R>(&self, ranges: [R; 3]) -> Vector3<usize>
    where
        R: RangeBounds<usize>,
    {
        let [x, y, z] = ranges;
        vector![self.rng.usize(x), self.rng.usize(y), self.rng.usize(z)]
    }

    pub fn get_shapes(&self, n: usize) -> Vec<ShapeInfo> {
        (0..n).map(|_| self.get_shape()).collect()
    }

    pub fn get_shape(&self) -> ShapeInfo {
        let shape_type = self.random_shape();

        // side lengths, clamped so the shape fits
        let size_ranges = [0, 1, 2].map(|i| {
            let low = self.size[i].saturating_sub(self.size_variance[i]).max(1);
            let high = (self.size[i] + self.size_variance[i]).min(self.vol_dims[i]);
            low.min(high)..=high
        });
        let size = self.random_vector(size_ranges);

        // Spawn shape in positions it fits
        let pos_ranges = [0, 1, 2].map(|i| 0..=(self.vol_dims[i] - size[i]));
        let position_low = self.random_vector(pos_ranges);

        let position_high = position_low + size - vector![1, 1, 1];

        ShapeInfo {
            position_low,
            position_high,
            shape_type,
            sample: self.random_sample(),
        }
    }

    fn random_sample(&self) -> u8 {
        // Uses saturating intrinsics, so there is no overflow
        let low = self.sample.saturating_sub(self.sample_variance).max(1);
        let high = self.sample.saturating_add(self.sample_variance).max(low);
        self.rng.u8(low..=high)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shapes_stay_inside() {
        let dims = vector![20, 15, 10];
        let gen = ShapeInfoGenerator::new(dims, vector![6, 6, 6], vector![2, 2, 2], 100, 10, Some(3));
        for shape in gen.get_shapes(50) {
            for i in 0..3 {
                assert!(shape.position_low[i] <= shape.position_high[i]);
                assert!(shape.position_high[i] < dims[i]);
            }
            assert!((90..=110).contains(&shape.sample));
        }
    }

    #[test]
    fn seed_repeats() {
        let dims = vector![30, 30, 30];
        let a = ShapesGenerator::new(dims, 5, 120, 8, Some(9));
        let b = ShapesGenerator::new(dims, 5, 120, 8, Some(9));
        for (sa, sb) in a.shapes.iter().zip(&b.shapes) {
            assert_eq!(sa.position_low, sb.position_low);
            assert_eq!(sa.shape_type, sb.shape_type);
            assert_eq!(sa.sample, sb.sample);
        }
    }

    #[test]
    fn cuboid_fills_bounds() {
        let shape = ShapeInfo {
            position_low: vector![2, 2, 2],
            position_high: vector![4, 5, 6],
            shape_type: ShapeType::Cuboid,
            sample: 77,
        };
        let gen = ShapesGenerator {
            shapes: vec![shape],
        };
        assert_eq!(gen.sample_at(vector![2, 2, 2]), 77);
        assert_eq!(gen.sample_at(vector![4, 5, 6]), 77);
        assert_eq!(gen.sample_at(vector![5, 5, 6]), 0);
        assert_eq!(gen.sample_at(vector![1, 3, 3]), 0);
    }

    #[test]
    fn sphere_is_round() {
        let shape = ShapeInfo {
            position_low: vector![0, 0, 0],
            position_high: vector![8, 8, 8],
            shape_type: ShapeType::Sphere,
            sample: 50,
        };
        assert_eq!(shape.render_at(vector![4, 4, 4]), 50);
        assert_eq!(shape.render_at(vector![0, 0, 0]), 0);
        assert_eq!(shape.render_at(vector![8, 4, 4]), 50);
    }
}
