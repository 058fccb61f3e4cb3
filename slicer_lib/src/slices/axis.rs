use nalgebra::{vector, Vector3};

/// Principal axis of the volume, one slice stack each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of the axis stack inside a volume's block of stacks
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn basis(self) -> Vector3<f32> {
        match self {
            Axis::X => vector![1.0, 0.0, 0.0],
            Axis::Y => vector![0.0, 1.0, 0.0],
            Axis::Z => vector![0.0, 0.0, 1.0],
        }
    }

    /// Slice 0 of the X and Z stacks is the far (last) plane of the volume,
    /// of the Y stack the first one. Keeps slice 0 of all stacks facing the same
    /// visual front.
    pub fn is_reversed(self) -> bool {
        matches!(self, Axis::X | Axis::Z)
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
