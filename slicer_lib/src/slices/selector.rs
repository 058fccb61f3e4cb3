//! Per frame choice of slice stack and draw order.

use nalgebra::Vector3;

use super::Axis;

/// Order in which slice indices are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOrder {
    /// Slice 0 first
    Ascending,
    /// Last slice first
    Descending,
}

impl DrawOrder {
    /// Slice index drawn at `step` of `count` draws
    pub fn texture_index(self, step: usize, count: usize) -> usize {
        match self {
            DrawOrder::Ascending => step,
            DrawOrder::Descending => count - 1 - step,
        }
    }

    /// All slice indices, farthest first
    pub fn indices(self, count: usize) -> impl Iterator<Item = usize> {
        (0..count).map(move |step| self.texture_index(step, count))
    }
}

/// Stack and order a renderer should use for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceSelection {
    pub axis: Axis,
    pub order: DrawOrder,
}

/// Pick the stack most aligned with the viewer.
///
/// `eye` is the eye position in the volume's local frame (volume centered
/// at the origin), it does not need to be normalized. The axis with the
/// largest absolute component wins, ties go to Z, then Y, then X.
/// Slices are drawn farthest first so translucent slices composite correctly.
pub fn select_slices(eye: &Vector3<f32>) -> SliceSelection {
    let dir_x = Axis::X.basis().dot(eye);
    let dir_y = Axis::Y.basis().dot(eye);
    let dir_z = Axis::Z.basis().dot(eye);
    let (ax, ay, az) = (dir_x.abs(), dir_y.abs(), dir_z.abs());

    let (axis, component) = if az >= ay && az >= ax {
        (Axis::Z, dir_z)
    } else if ay >= az && ay >= ax {
        (Axis::Y, dir_y)
    } else {
        (Axis::X, dir_x)
    };

    let order = if component >= 0.0 {
        DrawOrder::Ascending
    } else {
        DrawOrder::Descending
    };

    SliceSelection { axis, order }
}

#[cfg(test)]
mod test {
    use nalgebra::vector;
    use proptest::prelude::*;

    use super::*;

    fn select(x: f32, y: f32, z: f32) -> SliceSelection {
        select_slices(&vector![x, y, z])
    }

    #[test]
    fn principal_directions() {
        assert_eq!(
            select(0.0, 0.0, 1.0),
            SliceSelection {
                axis: Axis::Z,
                order: DrawOrder::Ascending
            }
        );
        assert_eq!(
            select(0.0, 0.0, -1.0),
            SliceSelection {
                axis: Axis::Z,
                order: DrawOrder::Descending
            }
        );
        assert_eq!(select(0.0, 2.0, 0.5).axis, Axis::Y);
        assert_eq!(select(-3.0, 2.0, 0.5).axis, Axis::X);
        assert_eq!(select(-3.0, 2.0, 0.5).order, DrawOrder::Descending);
    }

    #[test]
    fn ties_prefer_z_then_y() {
        assert_eq!(select(1.0, 1.0, 1.0).axis, Axis::Z);
        assert_eq!(select(1.0, 0.0, -1.0).axis, Axis::Z);
        assert_eq!(select(0.0, 1.0, 1.0).axis, Axis::Z);
        assert_eq!(select(1.0, 1.0, 0.0).axis, Axis::Y);
        assert_eq!(select(-1.0, -1.0, 0.0).axis, Axis::Y);
        assert_eq!(select(-1.0, -1.0, 0.0).order, DrawOrder::Descending);
    }

    #[test]
    fn zero_component_draws_ascending() {
        assert_eq!(select(0.0, 0.0, 0.0).axis, Axis::Z);
        assert_eq!(select(0.0, 0.0, 0.0).order, DrawOrder::Ascending);
    }

    #[test]
    fn order_indices() {
        let asc: Vec<_> = DrawOrder::Ascending.indices(4).collect();
        let desc: Vec<_> = DrawOrder::Descending.indices(4).collect();
        assert_eq!(asc, [0, 1, 2, 3]);
        assert_eq!(desc, [3, 2, 1, 0]);
    }

    proptest! {
        #[test]
        fn order_is_permutation(count in 1usize..64, descending in any::<bool>()) {
            let order = if descending { DrawOrder::Descending } else { DrawOrder::Ascending };
            let mut seen: Vec<_> = order.indices(count).collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..count).collect::<Vec<_>>());
        }

        #[test]
        fn picked_axis_dominates(x in -10.0f32..10.0, y in -10.0f32..10.0, z in -10.0f32..10.0) {
            let eye = vector![x, y, z];
            let selection = select_slices(&eye);
            let picked = selection.axis.basis().dot(&eye);
            for axis in Axis::ALL {
                prop_assert!(picked.abs() >= axis.basis().dot(&eye).abs());
            }
            prop_assert_eq!(selection.order == DrawOrder::Ascending, picked >= 0.0);
        }
    }
}
