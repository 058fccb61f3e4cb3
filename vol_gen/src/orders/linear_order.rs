use nalgebra::{vector, Vector3};

/// Visits every coordinate of a volume in file order, x growing fastest
#[derive(Debug)]
pub struct LinearCoordIterator {
    pub dims: Vector3<usize>,
    pub state: Vector3<usize>,
    done: bool,
    started: bool,
}

impl LinearCoordIterator {
    pub fn from_dims(dims: Vector3<usize>) -> LinearCoordIterator {
        LinearCoordIterator {
            dims,
            state: vector![0, 0, 0],
            done: dims.iter().any(|&d| d == 0),
            started: false,
        }
    }
}

impl Iterator for LinearCoordIterator {
    type Item = Vector3<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.state);
        }
        self.state.x += 1;
        if self.state.x == self.dims.x {
            self.state.x = 0;
            self.state.y += 1;
        }
        if self.state.y == self.dims.y {
            self.state.y = 0;
            self.state.z += 1;
        }
        if self.state.z == self.dims.z {
            self.state.z = 0;
            self.done = true;
            return None;
        }

        Some(self.state)
    }
}
