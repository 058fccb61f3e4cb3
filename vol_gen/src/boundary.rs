use nalgebra::Vector3;

/// Guide value written on volume edges
pub const EDGE_SAMPLE: u8 = 90;
/// Guide value written on volume faces
pub const FACE_SAMPLE: u8 = 7;

/// Overwrite the outer shell of a linear volume buffer.
///
/// Voxels touching two or more outer planes get [`EDGE_SAMPLE`], voxels
/// touching one get [`FACE_SAMPLE`].
pub fn mark_boundary(data: &mut [u8], dims: Vector3<usize>) {
    let on_side = |c: usize, d: usize| usize::from(c == 0 || c + 1 == d);

    for z in 0..dims.z {
        for y in 0..dims.y {
            for x in 0..dims.x {
                let sides = on_side(x, dims.x) + on_side(y, dims.y) + on_side(z, dims.z);
                let index = z * dims.x * dims.y + y * dims.x + x;
                match sides {
                    0 => (),
                    1 => data[index] = FACE_SAMPLE,
                    _ => data[index] = EDGE_SAMPLE,
                }
            }
        }
    }
}
