//! PNG export of frames and slice stacks

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use log::debug;
use slicer_lib::{
    slices::{Axis, SliceLayout},
    volumetric::VolumeStore,
};

use crate::error::Result;

/// Convert texels stored column by column into an image, column `x` row `y`
pub fn texels_to_image(layout: SliceLayout, bytes: &[u8]) -> RgbaImage {
    RgbaImage::from_fn(layout.width as u32, layout.height as u32, |x, y| {
        let offset = layout.texel_offset(x as usize, y as usize);
        let mut texel = [0; 4];
        texel.copy_from_slice(&bytes[offset..offset + 4]);
        Rgba(texel)
    })
}

pub fn export_frame(
    dir: &Path,
    frame: usize,
    layout: SliceLayout,
    buffer: &[u8],
) -> Result<PathBuf> {
    let path = dir.join(format!("frame_{frame:04}.png"));
    texels_to_image(layout, buffer).save(&path)?;
    debug!("Exported {}", path.display());
    Ok(path)
}

/// Write every slice of every stack of `volume`, returns the number of files
pub fn export_stacks(dir: &Path, store: &VolumeStore, volume: usize) -> Result<usize> {
    let layout = store.layout();
    let mut written = 0;
    for axis in Axis::ALL {
        let stack = match store.stack(volume, axis) {
            Some(s) => s,
            None => continue,
        };
        for (index, slice) in stack.iter().enumerate() {
            let path = dir.join(format!("volume_{volume}_{axis}_{index:02}.png"));
            texels_to_image(layout, slice.as_bytes()).save(&path)?;
            written += 1;
        }
    }
    debug!("Exported {written} slices of volume {volume}");
    Ok(written)
}

#[cfg(test)]
mod test {
    use nalgebra::vector;
    use slicer_lib::{
        test_helpers::{plane_volume, ScratchDir},
        transfer_functions::classify,
        TransferFunction,
    };

    use super::*;

    #[test]
    fn columns_become_x() {
        let layout = SliceLayout::new(1, 3, 2);
        let mut bytes = vec![0; layout.slice_bytes()];
        // column 2, row 1
        let offset = layout.texel_offset(2, 1);
        bytes[offset..offset + 4].copy_from_slice(&[1, 2, 3, 4]);

        let image = texels_to_image(layout, &bytes);
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Rgba([1, 2, 3, 4]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn slice_image_matches_texels() {
        let size = vector![5, 5, 5];
        let volume = plane_volume(size, Axis::Z, 2, 255);
        let layout = SliceLayout::new(2, 4, 3);
        let store =
            VolumeStore::from_volumes(vec![volume], layout, TransferFunction::default()).unwrap();

        let slice = store.slice(0, Axis::Y, 1).unwrap();
        let image = texels_to_image(layout, slice.as_bytes());
        for x in 0..4 {
            for y in 0..3 {
                let texel = slice.texel(x, y).unwrap();
                assert_eq!(image.get_pixel(x as u32, y as u32).0, texel);
            }
        }
        assert!(image.pixels().any(|p| p.0 == classify(255)));
    }

    #[test]
    fn stacks_written() {
        let dir = ScratchDir::new().unwrap();
        let layout = SliceLayout::new(3, 4, 4);
        let volume = plane_volume(vector![4, 4, 4], Axis::X, 0, 200);
        let store =
            VolumeStore::from_volumes(vec![volume], layout, TransferFunction::default()).unwrap();

        assert_eq!(export_stacks(dir.path(), &store, 0).unwrap(), 9);
        assert!(dir.path().join("volume_0_z_02.png").exists());
        assert_eq!(export_stacks(dir.path(), &store, 1).unwrap(), 0);

        let buffer = vec![255; layout.slice_bytes()];
        let path = export_frame(dir.path(), 3, layout, &buffer).unwrap();
        assert!(path.ends_with("frame_0003.png"));
        assert_eq!(image::open(&path).unwrap().to_rgba8().dimensions(), (4, 4));
    }
}
