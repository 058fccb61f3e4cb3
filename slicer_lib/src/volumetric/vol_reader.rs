//! Reading raw, headerless volume files.
//!
//! A data set is a directory of files named `<base>.<index>.<ext>`, each
//! holding one volume of 8-bit samples without any header.

use std::{fs::File, path::Path};

use log::{debug, warn};
use memmap::MmapOptions;
use nalgebra::Vector3;

use crate::error::{Result, SlicerError};

use super::Volume;

/// Name of the `index`-th file of a data set, for example `cavebrain.3.img`
pub fn volume_file_name(base: &str, index: usize, extension: &str) -> String {
    format!("{base}.{index}.{extension}")
}

/// Read one volume of `size` from `dir/file_name`.
///
/// The first `size.x * size.y * size.z` bytes are used, trailing bytes are
/// ignored. Shorter files are an error.
pub fn read_volume(dir: &Path, file_name: &str, size: Vector3<usize>) -> Result<Volume> {
    let path = dir.join(file_name);
    let open_error = |source| SlicerError::OpenFile {
        file: file_name.to_owned(),
        dir: dir.to_path_buf(),
        source,
    };

    let file = File::open(&path).map_err(open_error)?;
    let file_len = file.metadata().map_err(open_error)?.len() as usize;

    let expected = Volume::voxel_count(size)?;
    if file_len < expected {
        return Err(SlicerError::ShortRead {
            file: file_name.to_owned(),
            dir: dir.to_path_buf(),
            expected,
            actual: file_len,
        });
    }
    if file_len > expected {
        warn!("{path:?} holds {file_len} bytes, using the first {expected}");
    }

    // Length checked above, empty files never get mapped
    let mmap = unsafe { MmapOptions::new().len(expected).map(&file) }.map_err(open_error)?;
    let data = mmap[..expected].to_vec();

    debug!("Read {expected} samples from {path:?}");

    Volume::from_data(size, data)
}
