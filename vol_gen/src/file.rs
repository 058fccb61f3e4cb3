use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use log::debug;
use slicer_lib::volumetric::Volume;

pub fn open_create_file<P>(path: P) -> Result<File, io::Error>
where
    P: AsRef<Path>,
{
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Write raw samples, no header
pub fn write_volume(dir: &Path, file_name: &str, volume: &Volume) -> Result<(), io::Error> {
    let path = dir.join(file_name);
    let mut file = open_create_file(&path)?;
    file.write_all(volume.as_slice())?;
    debug!("Wrote {} bytes to {}", volume.as_slice().len(), path.display());
    Ok(())
}
