//! Data set configuration.
//!
//! Values come from defaults (the sample brain data set), then an optional
//! TOML file, then the `SLICER_DATA_PATH` environment variable for the data
//! directory. Binaries apply their command line on top.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use nalgebra::{vector, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SlicerError},
    slices::SliceLayout,
    transfer_functions::TransferFunction,
    volumetric::{volume_file_name, Volume},
};

/// Environment variable overriding the data directory
pub const DATA_PATH_ENV: &str = "SLICER_DATA_PATH";

/// Data set layout and slicing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Directory holding the volume files
    pub data_path: Option<PathBuf>,
    /// File name stem, `cavebrain` in `cavebrain.0.img`
    pub base_name: String,
    /// File extension without the dot
    pub extension: String,
    /// Samples along x, y, z
    pub dims: [usize; 3],
    /// Files in the data set
    pub volume_count: usize,
    /// Slices per axis stack
    pub slice_count: usize,
    pub slice_width: usize,
    pub slice_height: usize,
    pub transfer_function: TransferFunction,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            data_path: None,
            base_name: "cavebrain".into(),
            extension: "img".into(),
            dims: [91, 109, 91],
            volume_count: 10,
            // the poor graphics boards can't take too much
            slice_count: 10,
            slice_width: 128,
            slice_height: 128,
            transfer_function: TransferFunction::RedYellowRamp,
        }
    }
}

impl DatasetConfig {
    pub fn from_toml_str(s: &str) -> Result<DatasetConfig> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file<P>(path: P) -> Result<DatasetConfig>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SlicerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        DatasetConfig::from_toml_str(&text)
    }

    /// Take the data directory from `SLICER_DATA_PATH`, if set.
    pub fn with_env_data_path(self) -> DatasetConfig {
        self.with_data_path_override(std::env::var_os(DATA_PATH_ENV))
    }

    fn with_data_path_override(mut self, value: Option<OsString>) -> DatasetConfig {
        if let Some(path) = value.filter(|v| !v.is_empty()) {
            self.data_path = Some(path.into());
        }
        self
    }

    /// Configured data directory.
    pub fn data_dir(&self) -> Result<&Path> {
        self.data_path
            .as_deref()
            .ok_or(SlicerError::MissingConfig { key: "data_path" })
    }

    pub fn size(&self) -> Vector3<usize> {
        vector![self.dims[0], self.dims[1], self.dims[2]]
    }

    pub fn layout(&self) -> SliceLayout {
        SliceLayout::new(self.slice_count, self.slice_width, self.slice_height)
    }

    pub fn file_name(&self, index: usize) -> String {
        volume_file_name(&self.base_name, index, &self.extension)
    }

    /// Texture memory a loaded store will hold
    pub fn texture_bytes(&self) -> Result<usize> {
        self.layout().arena_bytes(self.volume_count)
    }

    pub fn validate(&self) -> Result<()> {
        if self.volume_count == 0 {
            return Err(SlicerError::InvalidConfig(
                "data set must hold at least one volume".into(),
            ));
        }
        if Volume::voxel_count(self.size())? == 0 {
            return Err(SlicerError::InvalidConfig(format!(
                "volume dimensions {:?} have an empty side",
                self.dims
            )));
        }
        if self.base_name.is_empty() {
            return Err(SlicerError::InvalidConfig("empty base name".into()));
        }
        self.texture_bytes().map(|_| ())
    }
}
