//! Error types of the slicing pipeline.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal errors of configuration and volume loading.
///
/// Classification and resampling are total, nothing past a successful load
/// can fail.
#[derive(Error, Debug)]
pub enum SlicerError {
    /// A required configuration value is not set.
    #[error("configuration key `{key}` is undefined")]
    MissingConfig { key: &'static str },

    /// Configuration values that cannot describe a data set.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed TOML configuration.
    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("cannot read configuration file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// A volume data file could not be opened.
    #[error("failed to open data file {file:?} in path {dir:?}: {source}")]
    OpenFile {
        file: String,
        dir: PathBuf,
        source: io::Error,
    },

    /// A volume data file holds fewer bytes than one volume.
    #[error("data file {file:?} in path {dir:?} holds {actual} bytes, expected {expected}")]
    ShortRead {
        file: String,
        dir: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// Sample buffer does not match the volume dimensions.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Any other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SlicerError>;
