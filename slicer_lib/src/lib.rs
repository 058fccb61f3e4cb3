//! Slice based volume rendering core.
//!
//! Raw 8-bit density volumes are classified through a transfer function and
//! resampled into three axis aligned stacks of RGBA slices. At draw time the
//! stack most aligned with the viewer is picked and its slices are handed to
//! a renderer in back-to-front order.
//!
//! Typical use:
//! ```no_run
//! use slicer_lib::{config::DatasetConfig, volumetric::VolumeStore};
//! use nalgebra::vector;
//!
//! let config = DatasetConfig::default().with_env_data_path();
//! let store = VolumeStore::from_config(&config).expect("cannot load volumes");
//! let plan = store.frame_plan(0, &vector![0.0, 0.0, 1.0]).unwrap();
//! for placed in plan.slices {
//!     // upload `placed.image.as_bytes()` and draw a quad at `placed.depth`
//! }
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod session;
pub mod slices;
pub mod test_helpers;
pub mod transfer_functions;
pub mod volumetric;

pub use error::{Result, SlicerError};
pub use transfer_functions::TransferFunction;
