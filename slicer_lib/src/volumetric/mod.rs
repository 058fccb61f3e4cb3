mod store;
mod vol_reader;
mod volume;

pub use store::VolumeStore;
pub use vol_reader::{read_volume, volume_file_name};
pub use volume::Volume;
