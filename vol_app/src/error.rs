use slicer_lib::SlicerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Slicer(#[from] SlicerError),

    #[error("failed to export image: {0}")]
    Export(#[from] image::ImageError),

    #[error("render thread stopped unexpectedly")]
    RendererGone,
}

pub type Result<T> = std::result::Result<T, AppError>;
