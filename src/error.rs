use thiserror::Error;

/// Errors surfaced by the sketchpad core and its export path
#[derive(Error, Debug)]
pub enum SketchError {
    /// A paint target could not be allocated
    #[error("Paint target unavailable: {0}")]
    Resource(String),
    /// A custom sticker entry was empty
    #[error("Sticker symbol must not be empty")]
    EmptySymbol,
    /// A marker thickness that is not a positive number
    #[error("Invalid marker thickness: {0}")]
    InvalidThickness(f32),
    /// A rotation angle that is not a finite number
    #[error("Invalid rotation angle: {0}")]
    InvalidRotation(f32),
    /// An export scale that is not a positive finite number
    #[error("Invalid export scale: {0}")]
    InvalidScale(f32),
    /// The offscreen image could not be encoded
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    /// Writing the exported image failed
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
    /// The browser refused to hand the export to the user
    #[error("Download failed: {0}")]
    Download(String),
    /// The background export worker went away without reporting
    #[error("Export worker stopped unexpectedly")]
    WorkerLost,
}

pub type SketchResult<T> = Result<T, SketchError>;
