use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("no image attached to the submission")]
    MissingInput,

    #[error("color analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("image too large: {size} bytes (max {max})")]
    ImageTooLarge { size: u64, max: u64 },

    #[error("index {index} out of range for batch of {len} images")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no image selected")]
    NoImageSelected,

    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
