//! Grader error types.

use thiserror::Error;

/// Result type for grader operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while grading.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed dataset file.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// The dataset holds no images.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Image and label counts differ.
    #[error("Dataset has {images} images but {labels} labels")]
    LengthMismatch {
        /// Number of images.
        images: usize,
        /// Number of labels.
        labels: usize,
    },

    /// A label other than 0 or 1.
    #[error("Invalid label {value} at index {index}, expected 0 or 1")]
    InvalidLabel {
        /// Position in the label array.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// An image smaller than the encoding grid.
    #[error("Image of shape {got:?} is smaller than the {grid:?} encoding grid")]
    ImageTooSmall {
        /// Image shape.
        got: (usize, usize),
        /// Encoding grid.
        grid: (usize, usize),
    },

    /// Two images that should have the same shape do not.
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: (usize, usize),
        /// Actual shape.
        got: (usize, usize),
    },

    /// A histogram entry that the encoding layout cannot produce.
    #[error("Basis state {index} is outside the {limit} states of the encoding register")]
    BasisStateOutOfRange {
        /// Offending basis index.
        index: u64,
        /// Number of basis states of the register.
        limit: u64,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Export error: {0}")]
    Export(String),

    /// Circuit error.
    #[error(transparent)]
    Ir(#[from] qimg_ir::IrError),

    /// Simulation error.
    #[error(transparent)]
    Hal(#[from] qimg_hal::HalError),
}

impl From<serde_json::Error> for EvalError {
    fn from(e: serde_json::Error) -> Self {
        EvalError::Export(e.to_string())
    }
}
