use thiserror::Error;

use crate::ir::{ImageId, Semantic};
use crate::validation::ValidationReport;

/// The main error type for ironsegment operations.
#[derive(Debug, Error)]
pub enum IronSegmentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest schema violation: {message}")]
    SchemaViolation { message: String },

    #[error("Unknown image semantic '{tag}'")]
    UnknownSemantic { tag: String },

    #[error("Invalid manifest: {error_count} error(s) and {warning_count} warning(s)")]
    InvalidManifest {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Layout overflow while placing the plane of image {image_id}")]
    LayoutOverflow { image_id: ImageId },

    #[error("Plane size mismatch for image {image_id}: expected {expected} bytes, got {actual}")]
    PlaneSizeMismatch {
        image_id: ImageId,
        expected: u64,
        actual: u64,
    },

    #[error("No plane buffer supplied for declared image {image_id}")]
    MissingPlane { image_id: ImageId },

    #[error("Plane buffer supplied for undeclared image {image_id}")]
    UnexpectedPlane { image_id: ImageId },

    #[error("Stream length mismatch: expected {expected} bytes, got {actual}")]
    TruncatedOrOversizedStream { expected: u64, actual: u64 },

    #[error("Not an ironsegment container: {message}")]
    MagicOrVersionMismatch { message: String },

    #[error("{axis} component {value} is out of range (must be < {limit})")]
    PixelOutOfBounds {
        axis: &'static str,
        value: u32,
        limit: u32,
    },

    #[error("Cannot {operation} on image {image_id} with semantic {semantic}")]
    SemanticMismatch {
        image_id: ImageId,
        semantic: Semantic,
        operation: &'static str,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON report error: {0}")]
    Json(#[from] serde_json::Error),
}
