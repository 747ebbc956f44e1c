use thiserror::Error;

use crate::config::AggregateOp;

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, TransformError>;

/// Error type returned by ingestion and transform functions.
///
/// Degenerate data (empty input, no usable dimension, all-zero series) is *not* an error: it
/// surfaces as [`crate::chart::TransformResult::valid`] `== false`. The only transform-time error
/// is [`TransformError::NoNumericColumn`].
#[derive(Debug, Error)]
pub enum TransformError {
    /// The sample holds no column whose values parse as numbers, but the aggregate needs one.
    #[error("no numeric column available for aggregate '{op}'")]
    NoNumericColumn { op: AggregateOp },

    /// The input does not follow the row contract (array of flat JSON objects).
    #[error("ingestion error: {message}")]
    Ingestion { message: String },

    /// The batch engine could not start its worker pool.
    #[error("execution error: {message}")]
    Execution { message: String },

    /// Malformed JSON text.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
