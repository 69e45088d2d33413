//! Error types for the tracking transform.

use billtrack_ingest::IngestError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),

    /// The label column would overwrite one of the billing input columns.
    #[error("label column '{column}' collides with billing input column")]
    LabelColumnCollision { column: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
