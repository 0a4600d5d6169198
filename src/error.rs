use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a grid or estimating its correction angle
#[derive(Debug, Error)]
pub enum SkewError {
    #[error("source not found: {0:?}")]
    SourceNotFound(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no edge points to fit")]
    NoData,

    #[error("coordinate sequences differ in length ({rows} rows, {cols} cols)")]
    LengthMismatch { rows: usize, cols: usize },

    /// All edge points lie on a single row, so the fit has no x-variance
    #[error("edge points have zero row variance")]
    DegenerateRows,

    #[error("slope {0} has no defined correction angle")]
    UndefinedAngle(f64),
}

pub type Result<T> = std::result::Result<T, SkewError>;
