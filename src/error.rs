//! Error types shared by the GA engine and the session layer.

use crate::ga::PointId;

/// Errors raised while building or running a TSP evolution.
///
/// All variants indicate malformed input; none of them are retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TspError {
    /// A route references a point id that is not in the point set.
    #[error("PointNotFound: id={id}")]
    PointNotFound { id: PointId },

    /// Two input points share the same id.
    #[error("DuplicatePoint: id={id}")]
    DuplicatePoint { id: PointId },

    /// A parameter is out of range.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;
