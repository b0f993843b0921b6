use thiserror::Error;

/// Error type used by operations in this crate.
///
/// Sizing and configuration problems are detected before any computation
/// starts. Numerical degeneracies inside a running calculation (e.g. an
/// all-zero sampling distribution caused by duplicate samples) are handled
/// with local fallbacks and never surface as errors; a run that hits the
/// iteration cap reports `converged = false` instead of failing.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The requested cluster count does not fit the sample set (k < 1 or k > sample count).
    #[error("invalid cluster count: {0}")]
    Sizing(String),

    /// A configuration option is out of its valid range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The sample buffer does not match the declared shape.
    #[error("dimension mismatch: {0}")]
    Dimensions(String),
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
