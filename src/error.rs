use thiserror::Error;

/// Errors that can occur while building the sample store or running a clustering.
///
/// All of these are detected before the first iteration starts. A run that hits the
/// iteration ceiling is not an error, see [`crate::Termination`].
#[derive(Error, Debug)]
pub enum KMeansError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("sample buffer has {got} values, expected {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("inconsistent number of features on line {line}: expected {expected}, got {got}")]
    InconsistentRow { line: usize, expected: usize, got: usize },

    #[error("invalid feature {token:?} on line {line}")]
    InvalidFeature { line: usize, token: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, KMeansError>;
