use thiserror::Error;

/// Errors surfaced by the solver core and its corpus loaders.
#[derive(Debug, Error)]
pub enum SolverError {
    /// More golden words were requested than the golden standard holds.
    #[error("cannot sample {requested} words from a golden standard of {available}")]
    InvalidSampleSize { requested: usize, available: usize },
    /// An evaluation was asked to run zero loops.
    #[error("evaluation needs at least one loop")]
    InvalidLoopCount,
    #[error("corpus i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corpus json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
