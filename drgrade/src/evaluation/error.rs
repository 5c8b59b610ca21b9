use thiserror::Error;

use crate::{inference::RunnerError, metrics::MetricsError};

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("Unable to write scalar: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to encode scalar: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Writer(#[from] WriterError),
}
