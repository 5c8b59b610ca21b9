use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Got {labels} labels and {predictions} predictions")]
    LengthMismatch {
        labels: usize,
        predictions: usize,
    },
    #[error("Cannot score an empty set of predictions")]
    Empty,
}
