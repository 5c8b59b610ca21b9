use thiserror::Error;

use crate::device::ComputeTarget;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Compute target {0} is not available")]
    TargetUnavailable(ComputeTarget),
    #[error("Expected {expected} input channels, got {actual}")]
    ChannelMismatch {
        expected: usize,
        actual: usize,
    },
    #[error("Scores have {scores} rows but {labels} labels were given")]
    ShapeMismatch {
        scores: usize,
        labels: usize,
    },
    #[error("Label {label} is out of range for {num_classes} classes")]
    LabelOutOfRange {
        label: u32,
        num_classes: usize,
    },
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
    #[error("Unable to load weights: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to parse weights: {0}")]
    Parse(#[from] serde_json::Error),
}
