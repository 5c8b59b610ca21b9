use thiserror::Error;

use crate::{data::DataError, device::ComputeTarget, model::ClassifierError};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Classifier does not support compute target {0}")]
    UnsupportedTarget(ComputeTarget),
    #[error("Classifier produced {scores} score rows for a batch of {samples}")]
    ShapeMismatch {
        scores: usize,
        samples: usize,
    },
    #[error("Classifier produced {actual} classes, expected {expected}")]
    ClassCountMismatch {
        expected: usize,
        actual: usize,
    },
    #[error("Temperature must be finite and positive, got {0}")]
    InvalidTemperature(f32),
    #[error("Loss-and-label extraction requires a loss function")]
    MissingLossFunction,
    #[error("Inference pass saw no samples")]
    EmptyPass,
    #[error("Pass produced {0} output")]
    UnexpectedOutput(&'static str),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}
