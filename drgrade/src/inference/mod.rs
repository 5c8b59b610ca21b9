mod error;
mod extraction_mode;
mod pass;
mod runner;
pub mod softmax;

pub use error::RunnerError;
pub use extraction_mode::{CONFIDENCE_TEMPERATURE, ExtractionMode, PROBABILITY_TEMPERATURE};
pub use pass::{ConfidencePass, LabelPass, PassOutput, ProbabilityPass};
pub use runner::{
    BatchInferenceRunner, create_predictions, create_predictions_probability, create_predictions_with_entropy,
};
