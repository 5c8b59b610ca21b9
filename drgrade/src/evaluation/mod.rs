mod error;
mod evaluator;
mod writer;

pub use error::{EvaluationError, WriterError};
pub use evaluator::{EvaluationConfig, EvaluationMetrics, evaluate_model};
pub use writer::{JsonlScalarWriter, MemoryScalarWriter, ScalarRecord, ScalarWriter};
