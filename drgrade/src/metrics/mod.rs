mod classification;
mod confusion_matrix;
mod error;
mod kappa;

pub use classification::{Average, accuracy_score, f1_score, per_class_f1};
pub use confusion_matrix::ConfusionMatrix;
pub use error::MetricsError;
pub use kappa::{KappaWeighting, cohen_kappa_score};
