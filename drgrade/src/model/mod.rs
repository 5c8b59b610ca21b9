mod classifier;
mod error;
mod inference_scope;
mod linear_probe;
mod loss;

pub use classifier::{Classifier, ModelMode};
pub use error::ClassifierError;
pub use inference_scope::InferenceScope;
pub use linear_probe::{LinearProbe, LinearProbeWeights};
pub use loss::{CrossEntropyLoss, LossFunction};
