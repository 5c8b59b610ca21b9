//! Prelude module containing commonly used types from the drgrade crate.
//!
//! This module can be imported with `use drgrade::prelude::*;` to bring the
//! most frequently used types into scope.

pub use crate::{
    VERSION,
    config::{DatasetPaths, DrgradeConfig, LoaderConfig, ShuffleSeed, TrainConfig},
    data::{Batch, DataLoader, Dataset, ImageTransform, RetinopathyDataset, Sample, load_datasets, test_loader},
    device::ComputeTarget,
    evaluation::{EvaluationConfig, EvaluationMetrics, JsonlScalarWriter, ScalarWriter, evaluate_model},
    inference::{
        BatchInferenceRunner, ConfidencePass, ExtractionMode, LabelPass, PassOutput, ProbabilityPass,
        create_predictions, create_predictions_probability, create_predictions_with_entropy,
    },
    metrics::{Average, KappaWeighting, accuracy_score, cohen_kappa_score, f1_score},
    model::{Classifier, CrossEntropyLoss, InferenceScope, LinearProbe, LossFunction, ModelMode},
};
