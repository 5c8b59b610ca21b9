use tracing::info;

use super::{EvaluationError, ScalarWriter};
use crate::{
    data::{Batch, DataError},
    device::ComputeTarget,
    inference::{BatchInferenceRunner, ExtractionMode, PassOutput, RunnerError},
    metrics::{Average, KappaWeighting, accuracy_score, cohen_kappa_score, f1_score},
    model::{Classifier, LossFunction},
};

pub struct EvaluationConfig<'a> {
    pub device: ComputeTarget,
    pub writer: Option<&'a mut dyn ScalarWriter>,
    /// Called with the running sample count after every batch.
    pub progress: Option<&'a mut dyn FnMut(usize)>,
}

impl<'a> EvaluationConfig<'a> {
    pub fn new(device: ComputeTarget) -> Self {
        Self {
            device,
            writer: None,
            progress: None,
        }
    }

    pub fn writer(
        self,
        writer: &'a mut dyn ScalarWriter,
    ) -> Self {
        Self {
            writer: Some(writer),
            ..self
        }
    }

    pub fn progress(
        self,
        progress: &'a mut dyn FnMut(usize),
    ) -> Self {
        Self {
            progress: Some(progress),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationMetrics {
    pub kappa: f64,
    pub accuracy: f64,
    pub f1: f64,
    pub loss: f32,
}

/// Scores a classifier on a labelled split and reports the result.
///
/// Prints the quadratic-weighted Kappa and, when `config.writer` is set,
/// records `Kappa`, `Accuracy`, `F1` and `val_loss` at `step`.
pub fn evaluate_model<C, B>(
    step: u64,
    batches: B,
    classifier: &mut C,
    config: &mut EvaluationConfig<'_>,
    loss_fn: &dyn LossFunction,
) -> Result<EvaluationMetrics, EvaluationError>
where
    C: Classifier + ?Sized,
    B: IntoIterator<Item = Result<Batch, DataError>>,
{
    let runner = BatchInferenceRunner::new(ExtractionMode::LossAndLabel, config.device).loss_fn(loss_fn);
    let pass = match runner.run(batches, classifier, config.progress.as_deref_mut())? {
        PassOutput::Labels(pass) => pass,
        other => return Err(RunnerError::UnexpectedOutput(other.kind()).into()),
    };

    let metrics = EvaluationMetrics {
        kappa: cohen_kappa_score(&pass.labels, &pass.predictions, KappaWeighting::Quadratic)?,
        accuracy: accuracy_score(&pass.labels, &pass.predictions)?,
        f1: f1_score(&pass.labels, &pass.predictions, Average::Macro)?,
        loss: pass.mean_loss,
    };

    println!("Cohen Kappa Score: {}", metrics.kappa);
    info!(
        step,
        kappa = metrics.kappa,
        accuracy = metrics.accuracy,
        f1 = metrics.f1,
        loss = metrics.loss,
        "evaluation finished"
    );

    if let Some(writer) = config.writer.as_mut() {
        writer.add_scalar("Kappa", metrics.kappa, step)?;
        writer.add_scalar("Accuracy", metrics.accuracy, step)?;
        writer.add_scalar("F1", metrics.f1, step)?;
        writer.add_scalar("val_loss", metrics.loss as f64, step)?;
    }

    Ok(metrics)
}
