use std::time::Instant;

use ndarray::{Array2, Axis};
use tracing::{debug, info};

use super::{
    ConfidencePass, ExtractionMode, LabelPass, PassOutput, ProbabilityPass, RunnerError,
    softmax::{entropy, row_argmax, softmax_with_temperature},
};
use crate::{
    data::{Batch, DataError},
    device::ComputeTarget,
    model::{Classifier, InferenceScope, LossFunction},
};

/// Runs a trained classifier over a sequence of batches and gathers
/// per-sample results in iteration order.
pub struct BatchInferenceRunner<'a> {
    mode: ExtractionMode,
    target: ComputeTarget,
    loss_fn: Option<&'a dyn LossFunction>,
}

impl<'a> BatchInferenceRunner<'a> {
    pub fn new(
        mode: ExtractionMode,
        target: ComputeTarget,
    ) -> Self {
        Self {
            mode,
            target,
            loss_fn: None,
        }
    }

    pub fn loss_fn(
        self,
        loss_fn: &'a dyn LossFunction,
    ) -> Self {
        Self {
            loss_fn: Some(loss_fn),
            ..self
        }
    }

    pub fn mode(&self) -> ExtractionMode {
        self.mode
    }

    pub fn target(&self) -> ComputeTarget {
        self.target
    }

    /// Consumes `batches` once, calling `progress` with the running sample
    /// count after every batch.
    ///
    /// The classifier is held in inference mode for the duration of the pass
    /// and is back in training mode when this returns, on every path.
    pub fn run<C, B, F>(
        &self,
        batches: B,
        classifier: &mut C,
        mut progress: Option<F>,
    ) -> Result<PassOutput, RunnerError>
    where
        C: Classifier + ?Sized,
        B: IntoIterator<Item = Result<Batch, DataError>>,
        F: FnMut(usize),
    {
        self.mode.validate()?;
        let extraction = match (self.mode, self.loss_fn) {
            (ExtractionMode::LossAndLabel, Some(loss_fn)) => Extraction::Labels(loss_fn),
            (ExtractionMode::LossAndLabel, None) => return Err(RunnerError::MissingLossFunction),
            (
                ExtractionMode::Confidence {
                    temperature,
                },
                _,
            ) => Extraction::Confidence(temperature),
            (
                ExtractionMode::Probability {
                    temperature,
                },
                _,
            ) => Extraction::Probability(temperature),
        };

        let run_start = Instant::now();
        let scope = InferenceScope::enter(classifier);
        if !scope.supports(self.target) {
            return Err(RunnerError::UnsupportedTarget(self.target));
        }

        let mut accumulator = PassAccumulator::new(scope.num_classes());
        let mut batches_count = 0_usize;
        for batch in batches {
            let batch = batch?;
            batch.validate()?;

            let scores = scope.forward(batch.images.view(), self.target)?;
            accumulator.check_scores(&scores, batch.len())?;

            match extraction {
                Extraction::Labels(loss_fn) => {
                    accumulator.losses.push(loss_fn.loss(scores.view(), batch.labels.view())?);
                    accumulator.predictions.extend(scores.rows().into_iter().map(|row| row_argmax(row) as u32));
                },
                Extraction::Confidence(temperature) => {
                    let probabilities = softmax_with_temperature(scores.view(), temperature);
                    for row in probabilities.rows() {
                        let index = row_argmax(row);
                        accumulator.predictions.push(index as u32);
                        accumulator.confidences.push(row[index]);
                        accumulator.entropies.push(entropy(row));
                    }
                },
                Extraction::Probability(temperature) => {
                    let probabilities = softmax_with_temperature(scores.view(), temperature);
                    accumulator.probabilities.extend(probabilities.iter());
                },
            }

            accumulator.labels.extend(batch.labels.iter());
            accumulator.identifiers.extend(batch.identifiers);
            batches_count += 1;

            debug!(batch = batches_count, samples = accumulator.identifiers.len(), "processed batch");
            if let Some(progress) = progress.as_mut() {
                progress(accumulator.identifiers.len());
            }
        }
        drop(scope);

        info!(
            mode = self.mode.name(),
            target = %self.target,
            batches = batches_count,
            samples = accumulator.identifiers.len(),
            duration = run_start.elapsed().as_secs_f64(),
            "inference pass finished"
        );

        accumulator.finish(self.mode)
    }
}

/// The mode with its loss function bound, fixed for one pass.
#[derive(Clone, Copy)]
enum Extraction<'l> {
    Labels(&'l dyn LossFunction),
    Confidence(f32),
    Probability(f32),
}

struct PassAccumulator {
    num_classes: usize,
    predictions: Vec<u32>,
    labels: Vec<u32>,
    identifiers: Vec<String>,
    losses: Vec<f32>,
    confidences: Vec<f32>,
    entropies: Vec<f32>,
    probabilities: Vec<f32>,
}

impl PassAccumulator {
    fn new(num_classes: usize) -> Self {
        Self {
            num_classes,
            predictions: Vec::new(),
            labels: Vec::new(),
            identifiers: Vec::new(),
            losses: Vec::new(),
            confidences: Vec::new(),
            entropies: Vec::new(),
            probabilities: Vec::new(),
        }
    }

    fn check_scores(
        &self,
        scores: &Array2<f32>,
        samples: usize,
    ) -> Result<(), RunnerError> {
        if scores.len_of(Axis(0)) != samples {
            return Err(RunnerError::ShapeMismatch {
                scores: scores.len_of(Axis(0)),
                samples,
            });
        }
        if scores.len_of(Axis(1)) != self.num_classes {
            return Err(RunnerError::ClassCountMismatch {
                expected: self.num_classes,
                actual: scores.len_of(Axis(1)),
            });
        }
        Ok(())
    }

    fn finish(
        self,
        mode: ExtractionMode,
    ) -> Result<PassOutput, RunnerError> {
        if self.identifiers.is_empty() {
            return Err(RunnerError::EmptyPass);
        }

        let output = match mode {
            ExtractionMode::LossAndLabel => {
                // Mean over batches, not samples: a short final batch weighs as much as a full one.
                let mean_loss = self.losses.iter().sum::<f32>() / self.losses.len() as f32;
                PassOutput::Labels(LabelPass {
                    predictions: self.predictions,
                    labels: self.labels,
                    identifiers: self.identifiers,
                    mean_loss,
                })
            },
            ExtractionMode::Confidence {
                ..
            } => PassOutput::Confidence(ConfidencePass {
                predictions: self.predictions,
                labels: self.labels,
                confidences: self.confidences,
                entropies: self.entropies,
                identifiers: self.identifiers,
            }),
            ExtractionMode::Probability {
                ..
            } => {
                let probabilities =
                    Array2::from_shape_vec((self.identifiers.len(), self.num_classes), self.probabilities)
                        .map_err(|error| RunnerError::Data(DataError::Collate(error)))?;
                PassOutput::Probabilities(ProbabilityPass {
                    probabilities,
                    labels: self.labels,
                    identifiers: self.identifiers,
                })
            },
        };
        Ok(output)
    }
}

/// Argmax predictions, labels, identifiers and mean batch loss.
pub fn create_predictions<C, B>(
    batches: B,
    classifier: &mut C,
    loss_fn: &dyn LossFunction,
    target: ComputeTarget,
) -> Result<LabelPass, RunnerError>
where
    C: Classifier + ?Sized,
    B: IntoIterator<Item = Result<Batch, DataError>>,
{
    let runner = BatchInferenceRunner::new(ExtractionMode::LossAndLabel, target).loss_fn(loss_fn);
    match runner.run(batches, classifier, None::<fn(usize)>)? {
        PassOutput::Labels(pass) => Ok(pass),
        other => Err(RunnerError::UnexpectedOutput(other.kind())),
    }
}

/// Predictions with temperature-scaled confidence and entropy.
pub fn create_predictions_with_entropy<C, B>(
    batches: B,
    classifier: &mut C,
    target: ComputeTarget,
) -> Result<ConfidencePass, RunnerError>
where
    C: Classifier + ?Sized,
    B: IntoIterator<Item = Result<Batch, DataError>>,
{
    let runner = BatchInferenceRunner::new(ExtractionMode::confidence(), target);
    match runner.run(batches, classifier, None::<fn(usize)>)? {
        PassOutput::Confidence(pass) => Ok(pass),
        other => Err(RunnerError::UnexpectedOutput(other.kind())),
    }
}

/// Full temperature-scaled probability rows.
pub fn create_predictions_probability<C, B>(
    batches: B,
    classifier: &mut C,
    target: ComputeTarget,
) -> Result<ProbabilityPass, RunnerError>
where
    C: Classifier + ?Sized,
    B: IntoIterator<Item = Result<Batch, DataError>>,
{
    let runner = BatchInferenceRunner::new(ExtractionMode::probability(), target);
    match runner.run(batches, classifier, None::<fn(usize)>)? {
        PassOutput::Probabilities(pass) => Ok(pass),
        other => Err(RunnerError::UnexpectedOutput(other.kind())),
    }
}
