use std::collections::BTreeSet;

use ndarray::{Array2, ArrayView2, Axis};

use super::MetricsError;

/// Counts indexed `[true class position, predicted class position]`.
///
/// Classes are the sorted union of values seen in either sequence, so a grade
/// that never occurs is simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    classes: Vec<u32>,
    counts: Array2<u64>,
}

impl ConfusionMatrix {
    pub fn new(
        labels: &[u32],
        predictions: &[u32],
    ) -> Result<Self, MetricsError> {
        if labels.len() != predictions.len() {
            return Err(MetricsError::LengthMismatch {
                labels: labels.len(),
                predictions: predictions.len(),
            });
        }
        if labels.is_empty() {
            return Err(MetricsError::Empty);
        }

        let classes: Vec<u32> =
            labels.iter().chain(predictions.iter()).cloned().collect::<BTreeSet<u32>>().into_iter().collect();
        let position = |class: u32| classes.binary_search(&class).unwrap_or_default();

        let mut counts = Array2::<u64>::zeros((classes.len(), classes.len()));
        for (&label, &prediction) in labels.iter().zip(predictions.iter()) {
            counts[[position(label), position(prediction)]] += 1;
        }

        Ok(Self {
            classes,
            counts,
        })
    }

    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    pub fn counts(&self) -> ArrayView2<u64> {
        self.counts.view()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    pub fn correct(&self) -> u64 {
        self.counts.diag().sum()
    }

    /// Occurrences of each class among the labels.
    pub fn support(&self) -> Vec<u64> {
        self.counts.sum_axis(Axis(1)).to_vec()
    }

    /// Occurrences of each class among the predictions.
    pub fn predicted(&self) -> Vec<u64> {
        self.counts.sum_axis(Axis(0)).to_vec()
    }
}
