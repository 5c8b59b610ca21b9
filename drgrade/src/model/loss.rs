use ndarray::{ArrayView1, ArrayView2};

use super::ClassifierError;

pub trait LossFunction {
    /// Scalar loss of raw `N x num_classes` scores against `N` labels.
    fn loss(
        &self,
        scores: ArrayView2<f32>,
        labels: ArrayView1<u32>,
    ) -> Result<f32, ClassifierError>;
}

/// Mean softmax cross-entropy over the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

impl LossFunction for CrossEntropyLoss {
    fn loss(
        &self,
        scores: ArrayView2<f32>,
        labels: ArrayView1<u32>,
    ) -> Result<f32, ClassifierError> {
        if scores.nrows() != labels.len() {
            return Err(ClassifierError::ShapeMismatch {
                scores: scores.nrows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Ok(0.0);
        }

        let num_classes = scores.ncols();
        let mut total = 0.0_f64;
        for (row, &label) in scores.rows().into_iter().zip(labels.iter()) {
            if label as usize >= num_classes {
                return Err(ClassifierError::LabelOutOfRange {
                    label,
                    num_classes,
                });
            }
            let max_score = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            let log_sum_exp = max_score as f64 + row.iter().map(|&score| ((score - max_score) as f64).exp()).sum::<f64>().ln();
            total += log_sum_exp - row[label as usize] as f64;
        }

        Ok((total / labels.len() as f64) as f32)
    }
}
