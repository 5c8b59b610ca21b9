use ndarray::Array2;

use super::{ConfusionMatrix, MetricsError};

/// Disagreement weighting for Cohen's Kappa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KappaWeighting {
    None,
    Linear,
    Quadratic,
}

impl KappaWeighting {
    fn weight(
        &self,
        i: usize,
        j: usize,
    ) -> f64 {
        let distance = i.abs_diff(j) as f64;
        match self {
            KappaWeighting::None => {
                if i == j {
                    0.0
                } else {
                    1.0
                }
            },
            KappaWeighting::Linear => distance,
            KappaWeighting::Quadratic => distance * distance,
        }
    }
}

/// Chance-corrected agreement between `labels` and `predictions`.
///
/// Weights are taken over class positions in the sorted union of observed
/// classes. Returns NaN when the expected disagreement is zero, e.g. when both
/// sequences contain a single class.
pub fn cohen_kappa_score(
    labels: &[u32],
    predictions: &[u32],
    weighting: KappaWeighting,
) -> Result<f64, MetricsError> {
    let matrix = ConfusionMatrix::new(labels, predictions)?;
    let counts = matrix.counts().mapv(|count| count as f64);
    let num_classes = matrix.num_classes();

    let total = counts.sum();
    let predicted = matrix.predicted();
    let support = matrix.support();
    let expected = Array2::from_shape_fn((num_classes, num_classes), |(i, j)| {
        support[i] as f64 * predicted[j] as f64 / total
    });
    let weights = Array2::from_shape_fn((num_classes, num_classes), |(i, j)| weighting.weight(i, j));

    let observed_disagreement = (&weights * &counts).sum();
    let expected_disagreement = (&weights * &expected).sum();
    if expected_disagreement == 0.0 {
        return Ok(f64::NAN);
    }

    Ok(1.0 - observed_disagreement / expected_disagreement)
}
