use super::{ConfusionMatrix, MetricsError};

/// How per-class F1 scores are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Average {
    /// Unweighted mean over classes.
    Macro,
    /// F1 of the pooled true/false positive counts.
    Micro,
    /// Mean over classes weighted by label support.
    Weighted,
}

/// Fraction of exact matches.
pub fn accuracy_score(
    labels: &[u32],
    predictions: &[u32],
) -> Result<f64, MetricsError> {
    let matrix = ConfusionMatrix::new(labels, predictions)?;
    Ok(matrix.correct() as f64 / matrix.total() as f64)
}

/// F1 of every class in `matrix.classes()` order; a class with no true or
/// predicted positives scores 0.
pub fn per_class_f1(matrix: &ConfusionMatrix) -> Vec<f64> {
    let counts = matrix.counts();
    let support = matrix.support();
    let predicted = matrix.predicted();

    (0..matrix.num_classes())
        .map(|class| {
            let true_positives = counts[[class, class]];
            let false_negatives = support[class] - true_positives;
            let false_positives = predicted[class] - true_positives;
            f1(true_positives, false_positives, false_negatives)
        })
        .collect()
}

pub fn f1_score(
    labels: &[u32],
    predictions: &[u32],
    average: Average,
) -> Result<f64, MetricsError> {
    let matrix = ConfusionMatrix::new(labels, predictions)?;

    let score = match average {
        Average::Macro => {
            let scores = per_class_f1(&matrix);
            scores.iter().sum::<f64>() / scores.len() as f64
        },
        Average::Micro => {
            let true_positives = matrix.correct();
            let errors = matrix.total() - true_positives;
            f1(true_positives, errors, errors)
        },
        Average::Weighted => {
            let support = matrix.support();
            per_class_f1(&matrix).iter().zip(support.iter()).map(|(score, &count)| score * count as f64).sum::<f64>()
                / matrix.total() as f64
        },
    };
    Ok(score)
}

fn f1(
    true_positives: u64,
    false_positives: u64,
    false_negatives: u64,
) -> f64 {
    let denominator = 2 * true_positives + false_positives + false_negatives;
    if denominator == 0 {
        return 0.0;
    }
    2.0 * true_positives as f64 / denominator as f64
}
