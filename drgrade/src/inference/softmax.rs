//! Row-wise reductions over `N x num_classes` score matrices.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use num_traits::{NumCast, ToPrimitive};

/// Index of the largest value; the first index wins ties and NaNs are skipped.
pub fn argmax<T: Copy + ToPrimitive>(input: &[T]) -> usize {
    input
        .iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best_index, best_value), (index, &value)| {
            let value_f32: f32 = NumCast::from(value).unwrap_or(f32::NEG_INFINITY);
            if value_f32 > best_value {
                (index, value_f32)
            } else {
                (best_index, best_value)
            }
        })
        .0
}

/// [`argmax`] over a row in logical order, whatever its strides.
pub fn row_argmax<T: Copy + ToPrimitive>(row: ArrayView1<T>) -> usize {
    match row.as_slice() {
        Some(slice) => argmax(slice),
        None => {
            let data: Vec<T> = row.iter().cloned().collect();
            argmax(&data)
        },
    }
}

/// `softmax(scores / temperature)` applied to every row.
pub fn softmax_with_temperature(
    scores: ArrayView2<f32>,
    temperature: f32,
) -> Array2<f32> {
    let mut probabilities = scores.mapv(|score| score / temperature);
    for mut row in probabilities.axis_iter_mut(Axis(0)) {
        let max_value = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        row.mapv_inplace(|value| (value - max_value).exp());
        let total = row.sum();
        row.mapv_inplace(|value| value / total);
    }
    probabilities
}

/// Shannon entropy in nats of a probability row.
pub fn entropy(probabilities: ArrayView1<f32>) -> f32 {
    -probabilities.iter().filter(|&&probability| probability > 0.0).map(|&probability| probability * probability.ln()).sum::<f32>()
}
