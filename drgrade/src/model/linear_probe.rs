use std::{fs::File, io::BufReader, path::Path};

use ndarray::{Array1, Array2, ArrayView4, Axis};
use serde::{Deserialize, Serialize};

use super::{Classifier, ClassifierError, ModelMode};
use crate::device::ComputeTarget;

/// On-disk form of a [`LinearProbe`]: one weight row per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearProbeWeights {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Global-average-pooled linear head over image channels.
///
/// A small CPU reference classifier; real backbones plug in through the
/// [`Classifier`] trait.
#[derive(Debug, Clone)]
pub struct LinearProbe {
    weights: Array2<f32>,
    bias: Array1<f32>,
    mode: ModelMode,
}

impl LinearProbe {
    pub fn new(
        weights: Array2<f32>,
        bias: Array1<f32>,
    ) -> Result<Self, ClassifierError> {
        if weights.nrows() == 0 || weights.ncols() == 0 {
            return Err(ClassifierError::InvalidWeights("weight matrix is empty".to_string()));
        }
        if weights.nrows() != bias.len() {
            return Err(ClassifierError::InvalidWeights(format!(
                "{} weight rows but {} biases",
                weights.nrows(),
                bias.len()
            )));
        }

        Ok(Self {
            weights,
            bias,
            mode: ModelMode::Training,
        })
    }

    pub fn from_weights(weights: LinearProbeWeights) -> Result<Self, ClassifierError> {
        let num_classes = weights.weights.len();
        let num_channels = weights.weights.first().map(Vec::len).unwrap_or(0);
        if weights.weights.iter().any(|row| row.len() != num_channels) {
            return Err(ClassifierError::InvalidWeights("weight rows differ in length".to_string()));
        }

        let flat: Vec<f32> = weights.weights.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((num_classes, num_channels), flat)
            .map_err(|error| ClassifierError::InvalidWeights(error.to_string()))?;
        Self::new(matrix, Array1::from(weights.bias))
    }

    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let file = File::open(path)?;
        let weights: LinearProbeWeights = serde_json::from_reader(BufReader::new(file))?;
        Self::from_weights(weights)
    }

    pub fn num_channels(&self) -> usize {
        self.weights.ncols()
    }
}

impl Classifier for LinearProbe {
    fn num_classes(&self) -> usize {
        self.weights.nrows()
    }

    fn mode(&self) -> ModelMode {
        self.mode
    }

    fn set_mode(
        &mut self,
        mode: ModelMode,
    ) {
        self.mode = mode;
    }

    fn forward(
        &self,
        images: ArrayView4<f32>,
        target: ComputeTarget,
    ) -> Result<Array2<f32>, ClassifierError> {
        if !self.supports(target) {
            return Err(ClassifierError::TargetUnavailable(target));
        }

        let channels = images.len_of(Axis(1));
        if channels != self.num_channels() {
            return Err(ClassifierError::ChannelMismatch {
                expected: self.num_channels(),
                actual: channels,
            });
        }

        let pooled = images
            .mean_axis(Axis(3))
            .and_then(|rows| rows.mean_axis(Axis(2)))
            .ok_or_else(|| ClassifierError::InvalidWeights("input images have no pixels".to_string()))?;

        Ok(pooled.dot(&self.weights.t()) + &self.bias)
    }
}
