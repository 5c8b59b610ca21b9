use super::RunnerError;

/// Softmax temperature used when extracting per-sample confidence.
pub const CONFIDENCE_TEMPERATURE: f32 = 1.373;
/// Softmax temperature used when extracting full probability vectors.
pub const PROBABILITY_TEMPERATURE: f32 = 1.15;

/// What a pass keeps from each batch of raw scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionMode {
    /// Argmax of raw scores plus the batch loss.
    LossAndLabel,
    /// Max of `softmax(scores / temperature)` and its index.
    Confidence {
        temperature: f32,
    },
    /// The full `softmax(scores / temperature)` row.
    Probability {
        temperature: f32,
    },
}

impl ExtractionMode {
    pub fn confidence() -> Self {
        ExtractionMode::Confidence {
            temperature: CONFIDENCE_TEMPERATURE,
        }
    }

    pub fn probability() -> Self {
        ExtractionMode::Probability {
            temperature: PROBABILITY_TEMPERATURE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExtractionMode::LossAndLabel => "loss-and-label",
            ExtractionMode::Confidence {
                ..
            } => "confidence",
            ExtractionMode::Probability {
                ..
            } => "probability",
        }
    }

    pub fn validate(&self) -> Result<(), RunnerError> {
        match *self {
            ExtractionMode::LossAndLabel => Ok(()),
            ExtractionMode::Confidence {
                temperature,
            }
            | ExtractionMode::Probability {
                temperature,
            } => {
                if temperature.is_finite() && temperature > 0.0 {
                    Ok(())
                } else {
                    Err(RunnerError::InvalidTemperature(temperature))
                }
            },
        }
    }
}
