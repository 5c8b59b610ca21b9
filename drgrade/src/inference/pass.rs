use ndarray::Array2;

/// Output of a loss-and-label pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPass {
    pub predictions: Vec<u32>,
    pub labels: Vec<u32>,
    pub identifiers: Vec<String>,
    /// Unweighted mean of the per-batch losses.
    pub mean_loss: f32,
}

/// Output of a confidence pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidencePass {
    pub predictions: Vec<u32>,
    pub labels: Vec<u32>,
    pub confidences: Vec<f32>,
    pub entropies: Vec<f32>,
    pub identifiers: Vec<String>,
}

/// Output of a probability pass; `probabilities` is `N x num_classes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityPass {
    pub probabilities: Array2<f32>,
    pub labels: Vec<u32>,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassOutput {
    Labels(LabelPass),
    Confidence(ConfidencePass),
    Probabilities(ProbabilityPass),
}

impl PassOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            PassOutput::Labels(_) => "loss-and-label",
            PassOutput::Confidence(_) => "confidence",
            PassOutput::Probabilities(_) => "probability",
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers().is_empty()
    }

    pub fn labels(&self) -> &[u32] {
        match self {
            PassOutput::Labels(pass) => &pass.labels,
            PassOutput::Confidence(pass) => &pass.labels,
            PassOutput::Probabilities(pass) => &pass.labels,
        }
    }

    pub fn identifiers(&self) -> &[String] {
        match self {
            PassOutput::Labels(pass) => &pass.identifiers,
            PassOutput::Confidence(pass) => &pass.identifiers,
            PassOutput::Probabilities(pass) => &pass.identifiers,
        }
    }
}
