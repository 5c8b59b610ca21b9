#![allow(dead_code)]
use std::cell::Cell;

use drgrade::{
    data::{Batch, DataError},
    device::ComputeTarget,
    model::{Classifier, ClassifierError, LossFunction, ModelMode},
};
use ndarray::{Array1, Array2, Array4, ArrayView1, ArrayView2, ArrayView4, Axis, ShapeBuilder, s};

pub const NUM_CLASSES: usize = 5;

/// Memory layout of the score matrices a classifier hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLayout {
    RowMajor,
    ColumnMajor,
    ReversedClasses,
}

impl ScoreLayout {
    /// Same logical values as `scores`, stored in this layout.
    pub fn arrange(
        &self,
        scores: Array2<f32>,
    ) -> Array2<f32> {
        match self {
            ScoreLayout::RowMajor => scores,
            ScoreLayout::ColumnMajor => {
                let mut arranged = Array2::zeros(scores.raw_dim().f());
                arranged.assign(&scores);
                arranged
            },
            ScoreLayout::ReversedClasses => {
                let mut arranged = scores.slice(s![.., ..;-1]).to_owned();
                arranged.invert_axis(Axis(1));
                arranged
            },
        }
    }
}

/// Scores each image by reading its intended class from the first pixel.
pub struct OracleClassifier {
    pub mode: ModelMode,
    pub scale: f32,
    pub layout: ScoreLayout,
    pub fail_on_call: Option<usize>,
    pub modes_seen: Cell<Vec<ModelMode>>,
    calls: Cell<usize>,
}

impl OracleClassifier {
    pub fn new() -> Self {
        Self {
            mode: ModelMode::Training,
            scale: 4.0,
            layout: ScoreLayout::RowMajor,
            fail_on_call: None,
            modes_seen: Cell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    pub fn with_layout(layout: ScoreLayout) -> Self {
        Self {
            layout,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Classifier for OracleClassifier {
    fn num_classes(&self) -> usize {
        NUM_CLASSES
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
        _target: ComputeTarget,
    ) -> Result<Array2<f32>, ClassifierError> {
        let call = self.calls.get();
        self.calls.set(call + 1);

        let mut seen = self.modes_seen.take();
        seen.push(self.mode);
        self.modes_seen.set(seen);

        if self.fail_on_call == Some(call) {
            return Err(ClassifierError::TargetUnavailable(ComputeTarget::Gpu(7)));
        }

        let mut scores = Array2::<f32>::zeros((images.len_of(Axis(0)), NUM_CLASSES));
        for (index, image) in images.axis_iter(Axis(0)).enumerate() {
            let class = image[[0, 0, 0]] as usize;
            scores[[index, class]] = self.scale;
        }
        Ok(self.layout.arrange(scores))
    }
}

/// Returns the queued losses one batch at a time.
pub struct QueuedLoss {
    losses: Vec<f32>,
    next: Cell<usize>,
}

impl QueuedLoss {
    pub fn new(losses: Vec<f32>) -> Self {
        Self {
            losses,
            next: Cell::new(0),
        }
    }
}

impl LossFunction for QueuedLoss {
    fn loss(
        &self,
        _scores: ArrayView2<f32>,
        _labels: ArrayView1<u32>,
    ) -> Result<f32, ClassifierError> {
        let index = self.next.get();
        self.next.set(index + 1);
        Ok(self.losses[index])
    }
}

/// A batch whose images steer [`OracleClassifier`] towards `predicted`.
pub fn oracle_batch(
    predicted: &[u32],
    labels: &[u32],
    first_id: usize,
) -> Batch {
    let mut images = Array4::<f32>::zeros((predicted.len(), 1, 2, 2));
    for (mut image, &class) in images.axis_iter_mut(Axis(0)).zip(predicted.iter()) {
        image.fill(class as f32);
    }
    let identifiers = (first_id..first_id + predicted.len()).map(|index| format!("img_{index:04}")).collect();
    Batch::new(images, Array1::from(labels.to_vec()), identifiers).unwrap()
}

pub fn ok_batches(batches: Vec<Batch>) -> Vec<Result<Batch, DataError>> {
    batches.into_iter().map(Ok).collect()
}
