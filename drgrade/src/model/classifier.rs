use ndarray::{Array2, ArrayView4};

use super::ClassifierError;
use crate::device::ComputeTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMode {
    Training,
    Inference,
}

/// A trained image classifier mapping an `N x C x H x W` batch to raw
/// `N x num_classes` scores.
pub trait Classifier {
    fn num_classes(&self) -> usize;

    fn mode(&self) -> ModelMode;

    fn set_mode(
        &mut self,
        mode: ModelMode,
    );

    fn supports(
        &self,
        target: ComputeTarget,
    ) -> bool {
        target.is_cpu()
    }

    fn forward(
        &self,
        images: ArrayView4<f32>,
        target: ComputeTarget,
    ) -> Result<Array2<f32>, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn num_classes(&self) -> usize {
        (**self).num_classes()
    }

    fn mode(&self) -> ModelMode {
        (**self).mode()
    }

    fn set_mode(
        &mut self,
        mode: ModelMode,
    ) {
        (**self).set_mode(mode)
    }

    fn supports(
        &self,
        target: ComputeTarget,
    ) -> bool {
        (**self).supports(target)
    }

    fn forward(
        &self,
        images: ArrayView4<f32>,
        target: ComputeTarget,
    ) -> Result<Array2<f32>, ClassifierError> {
        (**self).forward(images, target)
    }
}
