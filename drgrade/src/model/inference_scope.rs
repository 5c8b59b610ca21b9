use std::ops::Deref;

use super::{Classifier, ModelMode};

/// Holds a classifier in `ModelMode::Inference` for the scope's lifetime.
///
/// Dropping the scope switches the classifier back to `ModelMode::Training`,
/// whether the pass finished, returned an error or unwound.
pub struct InferenceScope<'a, C: Classifier + ?Sized> {
    classifier: &'a mut C,
}

impl<'a, C: Classifier + ?Sized> InferenceScope<'a, C> {
    pub fn enter(classifier: &'a mut C) -> Self {
        classifier.set_mode(ModelMode::Inference);
        Self {
            classifier,
        }
    }
}

impl<C: Classifier + ?Sized> Deref for InferenceScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        &*self.classifier
    }
}

impl<C: Classifier + ?Sized> Drop for InferenceScope<'_, C> {
    fn drop(&mut self) {
        self.classifier.set_mode(ModelMode::Training);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use ndarray::{Array1, Array2};

    use super::*;
    use crate::model::LinearProbe;

    fn probe() -> LinearProbe {
        LinearProbe::new(Array2::ones((2, 3)), Array1::zeros(2)).unwrap()
    }

    #[test]
    fn test_scope_toggles_mode() {
        let mut classifier = probe();
        {
            let scope = InferenceScope::enter(&mut classifier);
            assert_eq!(scope.mode(), ModelMode::Inference);
            assert_eq!(scope.num_classes(), 2);
        }
        assert_eq!(classifier.mode(), ModelMode::Training);
    }

    #[test]
    fn test_scope_restores_on_panic() {
        let mut classifier = probe();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _scope = InferenceScope::enter(&mut classifier);
            panic!("forward pass failed");
        }));

        assert!(result.is_err());
        assert_eq!(classifier.mode(), ModelMode::Training);
    }

    #[test]
    fn test_scope_over_trait_object() {
        let mut classifier: Box<dyn Classifier> = Box::new(probe());
        {
            let scope = InferenceScope::enter(classifier.as_mut());
            assert_eq!(scope.mode(), ModelMode::Inference);
        }
        assert_eq!(classifier.mode(), ModelMode::Training);
    }
}
