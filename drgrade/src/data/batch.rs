use ndarray::{Array1, Array3, Array4, ArrayView3, Axis, stack};

use super::DataError;

/// One decoded image with its grade and identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: Array3<f32>,
    pub label: u32,
    pub identifier: String,
}

impl Sample {
    pub fn new(
        image: Array3<f32>,
        label: u32,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            image,
            label,
            identifier: identifier.into(),
        }
    }
}

/// A group of samples stacked along the leading axis.
///
/// `images` is `N x C x H x W`; `labels` and `identifiers` hold `N` entries
/// in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub images: Array4<f32>,
    pub labels: Array1<u32>,
    pub identifiers: Vec<String>,
}

impl Batch {
    pub fn new(
        images: Array4<f32>,
        labels: Array1<u32>,
        identifiers: Vec<String>,
    ) -> Result<Self, DataError> {
        let batch = Self {
            images,
            labels,
            identifiers,
        };
        batch.validate()?;
        Ok(batch)
    }

    pub fn collate(samples: Vec<Sample>) -> Result<Self, DataError> {
        if samples.is_empty() {
            return Err(DataError::EmptyBatch);
        }

        let views: Vec<ArrayView3<f32>> = samples.iter().map(|sample| sample.image.view()).collect();
        let images = stack(Axis(0), &views)?;
        let labels = samples.iter().map(|sample| sample.label).collect::<Array1<u32>>();
        let identifiers = samples.into_iter().map(|sample| sample.identifier).collect();

        Ok(Self {
            images,
            labels,
            identifiers,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn validate(&self) -> Result<(), DataError> {
        let images = self.images.len_of(Axis(0));
        let labels = self.labels.len();
        let identifiers = self.identifiers.len();
        if images != labels || labels != identifiers {
            return Err(DataError::InconsistentBatch {
                images,
                labels,
                identifiers,
            });
        }
        Ok(())
    }
}
