use serde::{Deserialize, Serialize};

use super::{ConfigError, ShuffleSeed};
use crate::data::ImageTransform;

fn default_batch_size() -> usize {
    32
}

fn default_num_workers() -> usize {
    4
}

fn default_pin_memory() -> bool {
    true
}

/// Loader knobs for a single split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    #[serde(default)]
    pub transform: ImageTransform,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    #[serde(default = "default_pin_memory")]
    pub pin_memory: bool,
    #[serde(default)]
    pub seed: ShuffleSeed,
}

impl LoaderConfig {
    pub fn new(
        transform: ImageTransform,
        batch_size: usize,
        num_workers: usize,
        pin_memory: bool,
    ) -> Self {
        Self {
            transform,
            batch_size,
            num_workers,
            pin_memory,
            seed: ShuffleSeed::default(),
        }
    }

    pub fn seed(
        self,
        seed: ShuffleSeed,
    ) -> Self {
        Self {
            seed,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        Ok(())
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(
            ImageTransform::default(),
            default_batch_size(),
            default_num_workers(),
            default_pin_memory(),
        )
    }
}

/// Loader knobs for the train/validation pair.
///
/// Both splits share batch size and worker settings; only the transform
/// differs, so augmentation can stay off for validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    #[serde(default = "ImageTransform::augmented")]
    pub transform: ImageTransform,
    #[serde(default)]
    pub validation_transform: ImageTransform,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_num_workers")]
    pub num_workers: usize,
    #[serde(default = "default_pin_memory")]
    pub pin_memory: bool,
    #[serde(default)]
    pub seed: ShuffleSeed,
}

impl TrainConfig {
    pub fn train_loader_config(&self) -> LoaderConfig {
        LoaderConfig::new(self.transform.clone(), self.batch_size, self.num_workers, self.pin_memory)
            .seed(self.seed)
    }

    pub fn validation_loader_config(&self) -> LoaderConfig {
        LoaderConfig::new(self.validation_transform.clone(), self.batch_size, self.num_workers, self.pin_memory)
            .seed(self.seed)
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            transform: ImageTransform::augmented(),
            validation_transform: ImageTransform::default(),
            batch_size: default_batch_size(),
            num_workers: default_num_workers(),
            pin_memory: default_pin_memory(),
            seed: ShuffleSeed::default(),
        }
    }
}
