use std::{
    fs::File,
    io::BufReader,
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{ConfigError, DatasetPaths, LoaderConfig, TrainConfig};
use crate::device::ComputeTarget;

/// Top-level configuration file consumed by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrgradeConfig {
    pub paths: DatasetPaths,
    #[serde(default)]
    pub train: TrainConfig,
    #[serde(default)]
    pub test: LoaderConfig,
    pub device: ComputeTarget,
}

impl DrgradeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let config: DrgradeConfig = serde_json::from_reader(BufReader::new(file))?;
        config.train.train_loader_config().validate()?;
        config.test.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "paths": {{
                    "train_images": "/data/train_images",
                    "test_images": "/data/test_images",
                    "train_labels": "/data/train.csv",
                    "validation_labels": "/data/validation.csv",
                    "test_labels": "/data/test.csv"
                }},
                "train": {{ "batch_size": 16, "num_workers": 2 }},
                "device": "cpu"
            }}"#
        )
        .unwrap();

        let config = DrgradeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.device, ComputeTarget::Cpu);
        assert_eq!(config.train.batch_size, 16);
        assert_eq!(config.paths.image_extension, "png");
        assert_eq!(config.test, LoaderConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = DrgradeConfig::from_file(Path::new("/nonexistent/drgrade.json"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_rejects_zero_batch_size() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut config = DrgradeConfig {
            paths: DatasetPaths::from_root("/data"),
            train: TrainConfig::default(),
            test: LoaderConfig::default(),
            device: ComputeTarget::Cpu,
        };
        config.test.batch_size = 0;
        serde_json::to_writer(&mut file, &config).unwrap();
        file.flush().unwrap();

        let result = DrgradeConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidBatchSize)));
    }
}
