mod dataset_paths;
mod drgrade_config;
mod error;
mod loader_config;
mod shuffle_seed;

pub use dataset_paths::DatasetPaths;
pub use drgrade_config::DrgradeConfig;
pub use error::ConfigError;
pub use loader_config::{LoaderConfig, TrainConfig};
pub use shuffle_seed::ShuffleSeed;
