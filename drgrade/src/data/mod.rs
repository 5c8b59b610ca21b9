mod batch;
mod data_loader;
mod dataset;
mod error;
mod loaders;
mod transform;

pub use batch::{Batch, Sample};
pub use data_loader::{BatchIter, DataLoader};
pub use dataset::{Dataset, InMemoryDataset, LabelRecord, RetinopathyDataset};
pub use error::DataError;
pub use loaders::{load_datasets, test_loader};
pub use transform::ImageTransform;
