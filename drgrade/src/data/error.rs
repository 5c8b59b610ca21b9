use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Label table not found: {0}")]
    LabelTableNotFound(PathBuf),
    #[error("Unable to read label table {path}: {source}")]
    LabelTable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Image not found: {0}")]
    ImageNotFound(PathBuf),
    #[error("Unable to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Sample index {index} out of range for dataset of {len}")]
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    #[error("Unable to collate batch: {0}")]
    Collate(#[from] ndarray::ShapeError),
    #[error("Batch has {images} images, {labels} labels and {identifiers} identifiers")]
    InconsistentBatch {
        images: usize,
        labels: usize,
        identifiers: usize,
    },
    #[error("Cannot collate an empty batch")]
    EmptyBatch,
    #[error("Unable to start loader workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
