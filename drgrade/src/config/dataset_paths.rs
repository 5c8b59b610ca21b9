use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_image_extension() -> String {
    String::from("png")
}

/// Locations of the label tables and image folders.
///
/// Split generation happens upstream; each split arrives as its own
/// `id_code,diagnosis` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub train_images: PathBuf,
    pub test_images: PathBuf,
    pub train_labels: PathBuf,
    pub validation_labels: PathBuf,
    pub test_labels: PathBuf,
    #[serde(default = "default_image_extension")]
    pub image_extension: String,
}

impl DatasetPaths {
    /// Conventional layout under a single data root.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            train_images: root.join("train_images"),
            test_images: root.join("test_images"),
            train_labels: root.join("train.csv"),
            validation_labels: root.join("validation.csv"),
            test_labels: root.join("test.csv"),
            image_extension: default_image_extension(),
        }
    }
}
