use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use serde::Deserialize;

use super::{DataError, ImageTransform, Sample};

/// Random-access source of samples.
///
/// `rng` drives per-sample augmentation; the loader derives one per sample so
/// decoding order does not affect the result.
pub trait Dataset: Send + Sync {
    fn len(&self) -> usize;

    fn get(
        &self,
        index: usize,
        rng: &mut StdRng,
    ) -> Result<Sample, DataError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One row of a `id_code,diagnosis` label table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelRecord {
    pub id_code: String,
    #[serde(default)]
    pub diagnosis: u32,
}

/// Fundus images on disk addressed by a label table.
pub struct RetinopathyDataset {
    images_path: PathBuf,
    records: Vec<LabelRecord>,
    transform: ImageTransform,
    extension: String,
}

impl RetinopathyDataset {
    pub fn new(
        images_path: impl Into<PathBuf>,
        records: Vec<LabelRecord>,
        transform: ImageTransform,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            images_path: images_path.into(),
            records,
            transform,
            extension: extension.into(),
        }
    }

    pub fn from_csv(
        images_path: impl Into<PathBuf>,
        labels_path: &Path,
        transform: ImageTransform,
        extension: impl Into<String>,
    ) -> Result<Self, DataError> {
        let records = read_label_table(labels_path)?;
        Ok(Self::new(images_path, records, transform, extension))
    }

    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    pub fn image_path(
        &self,
        record: &LabelRecord,
    ) -> PathBuf {
        self.images_path.join(format!("{}.{}", record.id_code, self.extension))
    }
}

impl Dataset for RetinopathyDataset {
    fn len(&self) -> usize {
        self.records.len()
    }

    fn get(
        &self,
        index: usize,
        rng: &mut StdRng,
    ) -> Result<Sample, DataError> {
        let record = self.records.get(index).ok_or(DataError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })?;

        let path = self.image_path(record);
        if !path.exists() {
            return Err(DataError::ImageNotFound(path));
        }
        let image = image::open(&path).map_err(|source| DataError::ImageDecode {
            path: path.clone(),
            source,
        })?;

        Ok(Sample::new(self.transform.apply(&image, rng), record.diagnosis, record.id_code.clone()))
    }
}

fn read_label_table(path: &Path) -> Result<Vec<LabelRecord>, DataError> {
    if !path.exists() {
        return Err(DataError::LabelTableNotFound(path.to_path_buf()));
    }

    let to_error = |source: csv::Error| DataError::LabelTable {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_path(path).map_err(to_error)?;
    reader.deserialize::<LabelRecord>().map(|record| record.map_err(to_error)).collect()
}

/// Pre-decoded samples, handy for synthetic data and tests.
pub struct InMemoryDataset {
    samples: Vec<Sample>,
}

impl InMemoryDataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
        }
    }
}

impl Dataset for InMemoryDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(
        &self,
        index: usize,
        _rng: &mut StdRng,
    ) -> Result<Sample, DataError> {
        self.samples.get(index).cloned().ok_or(DataError::IndexOutOfRange {
            index,
            len: self.samples.len(),
        })
    }
}
