use tracing::info;

use super::{DataError, DataLoader, RetinopathyDataset};
use crate::config::{DatasetPaths, LoaderConfig, TrainConfig};

/// Builds the shuffled train loader and the ordered validation loader.
///
/// Both splits read images from `paths.train_images`; validation uses the
/// non-augmenting transform.
pub fn load_datasets(
    train_config: &TrainConfig,
    paths: &DatasetPaths,
) -> Result<(DataLoader<RetinopathyDataset>, DataLoader<RetinopathyDataset>), DataError> {
    let train_loader_config = train_config.train_loader_config();
    let validation_loader_config = train_config.validation_loader_config();

    let train_dataset = RetinopathyDataset::from_csv(
        &paths.train_images,
        &paths.train_labels,
        train_loader_config.transform.clone(),
        &paths.image_extension,
    )?;
    let validation_dataset = RetinopathyDataset::from_csv(
        &paths.train_images,
        &paths.validation_labels,
        validation_loader_config.transform.clone(),
        &paths.image_extension,
    )?;

    info!(train = train_dataset.records().len(), validation = validation_dataset.records().len(), "loaded datasets");

    let train_loader = DataLoader::new(train_dataset, &train_loader_config, true)?;
    let validation_loader = DataLoader::new(validation_dataset, &validation_loader_config, false)?;
    Ok((train_loader, validation_loader))
}

pub fn test_loader(
    test_config: &LoaderConfig,
    paths: &DatasetPaths,
) -> Result<DataLoader<RetinopathyDataset>, DataError> {
    let test_dataset = RetinopathyDataset::from_csv(
        &paths.test_images,
        &paths.test_labels,
        test_config.transform.clone(),
        &paths.image_extension,
    )?;

    info!(test = test_dataset.records().len(), "loaded test dataset");

    DataLoader::new(test_dataset, test_config, false)
}
