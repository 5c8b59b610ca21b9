use std::path::Path;

use comfy_table::{CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use console::Style;
use drgrade::{
    config::DrgradeConfig,
    data::load_datasets,
    device::ComputeTarget,
    evaluation::{EvaluationConfig, JsonlScalarWriter, evaluate_model},
    model::{CrossEntropyLoss, LinearProbe},
};
use indicatif::{ProgressBar, ProgressStyle};

pub fn handle_evaluate(
    config_path: String,
    weights_path: String,
    step: u64,
    scalars_path: Option<String>,
    device: Option<ComputeTarget>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DrgradeConfig::from_file(Path::new(&config_path))?;
    let device = device.unwrap_or(config.device);
    let (_, validation_loader) = load_datasets(&config.train, &config.paths)?;
    let mut classifier = LinearProbe::from_file(Path::new(&weights_path))?;

    let progress_bar = ProgressBar::new(validation_loader.num_samples() as u64);
    progress_bar.set_style(ProgressStyle::default_bar().template("{msg} {bar:40.cyan/blue} {pos}/{len} images {elapsed}")?);
    progress_bar.set_message(format!("Evaluating on {device}"));
    let mut report_progress = |processed: usize| {
        progress_bar.set_position(processed as u64);
    };

    let mut writer = scalars_path.map(|path| JsonlScalarWriter::create(Path::new(&path))).transpose()?;
    let mut evaluation_config = EvaluationConfig::new(device).progress(&mut report_progress);
    if let Some(writer) = writer.as_mut() {
        evaluation_config = evaluation_config.writer(writer);
    }

    let metrics = evaluate_model(step, &validation_loader, &mut classifier, &mut evaluation_config, &CrossEntropyLoss);
    progress_bar.finish_and_clear();
    let metrics = metrics?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"])
        .add_row(vec!["Kappa (quadratic)".to_string(), format!("{:.4}", metrics.kappa)])
        .add_row(vec!["Accuracy".to_string(), format!("{:.4}", metrics.accuracy)])
        .add_row(vec!["F1 (macro)".to_string(), format!("{:.4}", metrics.f1)])
        .add_row(vec!["Loss".to_string(), format!("{:.4}", metrics.loss)]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    println!("{table}");

    let style_step = Style::new().bold();
    println!("{}", style_step.apply_to(format!("step {step}, {} validation images", validation_loader.num_samples())));

    Ok(())
}
