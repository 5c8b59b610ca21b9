use std::{fs::File, io::Write, path::Path};

use clap::ValueEnum;
use drgrade::{
    config::DrgradeConfig,
    data::test_loader,
    device::ComputeTarget,
    inference::{
        BatchInferenceRunner, ConfidencePass, ExtractionMode, PassOutput, ProbabilityPass, RunnerError, softmax::row_argmax,
    },
    model::LinearProbe,
};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PredictionMode {
    /// Predicted grade with its tempered confidence and entropy
    Confidence,
    /// Full tempered probability vector per image
    Probability,
}

impl PredictionMode {
    fn extraction_mode(&self) -> ExtractionMode {
        match self {
            PredictionMode::Confidence => ExtractionMode::confidence(),
            PredictionMode::Probability => ExtractionMode::probability(),
        }
    }
}

pub fn handle_predict(
    config_path: String,
    weights_path: String,
    mode: PredictionMode,
    output_path: String,
    device: Option<ComputeTarget>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DrgradeConfig::from_file(Path::new(&config_path))?;
    let device = device.unwrap_or(config.device);
    let loader = test_loader(&config.test, &config.paths)?;
    let mut classifier = LinearProbe::from_file(Path::new(&weights_path))?;

    let progress_bar = ProgressBar::new(loader.num_samples() as u64);
    progress_bar.set_style(ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos}/{len} images {elapsed}")?);
    let runner = BatchInferenceRunner::new(mode.extraction_mode(), device);
    let output = runner.run(
        &loader,
        &mut classifier,
        Some(|processed: usize| {
            progress_bar.set_position(processed as u64);
        }),
    );
    progress_bar.finish();
    let output = output?;

    let written = write_predictions(&output_path, &output)?;
    println!("Wrote {written} predictions to {output_path}");

    Ok(())
}

/// Writes a confidence or probability pass as CSV and returns its row count.
///
/// A label pass carries no per-image scores, so it is refused before the
/// output file is created.
pub fn write_predictions(
    output_path: &str,
    output: &PassOutput,
) -> Result<usize, Box<dyn std::error::Error>> {
    match output {
        PassOutput::Confidence(pass) => write_confidence_csv(File::create(output_path)?, pass)?,
        PassOutput::Probabilities(pass) => write_probability_csv(File::create(output_path)?, pass)?,
        PassOutput::Labels(_) => return Err(RunnerError::UnexpectedOutput(output.kind()).into()),
    }
    Ok(output.len())
}

pub fn write_confidence_csv<W: Write>(
    writer: W,
    pass: &ConfidencePass,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["id_code", "diagnosis", "confidence", "entropy"])?;
    for index in 0..pass.identifiers.len() {
        csv_writer.write_record([
            pass.identifiers[index].clone(),
            pass.predictions[index].to_string(),
            pass.confidences[index].to_string(),
            pass.entropies[index].to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_probability_csv<W: Write>(
    writer: W,
    pass: &ProbabilityPass,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header = vec![String::from("id_code"), String::from("diagnosis")];
    header.extend((0..pass.probabilities.ncols()).map(|class| format!("p{class}")));
    csv_writer.write_record(&header)?;

    for (identifier, row) in pass.identifiers.iter().zip(pass.probabilities.rows()) {
        let mut record = vec![identifier.clone(), row_argmax(row).to_string()];
        record.extend(row.iter().map(|probability| probability.to_string()));
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
