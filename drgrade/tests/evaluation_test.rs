mod common;

use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use common::{OracleClassifier, QueuedLoss, ok_batches, oracle_batch};
use drgrade::{
    device::ComputeTarget,
    evaluation::{
        EvaluationConfig, EvaluationError, JsonlScalarWriter, MemoryScalarWriter, ScalarRecord, evaluate_model,
    },
    inference::RunnerError,
    model::{Classifier, CrossEntropyLoss, ModelMode},
};

#[test]
fn test_perfect_predictions_score_one() {
    let mut classifier = OracleClassifier::new();
    let mut config = EvaluationConfig::new(ComputeTarget::Cpu);
    let batches = ok_batches(vec![oracle_batch(&[0, 1, 2, 3], &[0, 1, 2, 3], 0), oracle_batch(&[4], &[4], 4)]);

    let metrics = evaluate_model(0, batches, &mut classifier, &mut config, &CrossEntropyLoss).unwrap();

    assert!((metrics.kappa - 1.0).abs() < 1e-12);
    assert_eq!(metrics.accuracy, 1.0);
    assert!((metrics.f1 - 1.0).abs() < 1e-12);
    assert_eq!(classifier.mode(), ModelMode::Training);
}

#[test]
fn test_writer_receives_all_scalars_at_step() {
    let mut classifier = OracleClassifier::new();
    let mut writer = MemoryScalarWriter::new();
    let mut config = EvaluationConfig::new(ComputeTarget::Cpu).writer(&mut writer);
    let batches = ok_batches(vec![oracle_batch(&[0, 1, 3], &[0, 2, 3], 0), oracle_batch(&[4], &[4], 3)]);
    let loss = QueuedLoss::new(vec![1.0, 3.0]);

    let metrics = evaluate_model(12, batches, &mut classifier, &mut config, &loss).unwrap();
    drop(config);

    let tags: Vec<&str> = writer.records.iter().map(|record| record.tag.as_str()).collect();
    assert_eq!(tags, vec!["Kappa", "Accuracy", "F1", "val_loss"]);
    assert!(writer.records.iter().all(|record| record.step == 12));

    assert_eq!(metrics.accuracy, 0.75);
    assert_eq!(metrics.loss, 2.0);
    assert_eq!(writer.latest("Accuracy").map(|record| record.value), Some(0.75));
    assert_eq!(writer.latest("val_loss").map(|record| record.value), Some(2.0));
    assert!(metrics.kappa < 1.0 && metrics.kappa > 0.0);
}

#[test]
fn test_errors_propagate_without_writing() {
    let mut classifier = OracleClassifier::failing_on(0);
    let mut writer = MemoryScalarWriter::new();
    let mut config = EvaluationConfig::new(ComputeTarget::Cpu).writer(&mut writer);

    let result = evaluate_model(1, ok_batches(vec![oracle_batch(&[0], &[0], 0)]), &mut classifier, &mut config, &CrossEntropyLoss);
    drop(config);

    assert!(matches!(result, Err(EvaluationError::Runner(RunnerError::Classifier(_)))));
    assert!(writer.records.is_empty());
    assert_eq!(classifier.mode(), ModelMode::Training);
}

#[test]
fn test_single_class_split_logs_readable_scalars() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("scalars.jsonl");
    let mut classifier = OracleClassifier::new();
    let mut writer = JsonlScalarWriter::create(&path).unwrap();
    let mut config = EvaluationConfig::new(ComputeTarget::Cpu).writer(&mut writer);
    let batches = ok_batches(vec![oracle_batch(&[0, 0, 0], &[0, 0, 0], 0)]);

    let metrics = evaluate_model(5, batches, &mut classifier, &mut config, &CrossEntropyLoss).unwrap();
    drop(config);
    drop(writer);

    assert!(metrics.kappa.is_nan());
    assert_eq!(metrics.accuracy, 1.0);

    let records: Vec<ScalarRecord> = BufReader::new(File::open(&path).unwrap())
        .lines()
        .map(|line| serde_json::from_str(&line.unwrap()).unwrap())
        .collect();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].tag, "Kappa");
    assert!(records[0].value.is_nan());
    assert_eq!(records[1].value, 1.0);
    assert!(records.iter().all(|record| record.step == 5));
}

#[test]
fn test_progress_hook_sees_every_batch() {
    let mut classifier = OracleClassifier::new();
    let mut reported = Vec::new();
    let mut record_progress = |count: usize| reported.push(count);
    let mut config = EvaluationConfig::new(ComputeTarget::Cpu).progress(&mut record_progress);
    let batches = ok_batches(vec![oracle_batch(&[0, 1], &[0, 1], 0), oracle_batch(&[2, 3], &[2, 3], 2), oracle_batch(&[4], &[4], 4)]);

    evaluate_model(0, batches, &mut classifier, &mut config, &CrossEntropyLoss).unwrap();
    drop(config);

    assert_eq!(reported, vec![2, 4, 5]);
}
