use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use super::WriterError;

/// Sink for tagged scalar series, one value per step.
pub trait ScalarWriter {
    fn add_scalar(
        &mut self,
        tag: &str,
        value: f64,
        step: u64,
    ) -> Result<(), WriterError>;
}

/// One logged scalar. Non-finite values (an undefined Kappa) are stored as
/// the strings `"NaN"`, `"inf"` and `"-inf"` so every line reads back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarRecord {
    pub tag: String,
    #[serde(with = "scalar_value")]
    pub value: f64,
    pub step: u64,
    pub wall_time: f64,
}

impl ScalarRecord {
    pub fn new(
        tag: &str,
        value: f64,
        step: u64,
    ) -> Self {
        let wall_time = SystemTime::now().duration_since(UNIX_EPOCH).map(|duration| duration.as_secs_f64()).unwrap_or(0.0);
        Self {
            tag: tag.to_string(),
            value,
            step,
            wall_time,
        }
    }
}

mod scalar_value {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Encoded {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        value: &f64,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Encoded::deserialize(deserializer)? {
            Encoded::Number(value) => Ok(value),
            Encoded::Text(text) => text.parse().map_err(|_| D::Error::custom(format!("invalid scalar value {text:?}"))),
        }
    }
}

/// Appends one JSON object per scalar to a file.
pub struct JsonlScalarWriter {
    writer: BufWriter<File>,
}

impl JsonlScalarWriter {
    pub fn create(path: &Path) -> Result<Self, WriterError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ScalarWriter for JsonlScalarWriter {
    fn add_scalar(
        &mut self,
        tag: &str,
        value: f64,
        step: u64,
    ) -> Result<(), WriterError> {
        serde_json::to_writer(&mut self.writer, &ScalarRecord::new(tag, value, step))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryScalarWriter {
    pub records: Vec<ScalarRecord>,
}

impl MemoryScalarWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(
        &self,
        tag: &str,
    ) -> Option<&ScalarRecord> {
        self.records.iter().rev().find(|record| record.tag == tag)
    }
}

impl ScalarWriter for MemoryScalarWriter {
    fn add_scalar(
        &mut self,
        tag: &str,
        value: f64,
        step: u64,
    ) -> Result<(), WriterError> {
        self.records.push(ScalarRecord::new(tag, value, step));
        Ok(())
    }
}
