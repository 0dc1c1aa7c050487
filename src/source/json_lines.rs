//! JSON-lines recordings.
//!
//! One record per line:
//!
//! ```text
//! {"kind":"gyroscope","values":[0.01,-0.02,0.0],"timestamp_us":16000}
//! {"kind":"accelerometer","values":[0.1,0.3,9.79]}
//! {"kind":"magnetic_field","values":[22.0,5.1,-40.3]}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::BufRead;

use gyrocompass_core::{SensorEvent, SensorKind, TriAxisSample};
use log::trace;
use serde::{Deserialize, Serialize};

use super::SampleSource;
use crate::error::SourceError;

/// Sensor kind as written in recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Gyroscope,
    Accelerometer,
    MagneticField,
}

impl From<RecordKind> for SensorKind {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Gyroscope => SensorKind::AngularVelocity,
            RecordKind::Accelerometer => SensorKind::Acceleration,
            RecordKind::MagneticField => SensorKind::MagneticField,
        }
    }
}

impl From<SensorKind> for RecordKind {
    fn from(kind: SensorKind) -> Self {
        match kind {
            SensorKind::AngularVelocity => RecordKind::Gyroscope,
            SensorKind::Acceleration => RecordKind::Accelerometer,
            SensorKind::MagneticField => RecordKind::MagneticField,
        }
    }
}

/// One line of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub kind: RecordKind,
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_us: Option<u64>,
}

impl SampleRecord {
    pub fn from_event(event: &SensorEvent, timestamp_us: Option<u64>) -> Self {
        let values: [f32; 3] = event.sample.into();
        Self {
            kind: event.kind.into(),
            values: values.to_vec(),
            timestamp_us,
        }
    }

    /// Serialize as a single recording line (no trailing newline).
    ///
    /// JSON has no NaN or infinity, so records with non-finite values are
    /// rejected instead of being written as `null`.
    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        if let Some(value) = self.values.iter().find(|v| !v.is_finite()) {
            return Err(serde::ser::Error::custom(format!(
                "non-finite {} value {value}",
                SensorKind::from(self.kind)
            )));
        }
        serde_json::to_string(self)
    }

    fn into_event(self, line: usize) -> Result<SensorEvent, SourceError> {
        let values: [f32; 3] = self
            .values
            .as_slice()
            .try_into()
            .map_err(|_| SourceError::InvalidSample {
                line,
                len: self.values.len(),
            })?;
        Ok(SensorEvent::new(
            self.kind.into(),
            TriAxisSample::from(values),
        ))
    }
}

/// Reads a JSON-lines recording from any buffered reader.
pub struct JsonLinesSource<R> {
    name: String,
    reader: R,
    line: usize,
    active: bool,
    last_timestamp_us: Option<u64>,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            line: 0,
            active: false,
            last_timestamp_us: None,
            buf: String::new(),
        }
    }

    /// Line number of the last record read (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Timestamp of the last record that carried one.
    pub fn last_timestamp_us(&self) -> Option<u64> {
        self.last_timestamp_us
    }
}

impl<R: BufRead> SampleSource for JsonLinesSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self) -> Result<(), SourceError> {
        self.active = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn next_event(&mut self) -> Result<Option<SensorEvent>, SourceError> {
        if !self.active {
            return Err(SourceError::Paused);
        }

        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let record: SampleRecord =
                serde_json::from_str(text).map_err(|source| SourceError::Parse {
                    line: self.line,
                    source,
                })?;
            if record.timestamp_us.is_some() {
                self.last_timestamp_us = record.timestamp_us;
            }
            trace!(
                "{}:{} {:?} {:?}",
                self.name,
                self.line,
                record.kind,
                record.values
            );
            return record.into_event(self.line).map(Some);
        }
    }
}
