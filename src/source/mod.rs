//! Sensor sample sources.
//!
//! A source stands in for the platform's sensor subscription: `resume`
//! registers interest, `pause` drops it, and `next_event` yields samples one
//! at a time in delivery order.

mod json_lines;

pub use json_lines::{JsonLinesSource, RecordKind, SampleRecord};

use gyrocompass_core::SensorEvent;

use crate::error::SourceError;

/// Serial supplier of tagged sensor samples.
pub trait SampleSource {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Start delivering samples.
    fn resume(&mut self) -> Result<(), SourceError>;

    /// Stop delivering samples. Idempotent.
    fn pause(&mut self);

    /// True between `resume` and `pause`.
    fn is_active(&self) -> bool;

    /// Next sample, or `None` when the source is exhausted.
    ///
    /// Fails with [`SourceError::Paused`] when called on a paused source.
    fn next_event(&mut self) -> Result<Option<SensorEvent>, SourceError>;
}

/// Replays an in-memory list of events.
#[derive(Debug, Clone)]
pub struct VecSource {
    events: Vec<SensorEvent>,
    position: usize,
    active: bool,
}

impl VecSource {
    pub fn new(events: Vec<SensorEvent>) -> Self {
        Self {
            events,
            position: 0,
            active: false,
        }
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.position
    }
}

impl SampleSource for VecSource {
    fn name(&self) -> &str {
        "memory"
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
        let event = self.events.get(self.position).copied();
        if event.is_some() {
            self.position += 1;
        }
        Ok(event)
    }
}
