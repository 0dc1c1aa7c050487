//! Session driver.
//!
//! Owns the [`OrientationState`] and is the only place it is mutated. Each
//! event is ingested synchronously, counted, logged, and handed to every
//! registered observer before the next event is read.

use gyrocompass_core::traits::OrientationObserver;
use gyrocompass_core::{AzimuthUpdate, IngestOutcome, OrientationState, SensorEvent, SensorKind};
use log::{debug, info, trace};

use crate::error::SourceError;
use crate::source::SampleSource;

/// Counters kept across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub angular_velocity: u64,
    pub acceleration: u64,
    pub magnetic_field: u64,
    /// Samples after which the azimuth was recomputed
    pub azimuth_updates: u64,
    /// Samples after which the azimuth was left unchanged
    pub azimuth_skips: u64,
}

impl IngestStats {
    /// Total samples ingested.
    pub fn total(&self) -> u64 {
        self.angular_velocity + self.acceleration + self.magnetic_field
    }

    fn record(&mut self, outcome: &IngestOutcome) {
        match outcome.kind {
            SensorKind::AngularVelocity => self.angular_velocity += 1,
            SensorKind::Acceleration => self.acceleration += 1,
            SensorKind::MagneticField => self.magnetic_field += 1,
        }
        match outcome.azimuth {
            AzimuthUpdate::Updated(_) => self.azimuth_updates += 1,
            AzimuthUpdate::Skipped => self.azimuth_skips += 1,
        }
    }
}

/// Drives the orientation estimator from a sample source.
pub struct Session {
    state: OrientationState,
    stats: IngestStats,
    observers: Vec<Box<dyn OrientationObserver>>,
    max_events: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: OrientationState::new(),
            stats: IngestStats::default(),
            observers: Vec::new(),
            max_events: None,
        }
    }

    /// Stop `run` after this many events.
    pub fn with_max_events(mut self, max_events: Option<u64>) -> Self {
        self.max_events = max_events;
        self
    }

    /// Register an observer to be notified after every sample.
    pub fn add_observer(&mut self, observer: impl OrientationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Current orientation.
    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Zero the state and counters. Observers stay registered.
    pub fn reset(&mut self) {
        self.state = OrientationState::new();
        self.stats = IngestStats::default();
    }

    /// Ingest one event and notify observers.
    pub fn push(&mut self, event: SensorEvent) -> IngestOutcome {
        let outcome = self.state.ingest(event);
        self.stats.record(&outcome);

        if outcome.kind == SensorKind::AngularVelocity {
            debug!(
                "pitch {:.2} (raw {:.2}), roll {:.2}",
                self.state.pitch, self.state.pitch_raw, self.state.roll
            );
        }
        if let AzimuthUpdate::Updated(azimuth) = outcome.azimuth {
            trace!("azimuth {:.2} after {}", azimuth, outcome.kind);
        }

        for observer in self.observers.iter_mut() {
            observer.on_update(&self.state, &outcome);
        }
        outcome
    }

    /// Resume `source`, ingest until it is exhausted (or `max_events` is
    /// reached), then pause it.
    ///
    /// The source is paused on error as well.
    pub fn run<S: SampleSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<IngestStats, SourceError> {
        info!("resuming source {}", source.name());
        source.resume()?;

        let result = self.drain(source);

        source.pause();
        info!(
            "paused source {} after {} samples ({} azimuth updates, {} skipped)",
            source.name(),
            self.stats.total(),
            self.stats.azimuth_updates,
            self.stats.azimuth_skips
        );
        result.map(|_| self.stats)
    }

    fn drain<S: SampleSource + ?Sized>(&mut self, source: &mut S) -> Result<(), SourceError> {
        let mut delivered: u64 = 0;
        while self.max_events.map_or(true, |max| delivered < max) {
            match source.next_event()? {
                Some(event) => {
                    self.push(event);
                    delivered += 1;
                }
                None => break,
            }
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
