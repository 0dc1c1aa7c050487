//! Observer abstraction for orientation updates.
//!
//! The estimator does not know who draws its output. Whoever drives the
//! sample loop hands each new state to one or more observers:
//! - the console renderer (in the host crate)
//! - `RecordingObserver` for host testing
//! - any closure taking `(&OrientationState, &IngestOutcome)`

use heapless::Vec;

use crate::orientation::{IngestOutcome, OrientationState};

/// Receives the orientation state after every ingested sample.
///
/// # Example
///
/// ```
/// use gyrocompass_core::orientation::OrientationState;
/// use gyrocompass_core::sensor::SensorEvent;
/// use gyrocompass_core::traits::{OrientationObserver, RecordingObserver};
///
/// let mut state = OrientationState::new();
/// let mut observer: RecordingObserver = RecordingObserver::new();
///
/// let outcome = state.ingest(SensorEvent::angular_velocity(1.0, 2.0, 0.0));
/// observer.on_update(&state, &outcome);
///
/// assert_eq!(observer.updates(), 1);
/// assert_eq!(observer.last_state().unwrap().roll, 1.0);
/// ```
pub trait OrientationObserver {
    /// Called once per ingested sample, after the state has been updated.
    fn on_update(&mut self, state: &OrientationState, outcome: &IngestOutcome);
}

impl<F> OrientationObserver for F
where
    F: FnMut(&OrientationState, &IngestOutcome),
{
    fn on_update(&mut self, state: &OrientationState, outcome: &IngestOutcome) {
        self(state, outcome)
    }
}

// ============================================================================
// Recording Implementation (always available for testing)
// ============================================================================

/// Observer that remembers what it was told.
///
/// Keeps the most recent state and the first `N` outcomes; later outcomes
/// are counted but not stored.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver<const N: usize = 32> {
    updates: usize,
    last_state: Option<OrientationState>,
    outcomes: Vec<IngestOutcome, N>,
}

impl<const N: usize> RecordingObserver<N> {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self {
            updates: 0,
            last_state: None,
            outcomes: Vec::new(),
        }
    }

    /// Number of updates received.
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// State passed with the most recent update.
    pub fn last_state(&self) -> Option<&OrientationState> {
        self.last_state.as_ref()
    }

    /// Stored outcomes, oldest first.
    pub fn outcomes(&self) -> &[IngestOutcome] {
        &self.outcomes
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.updates = 0;
        self.last_state = None;
        self.outcomes.clear();
    }
}

impl<const N: usize> OrientationObserver for RecordingObserver<N> {
    fn on_update(&mut self, state: &OrientationState, outcome: &IngestOutcome) {
        self.updates += 1;
        self.last_state = Some(*state);
        // Full buffer: keep counting, stop storing
        let _ = self.outcomes.push(*outcome);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
