//! Console renderer.
//!
//! Text stand-in for the compass dial and barrel indicator: writes the
//! display model as one status line per rendered update.

use std::io::Write;

use gyrocompass_core::display::{format_sensor_value, DisplayModel};
use gyrocompass_core::traits::OrientationObserver;
use gyrocompass_core::{AzimuthUpdate, IngestOutcome, OrientationState};
use log::warn;

/// Writes status lines to any `io::Write`.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    every: u32,
    seen: u64,
    rendered: u64,
}

impl<W: Write> ConsoleRenderer<W> {
    /// Render every `every`-th update; 0 never renders.
    pub fn new(out: W, every: u32) -> Self {
        Self {
            out,
            every,
            seen: 0,
            rendered: 0,
        }
    }

    /// Number of lines written so far.
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    fn should_render(&self) -> bool {
        self.every != 0 && self.seen % u64::from(self.every) == 0
    }
}

/// Format the status line for a state.
pub fn status_line(state: &OrientationState, outcome: &IngestOutcome) -> String {
    let model = DisplayModel::from_state(state);
    let mut parts = Vec::with_capacity(4);
    for (label, value) in [
        ("Azimuth", model.compass_rotation_deg),
        ("Roll", model.barrel_rotation_deg),
        ("Pitch", state.pitch),
    ] {
        match format_sensor_value(label, value) {
            Ok(text) => parts.push(text.as_str().to_owned()),
            Err(err) => parts.push(format!("{label}: <{err}>")),
        }
    }
    parts.push(format!("Divider: {}", model.divider_height));

    let mut line = parts.join(" | ");
    if outcome.azimuth == AzimuthUpdate::Skipped {
        line.push_str(" (azimuth held)");
    }
    line
}

impl<W: Write> OrientationObserver for ConsoleRenderer<W> {
    fn on_update(&mut self, state: &OrientationState, outcome: &IngestOutcome) {
        self.seen += 1;
        if !self.should_render() {
            return;
        }
        let line = status_line(state, outcome);
        match writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            Ok(()) => self.rendered += 1,
            Err(err) => warn!("console render failed: {err}"),
        }
    }
}
