//! Display model for the compass dial and barrel indicator
//!
//! Maps an [`OrientationState`] onto the quantities a renderer draws:
//! the compass image is rotated by the azimuth, the barrel is rotated by the
//! roll, and the divider bar inside the barrel is as tall as |pitch| display
//! units.

use core::fmt::Write;

use heapless::String;

use crate::orientation::OrientationState;

/// Capacity of a formatted sensor-value label
pub const LABEL_CAPACITY: usize = 48;

/// What the renderer should draw for one state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayModel {
    /// Compass image rotation in degrees
    pub compass_rotation_deg: f32,
    /// Barrel image rotation in degrees
    pub barrel_rotation_deg: f32,
    /// Divider bar height in display units
    pub divider_height: u32,
}

impl DisplayModel {
    pub fn from_state(state: &OrientationState) -> Self {
        Self {
            compass_rotation_deg: state.azimuth,
            barrel_rotation_deg: state.roll,
            divider_height: divider_height(state.pitch),
        }
    }
}

impl From<&OrientationState> for DisplayModel {
    fn from(state: &OrientationState) -> Self {
        Self::from_state(state)
    }
}

/// Divider height for a pitch value: |pitch| truncated toward zero
pub fn divider_height(pitch: f32) -> u32 {
    // Saturating cast: NaN -> 0
    libm::truncf(libm::fabsf(pitch)) as u32
}

/// Errors from display formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Formatted label does not fit in [`LABEL_CAPACITY`] bytes
    LabelTooLong,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::LabelTooLong => write!(f, "sensor label too long"),
        }
    }
}

/// Format a labelled sensor value with two decimals, e.g. `"Pitch: 12.50"`
pub fn format_sensor_value(
    label: &str,
    value: f32,
) -> Result<String<LABEL_CAPACITY>, DisplayError> {
    let mut out = String::new();
    write!(out, "{}: {:.2}", label, value).map_err(|_| DisplayError::LabelTooLong)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorEvent;

    #[test]
    fn test_default_state_draws_nothing() {
        let model = DisplayModel::from_state(&OrientationState::new());
        assert_eq!(model, DisplayModel::default());
    }

    #[test]
    fn test_model_follows_state() {
        let mut state = OrientationState::new();
        state.ingest(SensorEvent::angular_velocity(-30.0, 42.7, 0.0));
        state.azimuth = 123.5;

        let model = DisplayModel::from(&state);
        assert_eq!(model.compass_rotation_deg, 123.5);
        assert_eq!(model.barrel_rotation_deg, -30.0);
        assert_eq!(model.divider_height, 42);
    }

    #[test]
    fn test_divider_height_uses_magnitude() {
        assert_eq!(divider_height(0.0), 0);
        assert_eq!(divider_height(0.99), 0);
        assert_eq!(divider_height(150.0), 150);
        assert_eq!(divider_height(-12.8), 12);
        assert_eq!(divider_height(f32::NAN), 0);
    }

    #[test]
    fn test_format_sensor_value() {
        let label = format_sensor_value("Pitch", 12.5).unwrap();
        assert_eq!(label.as_str(), "Pitch: 12.50");

        let label = format_sensor_value("Azimuth", 1.234).unwrap();
        assert_eq!(label.as_str(), "Azimuth: 1.23");
    }

    #[test]
    fn test_format_sensor_value_too_long() {
        let long = "a label that is far too long to fit in the buffer";
        assert_eq!(
            format_sensor_value(long, 1.0),
            Err(DisplayError::LabelTooLong)
        );
    }
}
