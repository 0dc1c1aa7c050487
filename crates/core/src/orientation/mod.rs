//! Orientation estimation
//!
//! Turns a stream of tagged gyroscope, accelerometer and magnetometer
//! samples into the three display angles:
//!
//! - azimuth: compass heading from the latest gravity and geomagnetic vectors
//! - roll: running sum of angular-velocity X components, unbounded
//! - pitch: running sum of angular-velocity Y components, clamped to
//!   [`PITCH_MIN_DEG`, `PITCH_MAX_DEG`]
//!
//! Roll and pitch are plain integrations of the rate samples. Nothing
//! re-centres them or corrects gyro bias, so they drift.

mod estimator;

pub use estimator::{ingest, AzimuthUpdate, IngestOutcome, OrientationState};

/// Lower pitch bound (degrees)
pub const PITCH_MIN_DEG: f32 = 0.0;

/// Upper pitch bound (degrees)
pub const PITCH_MAX_DEG: f32 = 150.0;
