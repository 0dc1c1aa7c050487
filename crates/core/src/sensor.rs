//! Sensor sample types
//!
//! Raw tri-axis readings as delivered by the sensor collaborator, tagged with
//! the kind of sensor that produced them.

use nalgebra::Vector3;

/// Kind of sensor that produced a sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Gyroscope, angular velocity about each device axis
    AngularVelocity,
    /// Accelerometer, used as the gravity vector
    Acceleration,
    /// Magnetometer, used as the geomagnetic vector
    MagneticField,
}

impl SensorKind {
    /// Short lowercase name used in logs and recordings
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::AngularVelocity => "gyroscope",
            SensorKind::Acceleration => "accelerometer",
            SensorKind::MagneticField => "magnetic_field",
        }
    }
}

impl core::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One instantaneous tri-axis reading
///
/// Units are whatever the sensor reports. Only the latest sample per kind is
/// retained by the estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TriAxisSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TriAxisSample {
    /// All-zero sample
    pub const ZERO: TriAxisSample = TriAxisSample {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the sample as a column vector
    pub fn to_vector(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Returns true if every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for TriAxisSample {
    fn from(values: [f32; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}

impl From<TriAxisSample> for [f32; 3] {
    fn from(sample: TriAxisSample) -> Self {
        [sample.x, sample.y, sample.z]
    }
}

impl From<Vector3<f32>> for TriAxisSample {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<TriAxisSample> for Vector3<f32> {
    fn from(sample: TriAxisSample) -> Self {
        sample.to_vector()
    }
}

/// A sample tagged with the sensor kind that produced it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub sample: TriAxisSample,
}

impl SensorEvent {
    pub const fn new(kind: SensorKind, sample: TriAxisSample) -> Self {
        Self { kind, sample }
    }

    /// Angular velocity event
    pub const fn angular_velocity(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::AngularVelocity, TriAxisSample::new(x, y, z))
    }

    /// Acceleration event
    pub const fn acceleration(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::Acceleration, TriAxisSample::new(x, y, z))
    }

    /// Magnetic field event
    pub const fn magnetic_field(x: f32, y: f32, z: f32) -> Self {
        Self::new(SensorKind::MagneticField, TriAxisSample::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_array_conversion() {
        let sample = TriAxisSample::from([1.0, -2.0, 3.5]);
        assert_eq!(sample, TriAxisSample::new(1.0, -2.0, 3.5));

        let values: [f32; 3] = sample.into();
        assert_eq!(values, [1.0, -2.0, 3.5]);
    }

    #[test]
    fn test_sample_vector_conversion() {
        let sample = TriAxisSample::new(0.5, 0.25, -9.81);
        let v: Vector3<f32> = sample.into();
        assert_eq!(v, Vector3::new(0.5, 0.25, -9.81));
        assert_eq!(TriAxisSample::from(v), sample);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(TriAxisSample::default(), TriAxisSample::ZERO);
    }

    #[test]
    fn test_is_finite() {
        assert!(TriAxisSample::new(1.0, 2.0, 3.0).is_finite());
        assert!(!TriAxisSample::new(f32::NAN, 2.0, 3.0).is_finite());
        assert!(!TriAxisSample::new(1.0, f32::INFINITY, 3.0).is_finite());
    }

    #[test]
    fn test_event_constructors() {
        let event = SensorEvent::magnetic_field(20.0, 0.0, -40.0);
        assert_eq!(event.kind, SensorKind::MagneticField);
        assert_eq!(event.sample, TriAxisSample::new(20.0, 0.0, -40.0));
    }

    #[test]
    fn test_kind_names() {
        extern crate std;
        use std::format;
        assert_eq!(SensorKind::AngularVelocity.name(), "gyroscope");
        assert_eq!(format!("{}", SensorKind::Acceleration), "accelerometer");
    }
}
