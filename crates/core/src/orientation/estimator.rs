//! Orientation state and the `ingest` operation

use log::{trace, warn};

use super::{PITCH_MAX_DEG, PITCH_MIN_DEG};
use crate::angle::heading_deg_from_rad;
use crate::rotation::RotationMatrix;
use crate::sensor::{SensorEvent, SensorKind, TriAxisSample};

/// Result of recomputing the azimuth after a sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AzimuthUpdate {
    /// Rotation matrix construction succeeded; new azimuth in degrees
    Updated(f32),
    /// Gravity/geomagnetic input was degenerate; azimuth left unchanged
    Skipped,
}

impl AzimuthUpdate {
    /// True if a new azimuth was stored
    pub fn is_updated(&self) -> bool {
        matches!(self, AzimuthUpdate::Updated(_))
    }
}

/// What a single `ingest` did
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IngestOutcome {
    /// Kind of the ingested sample
    pub kind: SensorKind,
    /// Whether the azimuth was recomputed
    pub azimuth: AzimuthUpdate,
}

/// Derived angles plus the latest sample from each sensor
///
/// Starts all-zero. Missing accelerometer or magnetometer data is therefore
/// a zero vector, which the rotation construction rejects, so the azimuth
/// stays at 0 until both sensors have reported.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationState {
    /// Compass heading in degrees, [0, 360), 0 = magnetic north
    pub azimuth: f32,
    /// Accumulated angular-velocity X, degrees, unbounded
    pub roll: f32,
    /// Accumulated angular-velocity Y clamped to [0, 150] degrees
    pub pitch: f32,
    /// Accumulated angular-velocity Y before clamping
    pub pitch_raw: f32,
    /// Latest gyroscope sample
    pub angular_velocity: TriAxisSample,
    /// Latest accelerometer sample (gravity vector)
    pub acceleration: TriAxisSample,
    /// Latest magnetometer sample (geomagnetic vector)
    pub magnetic_field: TriAxisSample,
}

impl OrientationState {
    /// All-zero state, before any sample has arrived
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest sample stored for `kind`
    pub fn latest(&self, kind: SensorKind) -> TriAxisSample {
        match kind {
            SensorKind::AngularVelocity => self.angular_velocity,
            SensorKind::Acceleration => self.acceleration,
            SensorKind::MagneticField => self.magnetic_field,
        }
    }

    /// Apply one tagged sample in place
    ///
    /// 1. The sample overwrites the slot for its kind.
    /// 2. Angular velocity adds X to roll and Y to the raw pitch, then pitch is
    ///    re-clamped. Non-finite rates are stored but not integrated.
    /// 3. Azimuth is recomputed from the latest acceleration and magnetic
    ///    field regardless of the sample kind, so it may use stale readings.
    ///    Degenerate input leaves the previous azimuth in place.
    pub fn ingest(&mut self, event: SensorEvent) -> IngestOutcome {
        let SensorEvent { kind, sample } = event;

        match kind {
            SensorKind::AngularVelocity => {
                self.angular_velocity = sample;
                if sample.is_finite() {
                    self.roll += sample.x;
                    self.pitch_raw += sample.y;
                    self.pitch = self.pitch_raw.clamp(PITCH_MIN_DEG, PITCH_MAX_DEG);
                } else {
                    warn!("non-finite angular velocity {:?} not integrated", sample);
                }
            }
            SensorKind::Acceleration => self.acceleration = sample,
            SensorKind::MagneticField => self.magnetic_field = sample,
        }

        let azimuth = self.update_azimuth();
        IngestOutcome { kind, azimuth }
    }

    /// Current azimuth from the rotation matrix, if the inputs allow one
    pub fn compute_azimuth(&self) -> Option<f32> {
        let rotation = RotationMatrix::from_gravity_and_geomagnetic(
            self.acceleration.to_vector(),
            self.magnetic_field.to_vector(),
        )?;
        let azimuth = heading_deg_from_rad(rotation.orientation().azimuth);
        azimuth.is_finite().then_some(azimuth)
    }

    /// Magnetic inclination (dip) in degrees, if the inputs allow one
    pub fn inclination_deg(&self) -> Option<f32> {
        let rotation = RotationMatrix::from_gravity_and_geomagnetic(
            self.acceleration.to_vector(),
            self.magnetic_field.to_vector(),
        )?;
        Some(rotation.inclination().to_degrees())
    }

    fn update_azimuth(&mut self) -> AzimuthUpdate {
        match self.compute_azimuth() {
            Some(azimuth) => {
                self.azimuth = azimuth;
                AzimuthUpdate::Updated(azimuth)
            }
            None => {
                trace!(
                    "azimuth skipped: degenerate gravity/geomagnetic input, keeping {}",
                    self.azimuth
                );
                AzimuthUpdate::Skipped
            }
        }
    }
}

/// Pure form of [`OrientationState::ingest`]: consumes a state and returns
/// the updated one
pub fn ingest(
    mut state: OrientationState,
    kind: SensorKind,
    sample: TriAxisSample,
) -> OrientationState {
    state.ingest(SensorEvent::new(kind, sample));
    state
}
