//! Rotation matrix from gravity and geomagnetic vectors
//!
//! Builds the device-to-world rotation used for compass heading: the world
//! Z axis is aligned with gravity, the world Y axis with the horizontal
//! component of the magnetic field (magnetic north) and X completes the
//! right-handed frame (east).
//!
//! ```text
//!        | Hx Hy Hz |      H = E x A  (east)
//!   R =  | Mx My Mz |      M = A x H  (north)
//!        | Ax Ay Az |      A = gravity (up)
//! ```
//!
//! Construction fails for degenerate input: gravity weaker than a tenth of
//! standard gravity (free fall, or no accelerometer reading yet), a missing
//! magnetic field, a field parallel to gravity, or vectors too large for the
//! intermediate products to stay finite in `f32`.

use nalgebra::{Matrix3, Vector3};

/// Standard gravity (m/s²)
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Squared gravity magnitude below which the device is treated as in free fall
pub const FREE_FALL_GRAVITY_SQUARED: f32 = 0.01 * STANDARD_GRAVITY * STANDARD_GRAVITY;

/// Minimum magnitude of `E x A` for the east vector to be usable
///
/// Below this the field is (close to) zero or collinear with gravity.
pub const MIN_EAST_NORM: f32 = 0.1;

/// Device-to-world rotation plus the matching inclination matrix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMatrix {
    /// Rows are the east, north and up axes expressed in device coordinates
    pub rotation: Matrix3<f32>,
    /// Rotation of the geomagnetic vector into the horizontal plane
    pub inclination: Matrix3<f32>,
}

/// Device orientation angles in radians
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about the world vertical axis, 0 = magnetic north, [-π, π]
    pub azimuth: f32,
    /// Rotation about the device X axis, [-π/2, π/2]
    pub pitch: f32,
    /// Rotation about the device Y axis, [-π, π]
    pub roll: f32,
}

impl RotationMatrix {
    /// Build the rotation from a gravity and a geomagnetic vector
    ///
    /// Returns `None` when the input is degenerate (see module docs) or
    /// contains non-finite components.
    pub fn from_gravity_and_geomagnetic(
        gravity: Vector3<f32>,
        geomagnetic: Vector3<f32>,
    ) -> Option<Self> {
        if !all_finite(&gravity) || !all_finite(&geomagnetic) {
            return None;
        }

        let norm_sq_a = gravity.norm_squared();
        if !norm_sq_a.is_finite() || norm_sq_a < FREE_FALL_GRAVITY_SQUARED {
            return None;
        }

        let h = geomagnetic.cross(&gravity);
        let norm_h = libm::sqrtf(h.norm_squared());
        if !norm_h.is_finite() || norm_h < MIN_EAST_NORM {
            return None;
        }

        let h = h / norm_h;
        let a = gravity / libm::sqrtf(norm_sq_a);
        let m = a.cross(&h);

        #[rustfmt::skip]
        let rotation = Matrix3::new(
            h.x, h.y, h.z,
            m.x, m.y, m.z,
            a.x, a.y, a.z,
        );

        // norm_h >= MIN_EAST_NORM already rules out a zero field
        let inv_e = 1.0 / libm::sqrtf(geomagnetic.norm_squared());
        if inv_e == 0.0 {
            return None;
        }
        let c = geomagnetic.dot(&m) * inv_e;
        let s = geomagnetic.dot(&a) * inv_e;

        #[rustfmt::skip]
        let inclination = Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c,   s,
            0.0, -s,  c,
        );

        if !all_finite_matrix(&rotation) || !all_finite_matrix(&inclination) {
            return None;
        }

        Some(Self {
            rotation,
            inclination,
        })
    }

    /// Extract azimuth, pitch and roll (radians) from the rotation
    pub fn orientation(&self) -> Orientation {
        let r = &self.rotation;
        Orientation {
            azimuth: libm::atan2f(r[(0, 1)], r[(1, 1)]),
            pitch: libm::asinf(-r[(2, 1)]),
            roll: libm::atan2f(-r[(2, 0)], r[(2, 2)]),
        }
    }

    /// Magnetic inclination (dip) in radians
    ///
    /// Negative when the field points below the horizon, as it does in the
    /// northern hemisphere.
    pub fn inclination(&self) -> f32 {
        libm::atan2f(self.inclination[(1, 2)], self.inclination[(1, 1)])
    }
}

fn all_finite(v: &Vector3<f32>) -> bool {
    v.iter().all(|c| c.is_finite())
}

fn all_finite_matrix(m: &Matrix3<f32>) -> bool {
    m.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::RAD_TO_DEG;

    const EPSILON: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32, tol: f32) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_flat_device_pointing_north_is_identity() {
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
        .unwrap();

        let diff = r.rotation - Matrix3::identity();
        assert!(diff.iter().all(|v| v.abs() < EPSILON), "{:?}", r.rotation);

        let o = r.orientation();
        assert_close(o.azimuth, 0.0, EPSILON);
        assert_close(o.pitch, 0.0, EPSILON);
        assert_close(o.roll, 0.0, EPSILON);
    }

    #[test]
    fn test_field_along_x_gives_west_heading() {
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(1.0, 0.0, 0.0),
        )
        .unwrap();

        // atan2(-1, 0) = -90°
        assert_close(r.orientation().azimuth * RAD_TO_DEG, -90.0, 1e-3);
    }

    #[test]
    fn test_field_along_negative_x_gives_east_heading() {
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(-30.0, 0.0, 0.0),
        )
        .unwrap();

        assert_close(r.orientation().azimuth * RAD_TO_DEG, 90.0, 1e-3);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(1.2, -3.4, 8.9),
            Vector3::new(22.0, 5.0, -41.0),
        )
        .unwrap();

        let should_be_identity = r.rotation * r.rotation.transpose();
        let diff = should_be_identity - Matrix3::identity();
        assert!(diff.iter().all(|v| v.abs() < 1e-4), "{:?}", should_be_identity);
    }

    #[test]
    fn test_tilted_device_reports_pitch() {
        // Device rotated 30° about its X axis: gravity has a Y component
        let angle = 30.0_f32.to_radians();
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 9.81 * angle.sin(), 9.81 * angle.cos()),
            Vector3::new(0.0, 20.0, -30.0),
        )
        .unwrap();

        let o = r.orientation();
        assert_close(o.pitch * RAD_TO_DEG, -30.0, 1e-3);
        assert_close(o.roll, 0.0, 1e-4);
    }

    #[test]
    fn test_zero_gravity_fails() {
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::zeros(),
            Vector3::new(0.0, 1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_free_fall_gravity_fails() {
        // 0.9 m/s² is below a tenth of standard gravity
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 0.9),
            Vector3::new(0.0, 30.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_zero_field_fails() {
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::zeros(),
        )
        .is_none());
    }

    #[test]
    fn test_collinear_vectors_fail() {
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(0.0, 0.0, -45.0),
        )
        .is_none());
    }

    #[test]
    fn test_non_finite_input_fails() {
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, f32::NAN, 9.81),
            Vector3::new(0.0, 30.0, 0.0),
        )
        .is_none());
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(f32::INFINITY, 30.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_overflowing_input_fails() {
        // Finite components whose squared norms overflow f32
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 1e20),
            Vector3::new(0.0, 1e20, 0.0),
        )
        .is_none());
        assert!(RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(3e38, 0.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_inclination_of_dipping_field() {
        let dip = 60.0_f32.to_radians();
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(0.0, 50.0 * dip.cos(), -50.0 * dip.sin()),
        )
        .unwrap();

        assert_close(r.inclination() * RAD_TO_DEG, -60.0, 1e-3);
    }

    #[test]
    fn test_horizontal_field_has_zero_inclination() {
        let r = RotationMatrix::from_gravity_and_geomagnetic(
            Vector3::new(0.0, 0.0, 9.81),
            Vector3::new(0.0, 25.0, 0.0),
        )
        .unwrap();

        assert_close(r.inclination(), 0.0, EPSILON);
    }
}
