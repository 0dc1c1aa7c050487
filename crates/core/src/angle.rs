//! Angle helpers
//!
//! Radian-to-degree conversion and wrapping used by the heading computation.

use core::f32::consts::PI;

pub const RAD_TO_DEG: f32 = 180.0 / PI;

/// Wrap an angle in degrees to [0, 360)
pub fn wrap_360(deg: f32) -> f32 {
    let wrapped = deg - 360.0 * libm::floorf(deg / 360.0);
    // floorf can leave exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert a heading in radians (as returned by `atan2`) to compass degrees
///
/// Negative angles have 360 added so the result lies in [0, 360).
pub fn heading_deg_from_rad(rad: f32) -> f32 {
    wrap_360(rad * RAD_TO_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_wrap_360() {
        assert!((wrap_360(0.0) - 0.0).abs() < EPSILON);
        assert!((wrap_360(370.0) - 10.0).abs() < EPSILON);
        assert!((wrap_360(-10.0) - 350.0).abs() < EPSILON);
        assert!((wrap_360(720.0) - 0.0).abs() < EPSILON);
        assert!(wrap_360(-1e-7) < 360.0);
    }

    #[test]
    fn test_heading_from_negative_radians() {
        let deg = heading_deg_from_rad(-PI / 2.0);
        assert!((deg - 270.0).abs() < EPSILON, "got {}", deg);
    }

    #[test]
    fn test_heading_from_positive_radians() {
        let deg = heading_deg_from_rad(PI / 4.0);
        assert!((deg - 45.0).abs() < EPSILON, "got {}", deg);
    }

    #[test]
    fn test_heading_tiny_negative_stays_below_360() {
        let deg = heading_deg_from_rad(-1e-9);
        assert!((0.0..360.0).contains(&deg), "got {}", deg);
    }
}
