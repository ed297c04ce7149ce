/// Absolute difference between two angles (radians), normalized into `[0, π]`.
pub fn angle_diff_abs(a: f32, b: f32) -> f32 {
    let two_pi = 2.0 * std::f32::consts::PI;
    // Normalize angle difference to [-π, π).
    let mut diff = (b - a).rem_euclid(two_pi);
    if diff >= std::f32::consts::PI {
        diff -= two_pi;
    }
    diff.abs()
}

/// Check whether two directions (angles in radians) are approximately
/// orthogonal within `tolerance`. Works for axes defined modulo π: two
/// diagonal axes are orthogonal exactly when their plain angular difference
/// is π/2.
pub fn is_orthogonal(reference_angle: f32, other_angle: f32, tolerance: f32) -> bool {
    let diff_abs = angle_diff_abs(reference_angle, other_angle);
    (std::f32::consts::FRAC_PI_2 - diff_abs).abs() <= tolerance.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn orthogonality_for_diagonal_axes() {
        let tol = 1e-3;
        assert!(is_orthogonal(0.0, FRAC_PI_2, tol));
        assert!(is_orthogonal(FRAC_PI_4, 3.0 * FRAC_PI_4, tol));
        // wrap around the π boundary
        assert!(is_orthogonal(3.0, 3.0 + FRAC_PI_2 - PI, tol));
        // clearly not orthogonal
        assert!(!is_orthogonal(0.0, 0.25, 0.05));
        assert!(!is_orthogonal(FRAC_PI_4, FRAC_PI_4, 0.05));
    }

    #[test]
    fn angle_difference_is_symmetric_and_wrapped() {
        assert_abs_diff_eq!(angle_diff_abs(0.1, 6.2), 0.18318531, epsilon = 1e-5);
        assert_eq!(angle_diff_abs(1.0, 1.0), 0.0);
        assert_abs_diff_eq!(
            angle_diff_abs(0.2, 1.2),
            angle_diff_abs(1.2, 0.2),
            epsilon = 1e-6
        );
    }
}
