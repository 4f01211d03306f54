//! Input-to-speed mappings for the carriage game

use gantry::prelude::AXIS_MAX;

/// Half-width of the joystick dead zone, in raw axis counts
const DEAD_ZONE: f64 = 1000.0;

/// Map a raw joystick axis reading to a speed percentage.
///
/// Readings within the dead zone around the midpoint give exactly 0. Outside
/// it, the normalized deflection is squared, so small stick movements give
/// fine control while full deflection still reaches 100. The square discards
/// the sign: both extremes map to +100, and direction is decided elsewhere.
pub fn joystick_to_speed(raw: u16) -> f32 {
    let midpoint = f64::from(AXIS_MAX) / 2.0;
    let lower = midpoint - DEAD_ZONE;
    let upper = midpoint + DEAD_ZONE;
    let raw = f64::from(raw);

    if raw >= lower && raw <= upper {
        0.0
    } else if raw > upper {
        let deflection = (raw - upper) / (f64::from(AXIS_MAX) - upper);
        (100.0 * deflection * deflection) as f32
    } else {
        let deflection = (raw - lower) / lower;
        (100.0 * deflection * deflection) as f32
    }
}

/// Map a score to a carriage speed percentage.
///
/// Flat at 10 until a score of 10, then climbs linearly to 100 at a score of
/// 60 and stays there. Not wired into the control loop yet; the run speed is
/// currently fixed.
pub fn score_to_speed(score: u64) -> f32 {
    const BASE_SPEED: f32 = 10.0;
    const MAX_SPEED: f32 = 100.0;
    const START_INCREASE_SCORE: u64 = 10;
    const MAX_SPEED_SCORE: u64 = 60;

    if score < START_INCREASE_SCORE {
        BASE_SPEED
    } else if score >= MAX_SPEED_SCORE {
        MAX_SPEED
    } else {
        let score_range = (MAX_SPEED_SCORE - START_INCREASE_SCORE) as f32;
        let speed_range = MAX_SPEED - BASE_SPEED;
        BASE_SPEED + speed_range * (score - START_INCREASE_SCORE) as f32 / score_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dead_zone_maps_to_zero() {
        assert_eq!(joystick_to_speed(AXIS_MAX / 2), 0.0);
        assert_eq!(joystick_to_speed(AXIS_MAX / 2 - 999), 0.0);
        assert_eq!(joystick_to_speed(AXIS_MAX / 2 + 999), 0.0);
    }

    #[test]
    fn both_extremes_reach_full_speed() {
        assert_relative_eq!(joystick_to_speed(0), 100.0, max_relative = 1e-5);
        assert_relative_eq!(joystick_to_speed(AXIS_MAX), 100.0, max_relative = 1e-5);
    }

    #[test]
    fn quadratic_curve_softens_small_deflections() {
        // Halfway out of the upper range: (0.5)^2 -> 25
        let midpoint = f64::from(AXIS_MAX) / 2.0;
        let upper = midpoint + 1000.0;
        let half_out = (upper + f64::from(AXIS_MAX)) / 2.0;
        let speed = joystick_to_speed(half_out as u16);
        assert_relative_eq!(speed, 25.0, max_relative = 1e-3);
    }

    #[test]
    fn speed_grows_with_deflection() {
        let a = joystick_to_speed(40000);
        let b = joystick_to_speed(50000);
        let c = joystick_to_speed(60000);
        assert!(0.0 < a && a < b && b < c && c < 100.0);

        let d = joystick_to_speed(25000);
        let e = joystick_to_speed(15000);
        let f = joystick_to_speed(5000);
        assert!(0.0 < d && d < e && e < f && f < 100.0);
    }

    #[test]
    fn score_speed_is_flat_then_linear_then_capped() {
        assert_eq!(score_to_speed(0), 10.0);
        assert_eq!(score_to_speed(5), 10.0);
        assert_eq!(score_to_speed(10), 10.0);
        assert_relative_eq!(score_to_speed(35), 55.0);
        assert_eq!(score_to_speed(60), 100.0);
        assert_eq!(score_to_speed(100), 100.0);
    }
}
