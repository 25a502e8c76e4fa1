//! Constant-acceleration ramp timing.
//!
//! Delay of the n-th loop of a ramp starting from rest, using
//! `delay(n) = C * (sqrt(n + 1) - sqrt(n))` so the real-time consumer never
//! takes a square root itself. See David Austin, "Generate stepper-motor
//! speed profiles in real time".

use libm::sqrtf;

use crate::config::units::Hertz;

use super::LOOPS_PER_STEP;

/// The series is far off on its first term; this factor pulls it back.
const FIRST_STEP_CORRECTION: f32 = 0.67605;

/// Timer cycles for loop `index` of a ramp with the given acceleration.
///
/// `acceleration` is in steps per time unit squared and must be > 0.
pub fn acceleration_curve_value(index: u32, acceleration: f32, timer_frequency: Hertz) -> f32 {
    debug_assert!(acceleration > 0.0, "ramp needs a positive acceleration");

    let loops = LOOPS_PER_STEP as f32;
    let accel_factor = timer_frequency.0 * sqrtf(loops * 2.0 / acceleration) / loops;
    let c0 = if index == 0 {
        accel_factor * FIRST_STEP_CORRECTION
    } else {
        accel_factor
    };

    // sqrt(n + 1) - sqrt(n) in its conjugate form; the difference cancels to
    // zero in f32 once n passes 2^24.
    let n = index as f32;
    c0 / (sqrtf(n + 1.0) + sqrtf(n))
}
