//! Movement requests and dominant-axis selection.

use crate::error::{MotionError, Result};

use super::MOTOR_COUNT;

/// Direction of one axis within a movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive (or zero) step count.
    Forward,
    /// Negative step count; the axis direction bit is set.
    Reverse,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i32) -> Self {
        if steps < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// A linear movement of all axes, already planned upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementRequest {
    /// Signed step count per axis.
    pub steps: [i32; MOTOR_COUNT],

    /// Start speed of the dominant axis.
    pub v0: f32,

    /// End speed of the dominant axis.
    pub v1: f32,

    /// Auxiliary output bits latched with this movement.
    pub aux: u16,
}

impl MovementRequest {
    /// Create a request with no auxiliary bits.
    pub fn new(steps: [i32; MOTOR_COUNT], v0: f32, v1: f32) -> Self {
        Self {
            steps,
            v0,
            v1,
            aux: 0,
        }
    }

    /// Request running on the first axes only; the rest stay at zero.
    pub fn from_axes(axes: &[i32], v0: f32, v1: f32) -> Self {
        let mut steps = [0; MOTOR_COUNT];
        for (slot, &s) in steps.iter_mut().zip(axes) {
            *slot = s;
        }
        Self::new(steps, v0, v1)
    }

    /// Set the auxiliary output bits.
    pub fn with_aux(mut self, aux: u16) -> Self {
        self.aux = aux;
        self
    }

    /// Steps of the axis moving furthest.
    #[inline]
    pub fn defining_axis_steps(&self) -> u32 {
        defining_axis_steps(&self.steps)
    }

    /// Direction of one axis.
    #[inline]
    pub fn direction(&self, axis: usize) -> Direction {
        Direction::from_steps(self.steps[axis])
    }

    /// Check that both speeds are finite and non-negative.
    pub fn validate_speeds(&self) -> Result<()> {
        for v in [self.v0, self.v1] {
            if !v.is_finite() || v < 0.0 {
                return Err(MotionError::InvalidSpeed(v).into());
            }
        }
        Ok(())
    }
}

/// Largest absolute step count over all axes; zero means no motion at all.
pub fn defining_axis_steps(steps: &[i32; MOTOR_COUNT]) -> u32 {
    steps.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defining_axis_is_largest_magnitude() {
        let request = MovementRequest::from_axes(&[10, -300, 200], 0.0, 0.0);
        assert_eq!(request.defining_axis_steps(), 300);
    }

    #[test]
    fn test_all_zero_gives_zero() {
        assert_eq!(defining_axis_steps(&[0; MOTOR_COUNT]), 0);
    }

    #[test]
    fn test_extreme_step_count() {
        let request = MovementRequest::from_axes(&[i32::MIN, i32::MAX], 0.0, 0.0);
        assert_eq!(request.defining_axis_steps(), 1 << 31);
    }

    #[test]
    fn test_direction() {
        let request = MovementRequest::from_axes(&[5, -5, 0], 0.0, 0.0);
        assert_eq!(request.direction(0), Direction::Forward);
        assert_eq!(request.direction(1), Direction::Reverse);
        assert_eq!(request.direction(2), Direction::Forward);
        assert_eq!(Direction::Reverse.sign(), -1);
    }

    #[test]
    fn test_speed_validation() {
        assert!(MovementRequest::from_axes(&[1], 0.0, 10.0).validate_speeds().is_ok());

        let negative = MovementRequest::from_axes(&[1], -1.0, 10.0);
        assert_eq!(
            negative.validate_speeds(),
            Err(Error::Motion(MotionError::InvalidSpeed(-1.0)))
        );

        let nan = MovementRequest::from_axes(&[1], 0.0, f32::NAN);
        assert!(nan.validate_speeds().is_err());
    }
}
