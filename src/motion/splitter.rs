//! Splitting of movements longer than one segment can hold.
//!
//! Every division gets an equal share of each axis, tracked in 32.32 fixed
//! point so the integer deltas add up to exactly the requested steps. Speeds
//! follow one constant acceleration for the whole movement, computed in
//! double precision: squared speeds get large and single precision drifts
//! far enough that a stop no longer lands on zero.

use libm::sqrt;

use super::axis::{defining_axis_steps, MovementRequest};
use super::{MAX_STEPS_PER_SEGMENT, MOTOR_COUNT};

/// One piece of a split movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Division {
    /// Step deltas and entry/exit speeds of this piece.
    pub request: MovementRequest,
    /// Defining-axis steps of this piece alone.
    pub defining_axis_steps: u32,
}

/// Number of divisions a movement with this defining-axis step count needs.
#[inline]
pub fn division_count(defining_axis_steps: u32) -> u32 {
    defining_axis_steps / MAX_STEPS_PER_SEGMENT + 1
}

/// Divide a movement into pieces of at most `MAX_STEPS_PER_SEGMENT` steps.
///
/// `defining_axis_steps` is the step count of the whole movement's dominant
/// axis and must be non-zero.
pub fn split(request: &MovementRequest, defining_axis_steps: u32) -> Divisions {
    let divisions = division_count(defining_axis_steps);

    let v0 = f64::from(request.v0);
    let v1 = f64::from(request.v1);
    let acceleration = (v1 * v1 - v0 * v0) / (2.0 * f64::from(defining_axis_steps));

    let mut hires_step_per_division = [0i64; MOTOR_COUNT];
    for (hires, &steps) in hires_step_per_division.iter_mut().zip(&request.steps) {
        // +1 so truncation never leaves the total one step short.
        *hires = (i64::from(steps) << 32) / i64::from(divisions) + 1;
    }

    Divisions {
        hires_step_per_division,
        accumulator: [0; MOTOR_COUNT],
        position: [0; MOTOR_COUNT],
        acceleration,
        speed: v0,
        final_speed: v1,
        aux: request.aux,
        remaining: divisions,
    }
}

/// Finite sequence of divisions, produced in playback order.
#[derive(Debug, Clone)]
pub struct Divisions {
    hires_step_per_division: [i64; MOTOR_COUNT],
    accumulator: [i64; MOTOR_COUNT],
    position: [i32; MOTOR_COUNT],
    acceleration: f64,
    speed: f64,
    final_speed: f64,
    aux: u16,
    remaining: u32,
}

impl Divisions {
    /// Constant acceleration shared by all divisions (negative when slowing).
    #[inline]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }
}

impl Iterator for Divisions {
    type Item = Division;

    fn next(&mut self) -> Option<Division> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let mut steps = [0i32; MOTOR_COUNT];
        for i in 0..MOTOR_COUNT {
            self.accumulator[i] += self.hires_step_per_division[i];
            let position = (self.accumulator[i] >> 32) as i32;
            steps[i] = position - self.position[i];
            self.position[i] = position;
        }
        let division_steps = defining_axis_steps(&steps);

        let v0 = self.speed;
        let v1 = if self.remaining == 0 {
            self.final_speed
        } else {
            // v1^2 = v0^2 + 2as; rounding can push it just below zero at a stop.
            let v1_squared = v0 * v0 + 2.0 * self.acceleration * f64::from(division_steps);
            if v1_squared > 0.0 {
                sqrt(v1_squared)
            } else {
                0.0
            }
        };
        self.speed = v1;

        Some(Division {
            request: MovementRequest {
                steps,
                v0: v0 as f32,
                v1: v1 as f32,
                aux: self.aux,
            },
            defining_axis_steps: division_steps,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Divisions {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums(request: &MovementRequest) -> [i64; MOTOR_COUNT] {
        let mut total = [0i64; MOTOR_COUNT];
        for division in split(request, request.defining_axis_steps()) {
            for (t, s) in total.iter_mut().zip(division.request.steps) {
                *t += i64::from(s);
            }
        }
        total
    }

    #[test]
    fn test_division_count() {
        assert_eq!(division_count(32766), 1);
        assert_eq!(division_count(32767), 2);
        assert_eq!(division_count(100_000), 4);
    }

    #[test]
    fn test_steps_are_conserved() {
        let request = MovementRequest::from_axes(&[100_000, -77_777, 3, 0, -1], 100.0, 100.0);
        let total = sums(&request);
        for (t, s) in total.iter().zip(request.steps) {
            assert_eq!(*t, i64::from(s));
        }
    }

    #[test]
    fn test_even_split() {
        let request = MovementRequest::from_axes(&[100_000], 100.0, 100.0);
        let divisions: Vec<_> = split(&request, 100_000).collect();
        assert_eq!(divisions.len(), 4);
        for division in &divisions {
            assert_eq!(division.defining_axis_steps, 25_000);
            assert!(division.defining_axis_steps <= MAX_STEPS_PER_SEGMENT);
        }
    }

    #[test]
    fn test_speeds_chain() {
        let request = MovementRequest::from_axes(&[200_000, 50_000], 0.0, 4000.0);
        let divisions: Vec<_> = split(&request, 200_000).collect();

        assert_eq!(divisions[0].request.v0, 0.0);
        for pair in divisions.windows(2) {
            assert_eq!(pair[0].request.v1, pair[1].request.v0);
            assert!(pair[0].request.v1 < pair[1].request.v1);
        }
        assert_eq!(divisions.last().unwrap().request.v1, 4000.0);
    }

    #[test]
    fn test_stop_lands_on_zero() {
        let request = MovementRequest::from_axes(&[-123_457, 99_999], 500.0, 0.0);
        let divisions: Vec<_> = split(&request, 123_457).collect();
        let last = divisions.last().unwrap();
        assert_eq!(last.request.v1, 0.0);
        assert!(divisions.iter().all(|d| d.request.v1.is_finite() && d.request.v1 >= 0.0));
    }

    #[test]
    fn test_exact_size() {
        let request = MovementRequest::from_axes(&[70_000], 10.0, 10.0);
        let mut divisions = split(&request, 70_000);
        assert_eq!(divisions.len(), 3);
        divisions.next();
        assert_eq!(divisions.len(), 2);
    }

    #[test]
    fn test_aux_reaches_every_division() {
        let request = MovementRequest::from_axes(&[70_000], 10.0, 10.0).with_aux(0x5A);
        assert!(split(&request, 70_000).all(|d| d.request.aux == 0x5A));
    }
}
