//! Segment synthesis: one movement that fits the hardware becomes one
//! segment of direction bits, DDA fractions and a single timing phase.

use libm::roundf;

use crate::config::units::Hertz;
use crate::config::{validate_timing, TimingConfig};
use crate::error::{MotionError, Result};

use super::axis::MovementRequest;
use super::curve::acceleration_curve_value;
use super::segment::{MotionSegment, Phase, Ramp, SegmentState};
use super::splitter::{split, Divisions};
use super::{DELAY_CYCLE_SHIFT, FRACTION_SCALE, LOOPS_PER_STEP, MAX_STEPS_PER_SEGMENT, MOTOR_COUNT};

/// Builds motion segments for one timer clock and frequency ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentSynthesizer {
    timing: TimingConfig,
}

impl SegmentSynthesizer {
    /// Create a synthesizer for validated timing.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer frequency or ceiling is invalid.
    pub fn new(timing: TimingConfig) -> Result<Self> {
        validate_timing(&timing)?;
        Ok(Self { timing })
    }

    /// Current timing configuration.
    #[inline]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Replace the frequency ceiling.
    ///
    /// Callers with segments in flight must drain the queue first.
    pub fn set_frequency_limit(&mut self, limit: Hertz) -> Result<()> {
        let timing = TimingConfig {
            frequency_limit: limit,
            ..self.timing
        };
        validate_timing(&timing)?;
        self.timing = timing;
        Ok(())
    }

    /// Turn a movement request into the segments that play it back, in order.
    ///
    /// Movements whose dominant axis exceeds `MAX_STEPS_PER_SEGMENT` are split
    /// into divisions with continuous speed.
    ///
    /// # Errors
    ///
    /// `ZeroLengthMovement` if no axis moves, `InvalidSpeed` for a negative
    /// or non-finite speed. Nothing is produced in either case.
    pub fn plan(&self, request: &MovementRequest) -> Result<Plan> {
        let defining_axis_steps = request.defining_axis_steps();
        if defining_axis_steps == 0 {
            tracing::warn!("zero steps, ignoring movement");
            return Err(MotionError::ZeroLengthMovement.into());
        }
        request.validate_speeds()?;

        let pending = if defining_axis_steps <= MAX_STEPS_PER_SEGMENT {
            Pending::Single(Some((*request, defining_axis_steps)))
        } else {
            let divisions = split(request, defining_axis_steps);
            tracing::debug!(
                defining_axis_steps,
                divisions = divisions.len(),
                "splitting movement"
            );
            Pending::Split(divisions)
        };

        Ok(Plan {
            synthesizer: *self,
            pending,
        })
    }

    /// Build the single segment for a movement that fits the hardware.
    ///
    /// `defining_axis_steps` must be the request's dominant step count, in
    /// `1..=MAX_STEPS_PER_SEGMENT`.
    pub fn synthesize(&self, request: &MovementRequest, defining_axis_steps: u32) -> MotionSegment {
        debug_assert!(defining_axis_steps > 0 && defining_axis_steps <= MAX_STEPS_PER_SEGMENT);

        let mut direction_bits = 0u8;
        let mut fractions = [0u32; MOTOR_COUNT];
        for (axis, (&steps, fraction)) in request.steps.iter().zip(fractions.iter_mut()).enumerate() {
            if steps < 0 {
                direction_bits |= 1 << axis;
            }
            let delta = u64::from(steps.unsigned_abs());
            *fraction = (delta * FRACTION_SCALE / u64::from(defining_axis_steps)) as u32;
        }

        let loops = (LOOPS_PER_STEP * defining_axis_steps) as u16;
        let v0_squared = request.v0 * request.v0;
        let v1_squared = request.v1 * request.v1;
        let distance = 2.0 * defining_axis_steps as f32;

        // Comparing squares keeps the ramp branches' acceleration strictly positive.
        let phase = if v0_squared == v1_squared {
            Phase::Travel {
                loops,
                delay_cycles: self.travel_delay_cycles(request.v0),
            }
        } else if v0_squared < v1_squared {
            // a = (v1^2 - v0^2) / 2s
            let acceleration = (v1_squared - v0_squared) / distance;
            Phase::Accelerate(self.ramp(loops, v0_squared, acceleration))
        } else {
            let acceleration = (v0_squared - v1_squared) / distance;
            Phase::Decelerate(self.ramp(loops, v0_squared, acceleration))
        };

        let segment = MotionSegment {
            direction_bits,
            fractions,
            phase,
            aux: request.aux,
            state: SegmentState::Filled,
        };
        tracing::trace!(direction_bits, phase = ?segment.phase, "segment synthesized");
        segment
    }

    fn travel_delay_cycles(&self, speed: f32) -> u32 {
        let speed = speed.min(self.timing.frequency_limit.0);
        round_cycles(self.timing.timer_frequency.0 / (LOOPS_PER_STEP as f32 * speed))
    }

    fn ramp(&self, loops: u16, v0_squared: f32, acceleration: f32) -> Ramp {
        debug_assert!(acceleration > 0.0);

        // Loops a ramp from rest would have needed to reach v0.
        let series_index = round_cycles(LOOPS_PER_STEP as f32 * v0_squared / (2.0 * acceleration));
        let delay = acceleration_curve_value(series_index, acceleration, self.timing.timer_frequency);

        Ramp {
            loops,
            series_index,
            hires_cycles: round_cycles((1u32 << DELAY_CYCLE_SHIFT) as f32 * delay),
        }
    }
}

/// 2^32, the first value a 32-bit cycle count cannot hold.
const CYCLE_LIMIT: f32 = 4_294_967_296.0;

// Speeds or ramps too slow for 32-bit timer counts clamp to u32::MAX.
fn round_cycles(value: f32) -> u32 {
    let rounded = roundf(value);
    if rounded >= CYCLE_LIMIT {
        tracing::warn!(value, "too slow for the timer, clamping to u32::MAX");
        return u32::MAX;
    }
    rounded as u32
}

enum Pending {
    Single(Option<(MovementRequest, u32)>),
    Split(Divisions),
}

/// Segments for one movement request, produced lazily in playback order.
pub struct Plan {
    synthesizer: SegmentSynthesizer,
    pending: Pending,
}

impl Plan {
    /// Whether the movement had to be split.
    pub fn is_split(&self) -> bool {
        matches!(self.pending, Pending::Split(_))
    }
}

impl Iterator for Plan {
    type Item = MotionSegment;

    fn next(&mut self) -> Option<MotionSegment> {
        let synthesizer = &self.synthesizer;
        match &mut self.pending {
            Pending::Single(single) => single
                .take()
                .map(|(request, steps)| synthesizer.synthesize(&request, steps)),
            Pending::Split(divisions) => loop {
                let division = divisions.next()?;
                // Every division gets at least D / divisions >= 1 steps on the
                // dominant axis, so this only guards against a changed split.
                if division.defining_axis_steps == 0 {
                    tracing::warn!("zero steps in division, skipping it");
                    continue;
                }
                return Some(synthesizer.synthesize(&division.request, division.defining_axis_steps));
            },
        }
    }
}
