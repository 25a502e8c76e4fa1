//! Motion module for stepper-segments.
//!
//! Turns movement requests into motion segments: dominant-axis selection,
//! acceleration curve seeding, per-segment synthesis and splitting of
//! movements that exceed the hardware loop counter.

mod axis;
mod curve;
mod executor;
mod segment;
mod splitter;
mod synthesizer;

pub use axis::{defining_axis_steps, Direction, MovementRequest};
pub use curve::acceleration_curve_value;
pub use executor::SegmentExecutor;
pub use segment::{MotionSegment, Phase, Ramp, SegmentState, WIRE_SIZE};
pub use splitter::{division_count, split, Division, Divisions};
pub use synthesizer::{Plan, SegmentSynthesizer};

use crate::config::units::Hertz;

/// Number of axes every request and segment carries.
pub const MOTOR_COUNT: usize = 8;

/// Loops per physical step: one for the rising and one for the falling edge.
pub const LOOPS_PER_STEP: u32 = 2;

/// Largest defining-axis step count one segment can hold; the hardware loop
/// counter is 16 bits wide and shared by both half-cycles.
pub const MAX_STEPS_PER_SEGMENT: u32 = 65535 / LOOPS_PER_STEP;

/// Fixed-point value of a fraction equal to one; the dominant axis has this.
pub const FRACTION_SCALE: u64 = (1u64 << 32) / LOOPS_PER_STEP as u64;

/// Sub-cycle bits carried by `hires_accel_cycles`.
pub const DELAY_CYCLE_SHIFT: u32 = 5;

/// Clock of the reference real-time consumer.
pub const DEFAULT_TIMER_FREQUENCY: Hertz = Hertz(200_000_000.0);

/// Default hardware step-frequency ceiling.
pub const DEFAULT_FREQUENCY_LIMIT: Hertz = Hertz(1_000_000.0);
