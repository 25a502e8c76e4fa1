//! Motion queue module for stepper-segments.
//!
//! The seam to the real-time consumer: a bounded, ordered channel of
//! segments plus the motor enable line.

mod spsc;

pub use spsc::{play_next, SpscMotionQueue};

use crate::error::Result;
use crate::motion::MotionSegment;

/// Bounded, ordered channel to whatever plays segments back.
///
/// Segments are played in the order they are enqueued. Implementations
/// block instead of failing when full.
pub trait MotionQueue {
    /// Hand a segment to the consumer, blocking while the queue is full.
    fn enqueue(&mut self, segment: MotionSegment) -> Result<()>;

    /// Block until every enqueued segment has finished playing.
    fn wait_queue_empty(&mut self) -> Result<()>;

    /// Switch the motor drivers on or off.
    fn motor_enable(&mut self, on: bool) -> Result<()>;
}

impl<Q: MotionQueue + ?Sized> MotionQueue for &mut Q {
    fn enqueue(&mut self, segment: MotionSegment) -> Result<()> {
        (**self).enqueue(segment)
    }

    fn wait_queue_empty(&mut self) -> Result<()> {
        (**self).wait_queue_empty()
    }

    fn motor_enable(&mut self, on: bool) -> Result<()> {
        (**self).motor_enable(on)
    }
}
