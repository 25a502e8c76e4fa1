//! Motor operations facade over a motion queue.

use crate::config::units::Hertz;
use crate::error::Result;
use crate::motion::{MovementRequest, SegmentSynthesizer};
use crate::queue::MotionQueue;

use super::builder::MotorOperationsBuilder;

/// Feeds movement requests to a motion queue as motion segments.
///
/// Single producer: every call runs on the caller's thread and only ever
/// blocks inside the queue.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_segments::{MotorOperations, MovementRequest};
///
/// let mut ops = MotorOperations::builder()
///     .from_config(&config)
///     .queue(queue)
///     .build()?;
///
/// ops.motor_enable(true)?;
/// ops.enqueue(&MovementRequest::from_axes(&[1000, 500], 0.0, 1000.0))?;
/// ops.wait_queue_empty()?;
/// ```
pub struct MotorOperations<Q>
where
    Q: MotionQueue,
{
    /// Consumer-facing queue.
    queue: Q,
    /// Segment builder holding the timer clock and frequency ceiling.
    synthesizer: SegmentSynthesizer,
}

impl<Q> MotorOperations<Q>
where
    Q: MotionQueue,
{
    /// Create operations over a queue with the given synthesizer.
    pub fn new(queue: Q, synthesizer: SegmentSynthesizer) -> Self {
        Self { queue, synthesizer }
    }

    /// Start building operations.
    pub fn builder() -> MotorOperationsBuilder<Q> {
        MotorOperationsBuilder::new()
    }

    /// Enqueue a movement, split into as many segments as it needs.
    ///
    /// Blocks while the queue is full. Segments are enqueued in playback
    /// order.
    ///
    /// # Errors
    ///
    /// `ZeroLengthMovement` or `InvalidSpeed` before anything is enqueued;
    /// queue errors as reported by the backend.
    pub fn enqueue(&mut self, request: &MovementRequest) -> Result<()> {
        for segment in self.synthesizer.plan(request)? {
            self.queue.enqueue(segment)?;
        }
        Ok(())
    }

    /// Switch the motor drivers once every queued segment has played.
    ///
    /// Never toggles the drivers while a segment is in motion.
    pub fn motor_enable(&mut self, on: bool) -> Result<()> {
        self.queue.wait_queue_empty()?;
        tracing::debug!(on, "motor enable");
        self.queue.motor_enable(on)
    }

    /// Block until every queued segment has finished playing.
    pub fn wait_queue_empty(&mut self) -> Result<()> {
        self.queue.wait_queue_empty()
    }

    /// Change the hardware frequency ceiling once the queue is drained.
    pub fn set_frequency_limit(&mut self, limit: Hertz) -> Result<()> {
        self.queue.wait_queue_empty()?;
        self.synthesizer.set_frequency_limit(limit)
    }

    /// Get the segment synthesizer.
    #[inline]
    pub fn synthesizer(&self) -> &SegmentSynthesizer {
        &self.synthesizer
    }

    /// Get the queue.
    #[inline]
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Get the queue mutably.
    #[inline]
    pub fn queue_mut(&mut self) -> &mut Q {
        &mut self.queue
    }

    /// Give back the queue.
    pub fn into_queue(self) -> Q {
        self.queue
    }
}
