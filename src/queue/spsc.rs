//! Motion queue backed by a `heapless::spsc` ring buffer.

use embedded_hal::digital::OutputPin;
use heapless::spsc::{Consumer, Producer};

use crate::config::EnableConfig;
use crate::error::{QueueError, Result};
use crate::motion::MotionSegment;

use super::MotionQueue;

/// Producer half of a single-producer single-consumer segment ring.
///
/// The consumer (a timer interrupt, another core or a thread) owns the
/// matching `Consumer` and must leave a segment in the ring until it has
/// finished playing it: peek, play, then dequeue (see [`play_next`]). A
/// slot is only freed once its motion is over, so "drained" means every
/// queued segment has played. Blocking is a busy wait.
///
/// # Example
///
/// ```rust,ignore
/// let mut ring: Queue<MotionSegment, 16> = Queue::new();
/// let (producer, mut consumer) = ring.split();
/// let queue = SpscMotionQueue::new(producer, enable_pin, EnableConfig::default());
///
/// // Consumer side
/// play_next(&mut consumer, |segment| pulse_generator.run(segment));
/// ```
pub struct SpscMotionQueue<'a, EN, const N: usize>
where
    EN: OutputPin,
{
    producer: Producer<'a, MotionSegment, N>,
    enable_pin: EN,
    enable: EnableConfig,
}

impl<'a, EN, const N: usize> SpscMotionQueue<'a, EN, N>
where
    EN: OutputPin,
{
    /// Wrap a producer and the driver enable pin.
    pub fn new(producer: Producer<'a, MotionSegment, N>, enable_pin: EN, enable: EnableConfig) -> Self {
        Self {
            producer,
            enable_pin,
            enable,
        }
    }

    /// Segments waiting in the ring.
    #[inline]
    pub fn pending(&self) -> usize {
        self.producer.len()
    }

    /// Segments the ring can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.producer.capacity()
    }

    /// Give back the producer and the enable pin.
    pub fn release(self) -> (Producer<'a, MotionSegment, N>, EN) {
        (self.producer, self.enable_pin)
    }
}

impl<'a, EN, const N: usize> MotionQueue for SpscMotionQueue<'a, EN, N>
where
    EN: OutputPin,
{
    fn enqueue(&mut self, segment: MotionSegment) -> Result<()> {
        let mut pending = segment;
        loop {
            match self.producer.enqueue(pending) {
                Ok(()) => return Ok(()),
                Err(rejected) => {
                    pending = rejected;
                    relax();
                }
            }
        }
    }

    fn wait_queue_empty(&mut self) -> Result<()> {
        while self.producer.len() > 0 {
            relax();
        }
        Ok(())
    }

    fn motor_enable(&mut self, on: bool) -> Result<()> {
        let result = if self.enable.level_for(on) {
            self.enable_pin.set_high()
        } else {
            self.enable_pin.set_low()
        };
        result.map_err(|_| QueueError::EnablePin)?;
        Ok(())
    }
}

/// Play the oldest queued segment, then release its slot.
///
/// Returns `false` without calling `play` when the ring is empty. The
/// segment stays queued while `play` runs, so a producer waiting for the
/// ring to drain also waits for this playback to finish.
pub fn play_next<const N: usize, F>(consumer: &mut Consumer<'_, MotionSegment, N>, play: F) -> bool
where
    F: FnOnce(&MotionSegment),
{
    let Some(segment) = consumer.peek() else {
        return false;
    };
    play(segment);
    consumer.dequeue().is_some()
}

#[inline]
fn relax() {
    #[cfg(feature = "std")]
    std::thread::yield_now();
    #[cfg(not(feature = "std"))]
    core::hint::spin_loop();
}
