//! Builder pattern for MotorOperations.

use crate::config::units::Hertz;
use crate::config::{SystemConfig, TimingConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::SegmentSynthesizer;
use crate::queue::MotionQueue;

use super::operations::MotorOperations;

/// Builder for creating MotorOperations instances.
pub struct MotorOperationsBuilder<Q>
where
    Q: MotionQueue,
{
    queue: Option<Q>,
    timing: TimingConfig,
}

impl<Q> Default for MotorOperationsBuilder<Q>
where
    Q: MotionQueue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> MotorOperationsBuilder<Q>
where
    Q: MotionQueue,
{
    /// Create a new builder with default timing.
    pub fn new() -> Self {
        Self {
            queue: None,
            timing: TimingConfig::default(),
        }
    }

    /// Set the motion queue.
    pub fn queue(mut self, queue: Q) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Set the timer frequency of the real-time consumer.
    pub fn timer_frequency(mut self, frequency: Hertz) -> Self {
        self.timing.timer_frequency = frequency;
        self
    }

    /// Set the hardware frequency ceiling.
    pub fn frequency_limit(mut self, limit: Hertz) -> Self {
        self.timing.frequency_limit = limit;
        self
    }

    /// Configure from a TimingConfig.
    pub fn from_timing(mut self, timing: &TimingConfig) -> Self {
        self.timing = *timing;
        self
    }

    /// Configure from a SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.from_timing(&config.timing)
    }

    /// Build the MotorOperations.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue is missing or the timing is invalid.
    pub fn build(self) -> Result<MotorOperations<Q>> {
        let queue = self
            .queue
            .ok_or(Error::Config(ConfigError::MissingField("queue")))?;

        let synthesizer = SegmentSynthesizer::new(self.timing)?;

        Ok(MotorOperations::new(queue, synthesizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionSegment;

    struct NullQueue;

    impl MotionQueue for NullQueue {
        fn enqueue(&mut self, _segment: MotionSegment) -> Result<()> {
            Ok(())
        }

        fn wait_queue_empty(&mut self) -> Result<()> {
            Ok(())
        }

        fn motor_enable(&mut self, _on: bool) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let ops = MotorOperationsBuilder::new().queue(NullQueue).build().unwrap();
        assert_eq!(*ops.synthesizer().timing(), TimingConfig::default());
    }

    #[test]
    fn test_missing_queue() {
        let result = MotorOperationsBuilder::<NullQueue>::new().build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("queue")))
        ));
    }

    #[test]
    fn test_custom_timing() {
        let ops = MotorOperationsBuilder::new()
            .queue(NullQueue)
            .timer_frequency(Hertz::mhz(100.0))
            .frequency_limit(Hertz::khz(200.0))
            .build()
            .unwrap();

        let timing = ops.synthesizer().timing();
        assert_eq!(timing.timer_frequency, Hertz::mhz(100.0));
        assert_eq!(timing.frequency_limit, Hertz::khz(200.0));
    }

    #[test]
    fn test_from_config() {
        let config = SystemConfig::with_timing(TimingConfig {
            timer_frequency: Hertz::mhz(16.0),
            frequency_limit: Hertz::khz(40.0),
        });
        let ops = MotorOperationsBuilder::new()
            .from_config(&config)
            .queue(NullQueue)
            .build()
            .unwrap();
        assert_eq!(ops.synthesizer().timing(), &config.timing);
    }

    #[test]
    fn test_invalid_timing_fails_build() {
        let result = MotorOperationsBuilder::new()
            .queue(NullQueue)
            .timer_frequency(Hertz::khz(1.0))
            .frequency_limit(Hertz::khz(1.0))
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidFrequencyLimit { .. }))
        ));
    }
}
