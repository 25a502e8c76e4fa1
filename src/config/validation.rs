//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::LOOPS_PER_STEP;

use super::{SystemConfig, TimingConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Timer frequency is finite and positive
/// - Frequency ceiling is finite, positive and leaves at least one timer
///   cycle per loop
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_timing(&config.timing)
}

/// Validate timer frequency and frequency ceiling.
pub fn validate_timing(timing: &TimingConfig) -> Result<()> {
    if !timing.timer_frequency.is_valid() {
        return Err(Error::Config(ConfigError::InvalidTimerFrequency(
            timing.timer_frequency.0,
        )));
    }

    // A travel loop lasts TIMER / (LOOPS_PER_STEP * v) cycles, which must stay >= 1.
    let max = timing.timer_frequency.0 / LOOPS_PER_STEP as f32;
    let limit = timing.frequency_limit.0;
    if !timing.frequency_limit.is_valid() || limit > max {
        return Err(Error::Config(ConfigError::InvalidFrequencyLimit { limit, max }));
    }

    Ok(())
}
