//! Timing and enable-line configuration.

use serde::Deserialize;

use crate::motion::{DEFAULT_FREQUENCY_LIMIT, DEFAULT_TIMER_FREQUENCY};

use super::units::Hertz;

/// Clock of the real-time consumer and the step-frequency ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TimingConfig {
    /// Timer frequency the consumer counts delay cycles in.
    #[serde(default = "default_timer_frequency", rename = "timer_frequency_hz")]
    pub timer_frequency: Hertz,

    /// Highest travel speed the hardware can produce, in steps per second.
    #[serde(default = "default_frequency_limit", rename = "max_frequency_hz")]
    pub frequency_limit: Hertz,
}

fn default_timer_frequency() -> Hertz {
    DEFAULT_TIMER_FREQUENCY
}

fn default_frequency_limit() -> Hertz {
    DEFAULT_FREQUENCY_LIMIT
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            timer_frequency: DEFAULT_TIMER_FREQUENCY,
            frequency_limit: DEFAULT_FREQUENCY_LIMIT,
        }
    }
}

/// Motor driver enable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnableConfig {
    /// Drivers are enabled by pulling the line low.
    #[serde(default = "default_active_low")]
    pub active_low: bool,
}

fn default_active_low() -> bool {
    true
}

impl Default for EnableConfig {
    fn default() -> Self {
        Self { active_low: true }
    }
}

impl EnableConfig {
    /// Pin level that corresponds to the requested enable state.
    #[inline]
    pub fn level_for(&self, on: bool) -> bool {
        on != self.active_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_levels() {
        let low = EnableConfig { active_low: true };
        assert!(!low.level_for(true));
        assert!(low.level_for(false));

        let high = EnableConfig { active_low: false };
        assert!(high.level_for(true));
        assert!(!high.level_for(false));
    }
}
