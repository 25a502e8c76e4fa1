//! System configuration - root configuration structure.

use serde::Deserialize;

use super::timing::{EnableConfig, TimingConfig};

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SystemConfig {
    /// Timer clock and frequency ceiling.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Motor enable line polarity.
    #[serde(default)]
    pub enable: EnableConfig,
}

impl SystemConfig {
    /// Configuration with the given timing and default enable polarity.
    pub fn with_timing(timing: TimingConfig) -> Self {
        Self {
            timing,
            enable: EnableConfig::default(),
        }
    }
}
