//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_segments::load_config;
///
/// let config = load_config("machine.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

// Keeps the head of long messages instead of dropping them.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Hertz;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, SystemConfig::default());
    }

    #[test]
    fn test_parse_timing() {
        let toml = r#"
[timing]
timer_frequency_hz = 100000000.0
max_frequency_hz = 250000.0

[enable]
active_low = false
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.timing.timer_frequency, Hertz(100_000_000.0));
        assert_eq!(config.timing.frequency_limit, Hertz(250_000.0));
        assert!(!config.enable.active_low);
    }

    #[test]
    fn test_parse_rejects_invalid_limit() {
        let toml = r#"
[timing]
timer_frequency_hz = 1000.0
max_frequency_hz = 1000.0
"#;

        let result = parse_config(toml);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidFrequencyLimit { .. }))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[timing\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/machine.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_truncated_keeps_prefix() {
        let long = "x".repeat(300);
        assert_eq!(truncated(&long).len(), 128);
    }
}
