//! Configuration module for stepper-segments.
//!
//! Provides the timing and enable-line configuration, loadable from TOML
//! files (with `std` feature) or built in code.

mod system;
mod timing;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use system::SystemConfig;
pub use timing::{EnableConfig, TimingConfig};
pub use validation::{validate_config, validate_timing};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

pub use units::Hertz;
