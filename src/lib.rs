//! # stepper-segments
//!
//! Turns multi-axis stepper movements into fixed-point motion segments for a
//! real-time pulse generator.
//!
//! ## Features
//!
//! - **DDA fractions**: every axis is paced as a 32-bit fraction of the
//!   dominant axis, one shared loop clock for all motors
//! - **Ramp seeding**: acceleration and deceleration segments carry the
//!   series index and delay seed, so playback never takes a square root
//! - **Transparent splitting**: long movements are cut to fit the 16-bit loop
//!   counter with exact step totals and continuous speed
//! - **Frequency ceiling**: travel speeds are clipped to what the hardware
//!   can produce
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_segments::{MotorOperations, MovementRequest, SystemConfig};
//!
//! let config: SystemConfig = stepper_segments::load_config("machine.toml")?;
//!
//! let mut ops = MotorOperations::builder()
//!     .from_config(&config)
//!     .queue(queue)
//!     .build()?;
//!
//! ops.motor_enable(true)?;
//! ops.enqueue(&MovementRequest::from_axes(&[100_000, -40_000], 0.0, 8000.0))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Derives `defmt::Format` on segments and errors

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod ops;
pub mod queue;

// Re-exports for ergonomic API
pub use config::{validate_config, EnableConfig, SystemConfig, TimingConfig};
pub use error::{Error, Result};
pub use motion::{
    MotionSegment, MovementRequest, Phase, SegmentExecutor, SegmentSynthesizer, MOTOR_COUNT,
};
pub use ops::{MotorOperations, MotorOperationsBuilder};
pub use queue::{play_next, MotionQueue, SpscMotionQueue};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::Hertz;
