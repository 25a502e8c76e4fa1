//! Motor operations module for stepper-segments.
//!
//! The entry point for movement producers: validates and splits movements,
//! synthesizes segments and feeds them to a motion queue.

mod builder;
mod operations;

pub use builder::MotorOperationsBuilder;
pub use operations::MotorOperations;
