//! Unit types for physical quantities.
//!
//! Keeps timer clocks and step-rate ceilings apart from raw `f32` speeds
//! at the configuration boundary.

use core::ops::{Div, Mul};

use serde::Deserialize;

/// Frequency in hertz.
///
/// Used for the timer clock of the real-time consumer and for the hardware
/// step-frequency ceiling.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Hertz(pub f32);

impl Hertz {
    /// Create a new Hertz value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Create from kilohertz.
    #[inline]
    pub fn khz(value: f32) -> Self {
        Self(value * 1_000.0)
    }

    /// Create from megahertz.
    #[inline]
    pub fn mhz(value: f32) -> Self {
        Self(value * 1_000_000.0)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Check that the frequency is finite and strictly positive.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Smaller of two frequencies.
    #[inline]
    pub fn min(self, other: Hertz) -> Hertz {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }
}

impl Mul<f32> for Hertz {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<f32> for Hertz {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(Hertz::mhz(200.0), Hertz(200_000_000.0));
        assert_eq!(Hertz::khz(50.0).value(), 50_000.0);
    }

    #[test]
    fn test_validity() {
        assert!(Hertz(1.0).is_valid());
        assert!(!Hertz(0.0).is_valid());
        assert!(!Hertz(-5.0).is_valid());
        assert!(!Hertz(f32::INFINITY).is_valid());
        assert!(!Hertz(f32::NAN).is_valid());
    }

    #[test]
    fn test_min() {
        assert_eq!(Hertz(3.0).min(Hertz(2.0)), Hertz(2.0));
        assert_eq!((Hertz(3.0) * 2.0) / 3.0, Hertz(2.0));
    }
}
