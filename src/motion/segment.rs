//! Motion segments handed to the real-time consumer.

use super::MOTOR_COUNT;

/// Size of a segment in the packed wire layout.
pub const WIRE_SIZE: usize = 2 + 4 * 2 + 3 * 4 + MOTOR_COUNT * 4;

/// Slot state as seen by the consumer's ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SegmentState {
    /// Free slot.
    #[default]
    Empty = 0,
    /// Ready for playback.
    Filled = 1,
}

/// Seed for a ramp phase; the consumer derives successive delays from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ramp {
    /// Loops in this phase.
    pub loops: u16,
    /// Loops it would have taken to reach the entry speed from rest.
    pub series_index: u32,
    /// Delay at `series_index`, in timer cycles shifted by `DELAY_CYCLE_SHIFT`.
    pub hires_cycles: u32,
}

/// Timing program of a segment. Exactly one phase is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Speeding up along the ramp.
    Accelerate(Ramp),
    /// Constant speed.
    Travel {
        /// Loops in this phase.
        loops: u16,
        /// Timer cycles per loop.
        delay_cycles: u32,
    },
    /// Slowing down along the ramp.
    Decelerate(Ramp),
}

impl Phase {
    /// Loops of the active phase.
    #[inline]
    pub fn loops(&self) -> u16 {
        match *self {
            Phase::Accelerate(ramp) | Phase::Decelerate(ramp) => ramp.loops,
            Phase::Travel { loops, .. } => loops,
        }
    }

    /// Ramp seed, if this is a ramp phase.
    #[inline]
    pub fn ramp(&self) -> Option<&Ramp> {
        match self {
            Phase::Accelerate(ramp) | Phase::Decelerate(ramp) => Some(ramp),
            Phase::Travel { .. } => None,
        }
    }
}

/// One indivisible unit of work for the real-time consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSegment {
    /// Bit `i` set iff axis `i` moves in the negative direction.
    pub direction_bits: u8,

    /// Per-axis DDA increment, `FRACTION_SCALE` for the dominant axis.
    pub fractions: [u32; MOTOR_COUNT],

    /// Active timing phase.
    pub phase: Phase,

    /// Auxiliary output bits, copied from the request.
    pub aux: u16,

    /// Slot state.
    pub state: SegmentState,
}

impl MotionSegment {
    /// Loops of the acceleration phase, zero if inactive.
    #[inline]
    pub fn loops_accel(&self) -> u16 {
        match self.phase {
            Phase::Accelerate(ramp) => ramp.loops,
            _ => 0,
        }
    }

    /// Loops of the travel phase, zero if inactive.
    #[inline]
    pub fn loops_travel(&self) -> u16 {
        match self.phase {
            Phase::Travel { loops, .. } => loops,
            _ => 0,
        }
    }

    /// Loops of the deceleration phase, zero if inactive.
    #[inline]
    pub fn loops_decel(&self) -> u16 {
        match self.phase {
            Phase::Decelerate(ramp) => ramp.loops,
            _ => 0,
        }
    }

    /// Timer cycles per travel loop, zero outside travel.
    #[inline]
    pub fn travel_delay_cycles(&self) -> u32 {
        match self.phase {
            Phase::Travel { delay_cycles, .. } => delay_cycles,
            _ => 0,
        }
    }

    /// Ramp series index, zero during travel.
    #[inline]
    pub fn accel_series_index(&self) -> u32 {
        self.phase.ramp().map(|r| r.series_index).unwrap_or(0)
    }

    /// Ramp delay seed, zero during travel.
    #[inline]
    pub fn hires_accel_cycles(&self) -> u32 {
        self.phase.ramp().map(|r| r.hires_cycles).unwrap_or(0)
    }

    /// Whether axis `axis` moves in the negative direction.
    #[inline]
    pub fn is_reverse(&self, axis: usize) -> bool {
        self.direction_bits & (1 << axis) != 0
    }

    /// Packed little-endian layout read by the pulse generator firmware.
    ///
    /// Order: state, direction bits, accel/travel/decel loops, aux, series
    /// index, hires accel cycles, travel delay cycles, fractions.
    pub fn to_wire(&self) -> [u8; WIRE_SIZE] {
        let mut out = [0u8; WIRE_SIZE];
        let mut at = 0;
        let mut put = |bytes: &[u8]| {
            out[at..at + bytes.len()].copy_from_slice(bytes);
            at += bytes.len();
        };

        put(&[self.state as u8, self.direction_bits]);
        put(&self.loops_accel().to_le_bytes());
        put(&self.loops_travel().to_le_bytes());
        put(&self.loops_decel().to_le_bytes());
        put(&self.aux.to_le_bytes());
        put(&self.accel_series_index().to_le_bytes());
        put(&self.hires_accel_cycles().to_le_bytes());
        put(&self.travel_delay_cycles().to_le_bytes());
        for fraction in &self.fractions {
            put(&fraction.to_le_bytes());
        }

        out
    }
}
