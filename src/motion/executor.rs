//! Software playback of a segment's DDA.
//!
//! Mirrors what the pulse generator does once per loop: add every axis'
//! fraction to its accumulator and drive the step line from the top bit.
//! Ramp delays are left to the real-time consumer.

use super::segment::{MotionSegment, Phase};
use super::MOTOR_COUNT;

/// Runtime state while playing back one segment.
#[derive(Debug, Clone)]
pub struct SegmentExecutor {
    /// The segment being played back.
    segment: MotionSegment,

    /// Per-axis DDA accumulators.
    accumulators: [u32; MOTOR_COUNT],

    /// Step line levels after the last loop.
    levels: u8,

    /// Loops executed so far.
    current_loop: u32,
}

impl SegmentExecutor {
    /// Create a new executor for a segment.
    pub fn new(segment: MotionSegment) -> Self {
        Self {
            segment,
            accumulators: [0; MOTOR_COUNT],
            levels: 0,
            current_loop: 0,
        }
    }

    /// Check if every loop has run.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_loop >= self.total_loops()
    }

    /// Loops executed so far.
    #[inline]
    pub fn current_loop(&self) -> u32 {
        self.current_loop
    }

    /// Total loops of the segment's active phase.
    #[inline]
    pub fn total_loops(&self) -> u32 {
        u32::from(self.segment.phase.loops())
    }

    /// Get loops remaining.
    #[inline]
    pub fn loops_remaining(&self) -> u32 {
        self.total_loops().saturating_sub(self.current_loop)
    }

    /// Step line levels after the last loop, bit `i` for axis `i`.
    #[inline]
    pub fn levels(&self) -> u8 {
        self.levels
    }

    /// Timer cycles per loop, known up front only while travelling.
    #[inline]
    pub fn delay_cycles(&self) -> Option<u32> {
        match self.segment.phase {
            Phase::Travel { delay_cycles, .. } => Some(delay_cycles),
            _ => None,
        }
    }

    /// Get the segment.
    #[inline]
    pub fn segment(&self) -> &MotionSegment {
        &self.segment
    }

    /// Run one loop.
    ///
    /// Returns the axes whose step line rose in this loop, or `None` once
    /// the segment is complete.
    pub fn advance(&mut self) -> Option<u8> {
        if self.is_complete() {
            return None;
        }
        self.current_loop += 1;

        let mut levels = 0u8;
        for (axis, (acc, &fraction)) in self
            .accumulators
            .iter_mut()
            .zip(&self.segment.fractions)
            .enumerate()
        {
            *acc = acc.wrapping_add(fraction);
            if *acc & 0x8000_0000 != 0 {
                levels |= 1 << axis;
            }
        }

        let rising = levels & !self.levels;
        self.levels = levels;
        Some(rising)
    }

    /// Play the rest of the segment and count the pulses of every axis.
    pub fn run_to_completion(&mut self) -> [u32; MOTOR_COUNT] {
        let mut pulses = [0u32; MOTOR_COUNT];
        while let Some(rising) = self.advance() {
            for (axis, count) in pulses.iter_mut().enumerate() {
                if rising & (1 << axis) != 0 {
                    *count += 1;
                }
            }
        }
        pulses
    }

    /// Reset the executor to the first loop.
    pub fn reset(&mut self) {
        self.accumulators = [0; MOTOR_COUNT];
        self.levels = 0;
        self.current_loop = 0;
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        let total = self.total_loops();
        if total == 0 {
            1.0
        } else {
            self.current_loop as f32 / total as f32
        }
    }
}
