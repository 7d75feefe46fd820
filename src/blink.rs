//! Blink patterns
//!
//! A blink pattern is a short, bounded sequence of timed color steps played
//! once for a transient notification. It never persists as indicator state.

use embassy_time::Duration;
use heapless::Vec;

use crate::color::Rgb;

/// Maximum number of steps in a single pattern
pub const MAX_BLINK_STEPS: usize = 16;

/// One timed step of a blink pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkStep {
    pub color: Rgb,
    pub duration: Duration,
}

impl BlinkStep {
    pub const fn new(color: Rgb, duration: Duration) -> Self {
        Self { color, duration }
    }
}

/// Ordered sequence of steps ending at a resting color
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlinkPattern {
    steps: Vec<BlinkStep, MAX_BLINK_STEPS>,
    /// Explicit resting color; the render target is used when `None`
    rest: Option<Rgb>,
}

impl BlinkPattern {
    /// Create an empty pattern
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
            rest: None,
        }
    }

    /// Single step of `color`
    pub fn pulse(color: Rgb, duration: Duration) -> Self {
        let mut pattern = Self::new();
        let _ = pattern.push(BlinkStep::new(color, duration));
        pattern
    }

    /// `cycles` repetitions of `color` followed by `off`
    ///
    /// Cycles that do not fit into [`MAX_BLINK_STEPS`] are dropped.
    pub fn alternating(color: Rgb, off: Rgb, on_time: Duration, off_time: Duration, cycles: u8) -> Self {
        let mut pattern = Self::new();
        for _ in 0..cycles {
            if pattern.remaining() < 2 {
                break;
            }
            let _ = pattern.push(BlinkStep::new(color, on_time));
            let _ = pattern.push(BlinkStep::new(off, off_time));
        }
        pattern
    }

    /// Set an explicit resting color
    #[must_use]
    pub fn with_rest(mut self, rest: Rgb) -> Self {
        self.rest = Some(rest);
        self
    }

    /// Push a step
    ///
    /// Returns the step back if the pattern is full
    pub fn push(&mut self, step: BlinkStep) -> Result<(), BlinkStep> {
        self.steps.push(step)
    }

    /// Append the steps of another pattern
    ///
    /// Steps that do not fit are dropped and their count is returned as the
    /// error. The resting color of `other` is not copied.
    pub fn append(&mut self, other: &Self) -> Result<(), usize> {
        for (i, step) in other.steps.iter().enumerate() {
            if self.steps.push(*step).is_err() {
                return Err(other.steps.len() - i);
            }
        }
        Ok(())
    }

    pub fn steps(&self) -> &[BlinkStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<BlinkStep> {
        self.steps.get(index).copied()
    }

    pub const fn rest(&self) -> Option<Rgb> {
        self.rest
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps that can still be pushed
    pub fn remaining(&self) -> usize {
        self.steps.capacity() - self.steps.len()
    }

    /// Time from the first step to the resting color
    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .fold(Duration::from_millis(0), |total, step| total + step.duration)
    }
}
