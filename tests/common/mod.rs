#![allow(dead_code)]

use std::cell::Cell;

use myrtio_status_indicator::{Instant, LedStrip, Rgb, StripError, VoltageSampler};

/// Strip that records every frame it receives
#[derive(Debug)]
pub struct MockStrip {
    pub frames: Vec<Vec<Rgb>>,
    pub attempts: usize,
    pub ready: bool,
    pub fail: bool,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            attempts: 0,
            ready: true,
            fail: false,
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// First pixel of every successful write
    pub fn colors(&self) -> Vec<Rgb> {
        self.frames.iter().map(|frame| frame[0]).collect()
    }

    pub fn writes(&self) -> usize {
        self.frames.len()
    }

    pub fn last(&self) -> Option<Rgb> {
        self.frames.last().map(|frame| frame[0])
    }
}

impl LedStrip for MockStrip {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write(&mut self, colors: &[Rgb]) -> Result<(), StripError> {
        self.attempts += 1;
        if self.fail {
            return Err(StripError::Transport);
        }
        self.frames.push(colors.to_vec());
        Ok(())
    }
}

/// Sampler that always reports the same voltage and counts reads
pub struct FixedSampler {
    pub millivolt: i32,
    pub reads: usize,
}

impl FixedSampler {
    pub fn new(millivolt: i32) -> Self {
        Self { millivolt, reads: 0 }
    }
}

impl VoltageSampler for FixedSampler {
    fn read_millivolts(&mut self) -> i32 {
        self.reads += 1;
        self.millivolt
    }
}

/// Sampler state that stays observable while a scheduler owns the sampler
#[derive(Debug, Default)]
pub struct SharedVoltage {
    pub millivolt: Cell<i32>,
    pub reads: Cell<usize>,
}

impl SharedVoltage {
    pub fn new(millivolt: i32) -> Self {
        Self {
            millivolt: Cell::new(millivolt),
            reads: Cell::new(0),
        }
    }

    pub fn sampler(&self) -> SharedSampler<'_> {
        SharedSampler { voltage: self }
    }
}

pub struct SharedSampler<'a> {
    voltage: &'a SharedVoltage,
}

impl VoltageSampler for SharedSampler<'_> {
    fn read_millivolts(&mut self) -> i32 {
        self.voltage.reads.set(self.voltage.reads.get() + 1);
        self.voltage.millivolt.get()
    }
}

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}
