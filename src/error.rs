//! Error types
//!
//! Every failure in the indicator is local and recoverable. None of these
//! errors is allowed to halt the host firmware.

use core::fmt;

/// Failure reported by an LED strip transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripError {
    /// The transport has not been initialized yet.
    NotReady,
    /// The transport rejected or failed the update.
    Transport,
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => f.write_str("LED strip not ready"),
            Self::Transport => f.write_str("LED strip update failed"),
        }
    }
}

/// A battery sample that cannot be turned into a reading.
///
/// The previous reading stays in effect when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The sampler returned a non-positive millivolt value.
    InvalidSample(i32),
    /// The calibration range is empty or inverted.
    InvalidCalibration,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSample(millivolt) => write!(f, "invalid voltage sample: {millivolt} mV"),
            Self::InvalidCalibration => f.write_str("invalid battery calibration range"),
        }
    }
}
