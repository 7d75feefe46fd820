//! Battery classifier
//!
//! Converts a raw millivolt sample into a charge percentage and a low-battery
//! flag by linear interpolation between two calibration points.

use crate::config::BatteryCalibration;
use crate::error::Unavailable;

/// Battery state derived from a single voltage sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryReading {
    /// Sampled voltage, 0 until the first valid sample arrives
    pub millivolt: u16,
    /// Charge level (0-100)
    pub percentage: u8,
    /// Voltage is below the low threshold
    pub is_low: bool,
}

impl BatteryReading {
    /// Reading assumed before any sample was observed
    pub const BOOT: Self = Self {
        millivolt: 0,
        percentage: 100,
        is_low: false,
    };
}

impl Default for BatteryReading {
    fn default() -> Self {
        Self::BOOT
    }
}

/// Classifies voltage samples against a calibration
#[derive(Debug, Clone, Copy)]
pub struct BatteryClassifier {
    calibration: BatteryCalibration,
}

impl BatteryClassifier {
    pub const fn new(calibration: BatteryCalibration) -> Self {
        Self { calibration }
    }

    pub const fn calibration(&self) -> BatteryCalibration {
        self.calibration
    }

    /// Classify a millivolt sample
    ///
    /// Non-positive samples and an unusable calibration yield
    /// [`Unavailable`]; the caller keeps its previous reading in that case.
    pub fn classify(&self, millivolt: i32) -> Result<BatteryReading, Unavailable> {
        if millivolt <= 0 {
            return Err(Unavailable::InvalidSample(millivolt));
        }
        if !self.calibration.is_valid() {
            return Err(Unavailable::InvalidCalibration);
        }

        Ok(BatteryReading {
            millivolt: u16::try_from(millivolt).unwrap_or(u16::MAX),
            percentage: level(millivolt, self.calibration.empty_mv, self.calibration.full_mv),
            is_low: millivolt < self.calibration.low_mv,
        })
    }
}

impl Default for BatteryClassifier {
    fn default() -> Self {
        Self::new(BatteryCalibration::DEFAULT)
    }
}

/// Classify a sample against the default calibration
pub fn classify(millivolt: i32) -> Result<BatteryReading, Unavailable> {
    BatteryClassifier::default().classify(millivolt)
}

/// Interpolate the charge level, clamped to 0-100
///
/// Requires `full > empty`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn level(millivolt: i32, empty: i32, full: i32) -> u8 {
    if millivolt >= full {
        return 100;
    }
    if millivolt <= empty {
        return 0;
    }
    let span = i64::from(full) - i64::from(empty);
    ((i64::from(millivolt) - i64::from(empty)) * 100 / span) as u8
}
