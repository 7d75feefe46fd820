//! Indicator configuration
//!
//! Defaults reproduce the constants of the reference board: a non-LiPo cell
//! calibrated between 2.7 V and 3.3 V, a single SK6812 pixel and a five
//! second battery poll.

use embassy_time::Duration;

use crate::color::{AMBER, BLACK, BLUE, EMBER, GREEN, RED, Rgb};
use crate::policy::LayerColors;

/// Battery voltage calibration points, in millivolts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryCalibration {
    /// Voltage reported as 100%
    pub full_mv: i32,
    /// Voltage reported as 0%
    pub empty_mv: i32,
    /// Readings strictly below this voltage are low
    pub low_mv: i32,
}

impl BatteryCalibration {
    pub const DEFAULT: Self = Self {
        full_mv: 3300,
        empty_mv: 2700,
        low_mv: 3000,
    };

    /// Check that the range can be interpolated
    pub const fn is_valid(&self) -> bool {
        self.full_mv > self.empty_mv
    }
}

impl Default for BatteryCalibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Lower percentage bounds of the battery bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryBands {
    /// At or above this percentage the battery is in the high band
    pub high: u8,
    /// At or above this percentage (and below `high`) it is in the medium band
    pub medium: u8,
}

impl Default for BatteryBands {
    fn default() -> Self {
        Self {
            high: 80,
            medium: 50,
        }
    }
}

/// Color of a battery band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandColor {
    pub color: Rgb,
    /// Blue channel applied while the link is up
    pub connected_tint: u8,
}

impl BandColor {
    pub const fn new(color: Rgb, connected_tint: u8) -> Self {
        Self {
            color,
            connected_tint,
        }
    }
}

/// Colors used by the policy tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub low_battery: Rgb,
    pub searching: Rgb,
    pub off: Rgb,
    pub high: BandColor,
    pub medium: BandColor,
    pub low: BandColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            low_battery: RED,
            searching: BLUE,
            off: BLACK,
            high: BandColor::new(GREEN, 0x40),
            medium: BandColor::new(AMBER, 0x20),
            low: BandColor::new(EMBER, 0x20),
        }
    }
}

/// Timing of the "searching for host" blink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTimings {
    /// Time the searching color is shown per cycle
    pub on: Duration,
    /// Time the LED is dark per cycle
    pub off: Duration,
    /// Number of on/off cycles per pattern
    pub cycles: u8,
    /// Pause between the end of one pattern and the next while disconnected
    pub repeat: Duration,
}

impl Default for BlinkTimings {
    fn default() -> Self {
        Self {
            on: Duration::from_millis(300),
            off: Duration::from_millis(700),
            cycles: 2,
            repeat: Duration::from_secs(5),
        }
    }
}

/// Short pulse shown when the link goes up or down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkPulse {
    pub connected: Rgb,
    pub disconnected: Rgb,
    pub duration: Duration,
}

impl Default for LinkPulse {
    fn default() -> Self {
        Self {
            connected: GREEN,
            disconnected: RED,
            duration: Duration::from_millis(1000),
        }
    }
}

/// Configuration for the indicator
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub calibration: BatteryCalibration,
    pub palette: Palette,
    pub bands: BatteryBands,
    pub layers: LayerColors,
    pub blink: BlinkTimings,
    /// Pulse on link edges, disabled when `None`
    pub link_pulse: Option<LinkPulse>,
    /// Show the untinted band color for this long when the charge level
    /// changes, disabled when `None`
    pub battery_flash: Option<Duration>,
    /// Show the layer color (off for unmapped layers) for this long on a
    /// layer change, disabled when `None`
    pub layer_flash: Option<Duration>,
    /// Interval between voltage polls in pull mode
    pub poll_interval: Duration,
    /// Longest sleep the scheduler asks for when nothing is pending
    pub idle_interval: Duration,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            calibration: BatteryCalibration::default(),
            palette: Palette::default(),
            bands: BatteryBands::default(),
            layers: LayerColors::default(),
            blink: BlinkTimings::default(),
            link_pulse: None,
            battery_flash: None,
            layer_flash: None,
            poll_interval: Duration::from_secs(5),
            idle_interval: Duration::from_secs(1),
        }
    }
}

impl IndicatorConfig {
    /// Enable every transient notification with the reference board
    /// timings: link pulses, 2 s battery flash, 1 s layer flash, and the
    /// four-layer color table
    #[must_use]
    pub fn with_flashes(self) -> Self {
        Self {
            layers: LayerColors::four_layer(),
            link_pulse: Some(LinkPulse::default()),
            battery_flash: Some(Duration::from_secs(2)),
            layer_flash: Some(Duration::from_secs(1)),
            ..self
        }
    }
}
