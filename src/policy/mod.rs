//! Color policy
//!
//! Maps a state snapshot to exactly one output color, plus an optional blink
//! pattern. Tiers are evaluated from the highest priority down and the first
//! match wins:
//!
//! 1. Low battery: solid red, masks everything else
//! 2. Disconnected: searching blink, resting at the color of tiers 3/4
//! 3. Layer override: color from the layer table
//! 4. Battery level: green / amber / warm band, blue-tinted while connected

mod layer_colors;

pub use layer_colors::{LayerColors, MAX_LAYER_COLORS};

use crate::blink::BlinkPattern;
use crate::color::{Rgb, with_blue};
use crate::config::{BatteryBands, BlinkTimings, IndicatorConfig, Palette};
use crate::state::IndicatorSnapshot;

/// Policy tier that produced a color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    LowBattery,
    Disconnected,
    LayerOverride,
    BatteryLevel,
}

/// Output of the policy for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Solid color, or the resting color when `blink` is set
    pub color: Rgb,
    pub blink: Option<BlinkPattern>,
    pub tier: Tier,
}

impl Resolved {
    const fn solid(color: Rgb, tier: Tier) -> Self {
        Self {
            color,
            blink: None,
            tier,
        }
    }
}

/// Priority-based state to color mapping
#[derive(Debug, Clone)]
pub struct ColorPolicy {
    palette: Palette,
    bands: BatteryBands,
    layers: LayerColors,
    blink: BlinkTimings,
}

impl ColorPolicy {
    pub const fn new(
        palette: Palette,
        bands: BatteryBands,
        layers: LayerColors,
        blink: BlinkTimings,
    ) -> Self {
        Self {
            palette,
            bands,
            layers,
            blink,
        }
    }

    pub fn from_config(config: &IndicatorConfig) -> Self {
        Self::new(
            config.palette,
            config.bands,
            config.layers.clone(),
            config.blink,
        )
    }

    /// Resolve the color for a snapshot
    pub fn compute(&self, snapshot: &IndicatorSnapshot) -> Resolved {
        if snapshot.battery.is_low {
            return Resolved::solid(self.palette.low_battery, Tier::LowBattery);
        }

        let (color, tier) = self.settled(snapshot);
        if !snapshot.link.connected {
            return Resolved {
                color,
                blink: Some(self.searching_blink()),
                tier: Tier::Disconnected,
            };
        }

        Resolved::solid(color, tier)
    }

    /// Color of the layer and battery tiers, ignoring the higher ones
    fn settled(&self, snapshot: &IndicatorSnapshot) -> (Rgb, Tier) {
        match self.layers.get(snapshot.layer.active) {
            Some(color) => (color, Tier::LayerOverride),
            None => (
                self.battery_color(snapshot.battery.percentage, snapshot.link.connected),
                Tier::BatteryLevel,
            ),
        }
    }

    /// Color of the battery band for a charge level
    pub fn battery_color(&self, percentage: u8, connected: bool) -> Rgb {
        let band = if percentage >= self.bands.high {
            self.palette.high
        } else if percentage >= self.bands.medium {
            self.palette.medium
        } else {
            self.palette.low
        };

        if connected {
            with_blue(band.color, band.connected_tint)
        } else {
            band.color
        }
    }

    /// Blink shown while no host is connected
    pub fn searching_blink(&self) -> BlinkPattern {
        BlinkPattern::alternating(
            self.palette.searching,
            self.palette.off,
            self.blink.on,
            self.blink.off,
            self.blink.cycles,
        )
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn layers(&self) -> &LayerColors {
        &self.layers
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self::from_config(&IndicatorConfig::default())
    }
}
