#![no_std]

#[macro_use]
mod fmt;

pub mod battery;
pub mod blink;
pub mod channel;
pub mod color;
pub mod config;
pub mod error;
pub mod indicator;
pub mod notification;
pub mod output;
pub mod policy;
pub mod scheduler;
pub mod state;
pub mod strip;

pub use battery::{BatteryClassifier, BatteryReading, classify};
pub use blink::{BlinkPattern, BlinkStep, MAX_BLINK_STEPS};
pub use config::{
    BandColor, BatteryBands, BatteryCalibration, BlinkTimings, IndicatorConfig, LinkPulse, Palette,
};
pub use error::{StripError, Unavailable};
pub use indicator::{Handled, Indicator};
pub use notification::{
    Notification, NotificationChannel, NotificationProcessor, NotificationReceiver,
    NotificationSender, ProcessSummary,
};
pub use output::{OutputDriver, RenderOutcome, RenderedOutput};
pub use policy::{ColorPolicy, LayerColors, Resolved, Tier};
pub use scheduler::{IndicatorScheduler, NoSampler, TickResult};
pub use state::{IndicatorSnapshot, LayerState, LinkState, StateAggregator};
pub use strip::{LedStrip, SmartLedsStrip};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract battery voltage source
///
/// Implement this trait on top of the board's ADC driver to let the
/// indicator poll the battery itself instead of waiting for notifications.
pub trait VoltageSampler {
    /// Read the battery voltage in millivolts
    ///
    /// Values `<= 0` mean the sample is unavailable.
    fn read_millivolts(&mut self) -> i32;
}
