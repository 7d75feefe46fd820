//! Indicator event listener
//!
//! Owns the aggregator, the policy and the output driver. Every notification
//! results in exactly one aggregator update; only a notification that changed
//! the snapshot goes on to one policy evaluation and one render.

use embassy_time::{Duration, Instant};

use crate::VoltageSampler;
use crate::battery::BatteryClassifier;
use crate::blink::BlinkPattern;
use crate::config::{IndicatorConfig, LinkPulse};
use crate::error::StripError;
use crate::notification::Notification;
use crate::output::{OutputDriver, RenderOutcome};
use crate::policy::{ColorPolicy, Resolved, Tier};
use crate::state::{IndicatorSnapshot, StateAggregator};
use crate::strip::LedStrip;

/// How a notification was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The snapshot changed and the result was sent to the output driver
    Rendered(RenderOutcome),
    /// The value was unavailable or identical, nothing was rendered
    Unchanged,
}

/// Battery, link and layer indicator for a strip of `N` pixels
pub struct Indicator<S: LedStrip, const N: usize> {
    state: StateAggregator,
    policy: ColorPolicy,
    output: OutputDriver<S, N>,
    link_pulse: Option<LinkPulse>,
    battery_flash: Option<Duration>,
    layer_flash: Option<Duration>,
}

impl<S: LedStrip, const N: usize> Indicator<S, N> {
    /// Create an indicator with boot defaults
    ///
    /// Nothing is written until [`Indicator::start`] or the first
    /// state-changing notification.
    pub fn new(strip: S, config: &IndicatorConfig) -> Self {
        Self {
            state: StateAggregator::new(BatteryClassifier::new(config.calibration)),
            policy: ColorPolicy::from_config(config),
            output: OutputDriver::new(strip),
            link_pulse: config.link_pulse,
            battery_flash: config.battery_flash,
            layer_flash: config.layer_flash,
        }
    }

    /// Show the boot state
    ///
    /// A strip that is not ready yet is reported, the indicator keeps
    /// working and picks up on the next render.
    pub fn start(&mut self, now: Instant) -> Result<(), StripError> {
        info!("LED indicator initialized (battery, link and layer)");
        self.force_refresh(now)
    }

    /// Apply one notification
    pub fn handle(&mut self, notification: Notification, now: Instant) -> Result<Handled, StripError> {
        let previous = *self.state.snapshot();
        let updated = match notification {
            Notification::Battery { millivolt } => self.state.update_battery(millivolt),
            Notification::Link {
                connected,
                connections,
            } => self.state.update_link(connected, connections),
            Notification::Layer { index } => self.state.update_layer(index),
        };

        let Some(snapshot) = updated else {
            return Ok(Handled::Unchanged);
        };
        self.render(&previous, &snapshot, now).map(Handled::Rendered)
    }

    /// Sample the battery voltage (pull mode)
    pub fn poll_battery<V: VoltageSampler>(
        &mut self,
        sampler: &mut V,
        now: Instant,
    ) -> Result<Handled, StripError> {
        let millivolt = sampler.read_millivolts();
        self.handle(Notification::battery(millivolt), now)
    }

    /// Re-evaluate the policy and write the result unconditionally
    pub fn force_refresh(&mut self, now: Instant) -> Result<(), StripError> {
        let Resolved { color, blink, .. } = self.policy.compute(self.state.snapshot());
        match blink {
            Some(pattern) if !pattern.is_empty() => {
                self.output.render(color, Some(&pattern), now).map(|_| ())
            }
            _ => self.output.force_render(color, now),
        }
    }

    /// Play the policy blink again if one applies and none is running
    ///
    /// Returns whether a blink was started.
    pub fn replay_blink(&mut self, now: Instant) -> Result<bool, StripError> {
        if self.output.is_blinking() {
            return Ok(false);
        }
        let Resolved { color, blink, .. } = self.policy.compute(self.state.snapshot());
        match blink {
            Some(pattern) if !pattern.is_empty() => {
                self.output.render(color, Some(&pattern), now)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Advance a running blink, returns the next step deadline
    pub fn tick(&mut self, now: Instant) -> Result<Option<Instant>, StripError> {
        self.output.tick(now)
    }

    pub const fn snapshot(&self) -> &IndicatorSnapshot {
        self.state.snapshot()
    }

    pub const fn policy(&self) -> &ColorPolicy {
        &self.policy
    }

    pub const fn output(&self) -> &OutputDriver<S, N> {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut OutputDriver<S, N> {
        &mut self.output
    }

    fn render(
        &mut self,
        previous: &IndicatorSnapshot,
        snapshot: &IndicatorSnapshot,
        now: Instant,
    ) -> Result<RenderOutcome, StripError> {
        let resolved = self.policy.compute(snapshot);
        let color = resolved.color;
        let blink = self.with_transient(previous, snapshot, resolved);
        self.output.render(color, blink.as_ref(), now)
    }

    /// Prefix the policy blink with a transient pulse
    ///
    /// One update changes one field, so at most one of the link pulse, the
    /// battery flash and the layer flash applies. Nothing is added when the
    /// low-battery tier wins.
    fn with_transient(
        &self,
        previous: &IndicatorSnapshot,
        snapshot: &IndicatorSnapshot,
        resolved: Resolved,
    ) -> Option<BlinkPattern> {
        if resolved.tier == Tier::LowBattery {
            return resolved.blink;
        }
        let Some(mut pattern) = self.transient(previous, snapshot) else {
            return resolved.blink;
        };

        if let Some(blink) = &resolved.blink {
            if let Err(dropped) = pattern.append(blink) {
                warn!("transient pulse: dropped {} blink steps", dropped);
            }
        }
        Some(pattern)
    }

    fn transient(
        &self,
        previous: &IndicatorSnapshot,
        snapshot: &IndicatorSnapshot,
    ) -> Option<BlinkPattern> {
        if previous.link.connected != snapshot.link.connected {
            let pulse = self.link_pulse?;
            let color = if snapshot.link.connected {
                pulse.connected
            } else {
                pulse.disconnected
            };
            return Some(BlinkPattern::pulse(color, pulse.duration));
        }

        let first_sample = previous.battery.millivolt == 0 && snapshot.battery.millivolt != 0;
        if first_sample || previous.battery.percentage != snapshot.battery.percentage {
            let duration = self.battery_flash?;
            let color = self.policy.battery_color(snapshot.battery.percentage, false);
            return Some(BlinkPattern::pulse(color, duration));
        }

        if previous.layer.active != snapshot.layer.active {
            let duration = self.layer_flash?;
            let color = self
                .policy
                .layers()
                .get(snapshot.layer.active)
                .unwrap_or(self.policy.palette().off);
            return Some(BlinkPattern::pulse(color, duration));
        }

        None
    }
}
