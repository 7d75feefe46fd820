//! Indicator scheduling
//!
//! Drives the indicator from a single cooperative context without blocking
//! inside the core. The caller sleeps between ticks, or wakes early when a
//! notification is queued.
//!
//! # Usage
//!
//! ```ignore
//! static NOTIFICATIONS: NotificationChannel<8> = NotificationChannel::new();
//!
//! let indicator = Indicator::<_, 1>::new(strip, &config);
//! let mut scheduler = IndicatorScheduler::new(indicator, NOTIFICATIONS.receiver(), &config)
//!     .with_sampler(adc);
//!
//! loop {
//!     let result = scheduler.tick(Instant::now());
//!     Timer::at(result.next_deadline).await;
//! }
//! ```

use embassy_time::{Duration, Instant};

use crate::VoltageSampler;
use crate::config::IndicatorConfig;
use crate::error::StripError;
use crate::indicator::Indicator;
use crate::notification::{NotificationProcessor, NotificationReceiver};
use crate::strip::LedStrip;

/// Result of a scheduler tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// When the scheduler wants to be ticked again
    pub next_deadline: Instant,
    /// How long to wait until `next_deadline` (zero if already due)
    pub sleep_duration: Duration,
    /// Last output failure seen during the tick
    pub fault: Option<StripError>,
}

/// Sampler used when the indicator only receives pushed notifications
pub struct NoSampler;

impl VoltageSampler for NoSampler {
    fn read_millivolts(&mut self) -> i32 {
        0
    }
}

/// Cooperative driver for an [`Indicator`]
///
/// Each tick drains queued notifications, polls the voltage sampler when
/// the poll interval elapsed (pull mode), repeats the searching blink while
/// the link is down and advances any running blink. The blink repeats the
/// same way in push and pull mode.
pub struct IndicatorScheduler<'a, S, V, const N: usize, const SIZE: usize>
where
    S: LedStrip,
    V: VoltageSampler,
{
    indicator: Indicator<S, N>,
    processor: NotificationProcessor<'a, SIZE>,
    sampler: Option<V>,
    poll_interval: Duration,
    idle_interval: Duration,
    replay_interval: Duration,
    next_poll: Instant,
    next_replay: Instant,
}

impl<'a, S, const N: usize, const SIZE: usize> IndicatorScheduler<'a, S, NoSampler, N, SIZE>
where
    S: LedStrip,
{
    /// Create a push-only scheduler
    pub fn new(
        indicator: Indicator<S, N>,
        notifications: NotificationReceiver<'a, SIZE>,
        config: &IndicatorConfig,
    ) -> Self {
        Self {
            indicator,
            processor: NotificationProcessor::new(notifications),
            sampler: None,
            poll_interval: config.poll_interval,
            idle_interval: config.idle_interval,
            replay_interval: config.blink.repeat,
            next_poll: Instant::from_millis(0),
            next_replay: Instant::from_millis(0),
        }
    }

    /// Attach a voltage sampler, polled every `poll_interval`
    ///
    /// The first poll happens on the first tick.
    pub fn with_sampler<V: VoltageSampler>(self, sampler: V) -> IndicatorScheduler<'a, S, V, N, SIZE> {
        IndicatorScheduler {
            indicator: self.indicator,
            processor: self.processor,
            sampler: Some(sampler),
            poll_interval: self.poll_interval,
            idle_interval: self.idle_interval,
            replay_interval: self.replay_interval,
            next_poll: self.next_poll,
            next_replay: self.next_replay,
        }
    }
}

impl<S, V, const N: usize, const SIZE: usize> IndicatorScheduler<'_, S, V, N, SIZE>
where
    S: LedStrip,
    V: VoltageSampler,
{
    /// Run one scheduling step and return timing information
    ///
    /// This method:
    /// 1. Applies every queued notification
    /// 2. Polls the sampler if due
    /// 3. Replays the searching blink when the link is down and the pause
    ///    after the previous pattern elapsed
    /// 4. Advances the blink sequence
    /// 5. Returns the earliest deadline that needs attention
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let mut fault = self.processor.process_pending(&mut self.indicator, now).fault;

        if let Some(sampler) = self.sampler.as_mut() {
            if now >= self.next_poll {
                // Skip the backlog instead of polling in a burst after a stall
                let max_drift = Duration::from_millis(self.poll_interval.as_millis() * 2);
                if now > self.next_poll + max_drift {
                    self.next_poll = now;
                }
                self.next_poll += self.poll_interval;

                if let Err(err) = self.indicator.poll_battery(sampler, now) {
                    fault = Some(err);
                }
            }
        }

        let disconnected = !self.indicator.snapshot().link.connected;
        if disconnected && now >= self.next_replay {
            match self.indicator.replay_blink(now) {
                Ok(true) => {}
                // Policy has no blink right now (low battery), check again later
                Ok(false) if !self.indicator.output().is_blinking() => {
                    self.next_replay = now + self.replay_interval;
                }
                Ok(false) => {}
                Err(err) => fault = Some(err),
            }
        }

        let was_blinking = self.indicator.output().is_blinking();
        let blink_deadline = match self.indicator.tick(now) {
            Ok(deadline) => deadline,
            Err(err) => {
                fault = Some(err);
                self.indicator.output().next_deadline()
            }
        };
        if was_blinking && !self.indicator.output().is_blinking() {
            self.next_replay = now + self.replay_interval;
        }

        let mut next_deadline = now + self.idle_interval;
        if let Some(deadline) = blink_deadline {
            next_deadline = next_deadline.min(deadline);
        } else if disconnected {
            next_deadline = next_deadline.min(self.next_replay.max(now));
        }
        if self.sampler.is_some() {
            next_deadline = next_deadline.min(self.next_poll);
        }

        let sleep_duration = if next_deadline > now {
            next_deadline - now
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline,
            sleep_duration,
            fault,
        }
    }

    /// Get a reference to the indicator.
    pub fn indicator(&self) -> &Indicator<S, N> {
        &self.indicator
    }

    /// Get a mutable reference to the indicator.
    pub fn indicator_mut(&mut self) -> &mut Indicator<S, N> {
        &mut self.indicator
    }
}
