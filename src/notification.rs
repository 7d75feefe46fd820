//! External notifications
//!
//! The closed set of events the indicator reacts to, and the push-mode path
//! that drains them from a [`NotificationChannel`].

use embassy_time::Instant;

use crate::channel::{Channel, Receiver, Sender};
use crate::error::StripError;
use crate::indicator::{Handled, Indicator};
use crate::strip::LedStrip;

/// State change reported by the host firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// New battery voltage sample
    Battery { millivolt: i32 },
    /// Wireless link status changed
    Link { connected: bool, connections: u8 },
    /// Active keymap layer changed
    Layer { index: u8 },
}

impl Notification {
    pub const fn battery(millivolt: i32) -> Self {
        Self::Battery { millivolt }
    }

    pub const fn link(connected: bool, connections: u8) -> Self {
        Self::Link {
            connected,
            connections,
        }
    }

    /// Link notification from a source that only reports a flag
    pub const fn link_status(connected: bool) -> Self {
        Self::Link {
            connected,
            connections: connected as u8,
        }
    }

    pub const fn layer(index: u8) -> Self {
        Self::Layer { index }
    }
}

/// Type alias for notification sender
pub type NotificationSender<'a, const SIZE: usize> = Sender<'a, Notification, SIZE>;

/// Type alias for notification receiver
pub type NotificationReceiver<'a, const SIZE: usize> = Receiver<'a, Notification, SIZE>;

/// Type alias for the notification channel
pub type NotificationChannel<const SIZE: usize> = Channel<Notification, SIZE>;

/// Outcome of draining the notification queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessSummary {
    /// Notifications taken from the queue
    pub handled: usize,
    /// Notifications that changed state and reached the output driver
    pub rendered: usize,
    /// Last output failure seen while draining
    pub fault: Option<StripError>,
}

/// Applies queued notifications to an indicator
pub struct NotificationProcessor<'a, const SIZE: usize> {
    notifications: NotificationReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> NotificationProcessor<'a, SIZE> {
    pub const fn new(notifications: NotificationReceiver<'a, SIZE>) -> Self {
        Self { notifications }
    }

    /// Process all pending notifications in arrival order (non-blocking)
    ///
    /// Output failures do not stop the drain; the last one is reported in
    /// the summary.
    pub fn process_pending<S: LedStrip, const N: usize>(
        &mut self,
        indicator: &mut Indicator<S, N>,
        now: Instant,
    ) -> ProcessSummary {
        let mut summary = ProcessSummary::default();

        while let Ok(notification) = self.notifications.try_receive() {
            summary.handled += 1;
            match indicator.handle(notification, now) {
                Ok(Handled::Rendered(_)) => summary.rendered += 1,
                Ok(Handled::Unchanged) => {}
                Err(err) => {
                    summary.rendered += 1;
                    summary.fault = Some(err);
                }
            }
        }

        summary
    }
}
