//! Indicator state aggregation
//!
//! Holds the latest known battery, link and layer values. Each update entry
//! point mutates exactly one field and reports whether it changed.

use crate::battery::{BatteryClassifier, BatteryReading};

/// Wireless link status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkState {
    /// At least one host is connected
    pub connected: bool,
    /// Number of active connections
    pub connections: u8,
}

impl LinkState {
    /// Build a link state from a connection count
    pub const fn from_connections(connections: u8) -> Self {
        Self {
            connected: connections > 0,
            connections,
        }
    }
}

/// Active keymap layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerState {
    pub active: u8,
}

/// Composite view of everything the indicator observes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorSnapshot {
    pub battery: BatteryReading,
    pub link: LinkState,
    pub layer: LayerState,
}

/// Owns the snapshot and applies update events to it
#[derive(Debug, Clone)]
pub struct StateAggregator {
    classifier: BatteryClassifier,
    snapshot: IndicatorSnapshot,
}

impl StateAggregator {
    /// Create an aggregator with the boot defaults: full battery, not low,
    /// disconnected, layer 0
    pub fn new(classifier: BatteryClassifier) -> Self {
        Self {
            classifier,
            snapshot: IndicatorSnapshot::default(),
        }
    }

    /// Current snapshot
    pub const fn snapshot(&self) -> &IndicatorSnapshot {
        &self.snapshot
    }

    /// Apply a voltage sample
    ///
    /// Unavailable samples leave the stored reading untouched. A valid
    /// sample always updates the stored millivolt, but only the first one
    /// or a new percentage / low flag counts as a change, so ADC jitter does
    /// not re-render.
    pub fn update_battery(&mut self, millivolt: i32) -> Option<IndicatorSnapshot> {
        let reading = match self.classifier.classify(millivolt) {
            Ok(reading) => reading,
            Err(reason) => {
                warn!("battery sample ignored: {}", reason);
                return None;
            }
        };

        let previous = self.snapshot.battery;
        self.snapshot.battery = reading;
        // Valid samples are never 0 mV, so 0 marks the boot reading
        let first_sample = previous.millivolt == 0;
        if !first_sample
            && reading.percentage == previous.percentage
            && reading.is_low == previous.is_low
        {
            return None;
        }

        info!(
            "battery: {} mV, {}%{}",
            reading.millivolt,
            reading.percentage,
            if reading.is_low { " (low)" } else { "" }
        );
        Some(self.snapshot)
    }

    /// Apply a link status change
    ///
    /// The connected flag is derived from the connection count; a
    /// contradicting flag is ignored.
    pub fn update_link(&mut self, connected: bool, connections: u8) -> Option<IndicatorSnapshot> {
        let link = LinkState::from_connections(connections);
        if link.connected != connected {
            warn!(
                "link flag {} contradicts {} connections, using the count",
                connected, connections
            );
        }
        if link == self.snapshot.link {
            return None;
        }

        info!(
            "link: {} ({} connections)",
            if link.connected { "connected" } else { "disconnected" },
            link.connections
        );
        self.snapshot.link = link;
        Some(self.snapshot)
    }

    /// Apply a layer change
    ///
    /// The index is not validated; unknown layers fall through the policy.
    pub fn update_layer(&mut self, layer: u8) -> Option<IndicatorSnapshot> {
        if layer == self.snapshot.layer.active {
            return None;
        }

        debug!("layer: {}", layer);
        self.snapshot.layer.active = layer;
        Some(self.snapshot)
    }
}

impl Default for StateAggregator {
    fn default() -> Self {
        Self::new(BatteryClassifier::default())
    }
}
