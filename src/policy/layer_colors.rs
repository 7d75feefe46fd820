use heapless::Vec;

use crate::color::{BLUE, GREEN, Rgb, WHITE, YELLOW};

/// Maximum number of layers with an override color
pub const MAX_LAYER_COLORS: usize = 8;

/// Fixed lookup table of layer index to override color
///
/// Layers without an entry fall through to the battery tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerColors {
    entries: Vec<(u8, Rgb), MAX_LAYER_COLORS>,
}

impl LayerColors {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add or replace the color of a layer
    ///
    /// Returns the previous color of the layer, or the entry back if the
    /// table is full.
    pub fn insert(&mut self, layer: u8, color: Rgb) -> Result<Option<Rgb>, (u8, Rgb)> {
        if let Some(entry) = self.entries.iter_mut().find(|(index, _)| *index == layer) {
            let previous = entry.1;
            entry.1 = color;
            return Ok(Some(previous));
        }
        self.entries.push((layer, color))?;
        Ok(None)
    }

    /// Table of a four-layer keymap: base white, lower blue, raise
    /// yellow, adjust (6) green
    pub fn four_layer() -> Self {
        Self::new()
            .with(0, WHITE)
            .with(1, BLUE)
            .with(2, YELLOW)
            .with(6, GREEN)
    }

    /// Builder form of [`LayerColors::insert`], entries past the capacity are dropped
    #[must_use]
    pub fn with(mut self, layer: u8, color: Rgb) -> Self {
        if let Err((layer, _)) = self.insert(layer, color) {
            warn!("layer colors full, dropped layer {}", layer);
        }
        self
    }

    /// Remove the color of a layer
    pub fn remove(&mut self, layer: u8) -> Option<Rgb> {
        let position = self.entries.iter().position(|(index, _)| *index == layer)?;
        Some(self.entries.swap_remove(position).1)
    }

    /// Look up the override color of a layer
    pub fn get(&self, layer: u8) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(index, _)| *index == layer)
            .map(|(_, color)| *color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LayerColors {
    /// Function layer (1) shown in blue
    fn default() -> Self {
        Self::new().with(1, BLUE)
    }
}
