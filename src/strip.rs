//! LED strip transport seam

use smart_leds::SmartLedsWrite;

use crate::color::Rgb;
use crate::error::StripError;

/// Abstract LED strip transport
///
/// Implement this trait to support different hardware platforms.
/// The output driver is generic over this trait and is its only writer.
pub trait LedStrip {
    /// Check if the transport is initialized
    fn is_ready(&self) -> bool {
        true
    }

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), StripError>;
}

/// [`LedStrip`] over any `smart-leds` writer (WS2812, SK6812, ...)
pub struct SmartLedsStrip<W> {
    writer: W,
}

impl<W> SmartLedsStrip<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LedStrip for SmartLedsStrip<W>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    fn write(&mut self, colors: &[Rgb]) -> Result<(), StripError> {
        self.writer
            .write(colors.iter().copied())
            .map_err(|_| StripError::Transport)
    }
}
