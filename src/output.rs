//! Debounced output driver
//!
//! Owns the LED strip and decides whether a hardware write is needed.
//! A solid render of the color already shown is a no-op, and blink patterns
//! are played as timed steps advanced by [`OutputDriver::tick`]. Any new
//! render abandons the sequence in flight.

use embassy_time::Instant;

use crate::blink::BlinkPattern;
use crate::color::Rgb;
use crate::error::StripError;
use crate::strip::LedStrip;

/// What the driver last pushed to the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderedOutput {
    /// Last color a write was attempted with, `None` before the first one
    pub last_color: Option<Rgb>,
    /// Time of the last successful write
    pub last_write: Option<Instant>,
}

/// Result of a render request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The target was written to the strip
    Written,
    /// The target is already shown, nothing was written
    Skipped,
    /// The first blink step was written and the sequence is running
    BlinkStarted,
}

/// Blink sequence in flight
#[derive(Debug, Clone)]
struct ActiveBlink {
    pattern: BlinkPattern,
    rest: Rgb,
    step: usize,
    deadline: Instant,
}

enum Advance {
    Hold(Instant),
    Step(Rgb, Instant),
    Finished(Rgb),
}

/// Output driver for a strip of `N` pixels driven as one logical pixel
pub struct OutputDriver<S: LedStrip, const N: usize> {
    strip: S,
    frame: [Rgb; N],
    rendered: RenderedOutput,
    blink: Option<ActiveBlink>,
}

impl<S: LedStrip, const N: usize> OutputDriver<S, N> {
    pub fn new(strip: S) -> Self {
        Self {
            strip,
            frame: [Rgb::default(); N],
            rendered: RenderedOutput::default(),
            blink: None,
        }
    }

    /// Render a target color, optionally through a blink pattern
    ///
    /// The pattern ends at its own resting color if it has one, at `target`
    /// otherwise. Write failures are returned but never retried.
    pub fn render(
        &mut self,
        target: Rgb,
        blink: Option<&BlinkPattern>,
        now: Instant,
    ) -> Result<RenderOutcome, StripError> {
        self.cancel_blink();

        match blink {
            Some(pattern) if !pattern.is_empty() => self.start_blink(pattern, target, now),
            _ => self.render_solid(target, now),
        }
    }

    /// Write a color even if it is already shown
    ///
    /// This is the only way to retry after a failed write.
    pub fn force_render(&mut self, target: Rgb, now: Instant) -> Result<(), StripError> {
        self.cancel_blink();
        self.write(target, now)
    }

    /// Advance the blink sequence
    ///
    /// Returns the deadline of the next step, or `None` once the driver is
    /// idle. Steps whose deadline already passed are skipped without being
    /// written.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Instant>, StripError> {
        let Some(active) = self.blink.as_mut() else {
            return Ok(None);
        };

        let advance = if now < active.deadline {
            Advance::Hold(active.deadline)
        } else {
            loop {
                active.step += 1;
                match active.pattern.step(active.step) {
                    Some(step) => {
                        active.deadline += step.duration;
                        if now < active.deadline {
                            break Advance::Step(step.color, active.deadline);
                        }
                    }
                    None => break Advance::Finished(active.rest),
                }
            }
        };

        match advance {
            Advance::Hold(deadline) => Ok(Some(deadline)),
            Advance::Step(color, deadline) => {
                if self.rendered.last_color != Some(color) {
                    self.write(color, now)?;
                }
                Ok(Some(deadline))
            }
            Advance::Finished(rest) => {
                self.blink = None;
                self.render_solid(rest, now)?;
                Ok(None)
            }
        }
    }

    /// Deadline of the current blink step
    pub fn next_deadline(&self) -> Option<Instant> {
        self.blink.as_ref().map(|active| active.deadline)
    }

    pub const fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    pub const fn last_color(&self) -> Option<Rgb> {
        self.rendered.last_color
    }

    pub const fn rendered(&self) -> &RenderedOutput {
        &self.rendered
    }

    pub const fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    fn cancel_blink(&mut self) {
        if let Some(active) = self.blink.take() {
            debug!(
                "blink cancelled at step {}/{}",
                active.step + 1,
                active.pattern.len()
            );
        }
    }

    fn render_solid(&mut self, target: Rgb, now: Instant) -> Result<RenderOutcome, StripError> {
        if self.rendered.last_color == Some(target) {
            return Ok(RenderOutcome::Skipped);
        }
        self.write(target, now)?;
        Ok(RenderOutcome::Written)
    }

    fn start_blink(
        &mut self,
        pattern: &BlinkPattern,
        target: Rgb,
        now: Instant,
    ) -> Result<RenderOutcome, StripError> {
        let Some(first) = pattern.step(0) else {
            return self.render_solid(target, now);
        };

        self.blink = Some(ActiveBlink {
            pattern: pattern.clone(),
            rest: pattern.rest().unwrap_or(target),
            step: 0,
            deadline: now + first.duration,
        });
        self.write(first.color, now)?;
        Ok(RenderOutcome::BlinkStarted)
    }

    /// Push a color to every pixel
    ///
    /// The attempted color is recorded even when the write fails, so an
    /// unchanged target is not written again until a forced render.
    fn write(&mut self, color: Rgb, now: Instant) -> Result<(), StripError> {
        self.rendered.last_color = Some(color);

        if !self.strip.is_ready() {
            error!("LED strip device not ready");
            return Err(StripError::NotReady);
        }

        self.frame.fill(color);
        match self.strip.write(&self.frame) {
            Ok(()) => {
                self.rendered.last_write = Some(now);
                Ok(())
            }
            Err(err) => {
                error!("failed to update LED strip: {}", err);
                Err(err)
            }
        }
    }
}
