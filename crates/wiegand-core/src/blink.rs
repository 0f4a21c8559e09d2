//! Blinking LED indicator driven through an `embedded-hal` output pin.
//!
//! [`BlinkIndicator`] is the concrete [`IndicatorSink`] used on hardware and in
//! the simulator. `Start` arms the blink; the owning loop then calls
//! [`BlinkIndicator::poll`] with the current time and the pin is lit during the
//! first `on_time` of every `period`. `Stop` drives the pin low immediately so
//! the LED is dark even if nobody polls again.

use embassy_time::{Duration, Instant};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::indicator::{IndicatorCommand, IndicatorSink};

/// Colour of the transmitting blink on RGB status LEDs.
pub const INDICATOR_COLOR: Rgb888 = Rgb888::MAGENTA;

/// On/off timing of a blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    pub on_time: Duration,
    pub period: Duration,
}

impl BlinkPattern {
    /// 10 ms flash every 100 ms.
    pub const FAST: BlinkPattern = BlinkPattern {
        on_time: Duration::from_millis(10),
        period: Duration::from_millis(100),
    };

    pub const fn new(on_time: Duration, period: Duration) -> Self {
        Self { on_time, period }
    }

    /// Whether the LED is lit `elapsed` after the blink started.
    pub fn is_lit_at(&self, elapsed: Duration) -> bool {
        let period = self.period.as_ticks().max(1);
        elapsed.as_ticks() % period < self.on_time.as_ticks()
    }
}

impl Default for BlinkPattern {
    fn default() -> Self {
        Self::FAST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Off,
    /// Started, waiting for the first poll to anchor the phase.
    Armed,
    Blinking { since: Instant },
}

/// Indicator sink that blinks an LED on `P`.
pub struct BlinkIndicator<P: OutputPin> {
    pin: P,
    pattern: BlinkPattern,
    mode: Mode,
    lit: bool,
}

impl<P: OutputPin> BlinkIndicator<P> {
    /// The pin is assumed to start low.
    pub fn new(pin: P, pattern: BlinkPattern) -> Self {
        Self {
            pin,
            pattern,
            mode: Mode::Off,
            lit: false,
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.mode != Mode::Off
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn pattern(&self) -> BlinkPattern {
        self.pattern
    }

    /// Advance the blink to `now`, writing the pin only on level changes.
    pub fn poll(&mut self, now: Instant) -> Result<(), P::Error> {
        let since = match self.mode {
            // Retry a failed switch-off until the pin is really low.
            Mode::Off => return self.set_lit(false),
            Mode::Armed => {
                self.mode = Mode::Blinking { since: now };
                now
            }
            Mode::Blinking { since } => since,
        };

        let elapsed = now
            .checked_duration_since(since)
            .unwrap_or(Duration::from_ticks(0));
        self.set_lit(self.pattern.is_lit_at(elapsed))
    }

    fn set_lit(&mut self, lit: bool) -> Result<(), P::Error> {
        if lit != self.lit {
            if lit {
                self.pin.set_high()?;
            } else {
                self.pin.set_low()?;
            }
            self.lit = lit;
        }
        Ok(())
    }
}

impl<P: OutputPin> IndicatorSink for BlinkIndicator<P> {
    fn send(&mut self, command: IndicatorCommand) {
        match command {
            IndicatorCommand::Start => {
                debug!("Indicator blink armed: {:?}", self.pattern);
                self.mode = Mode::Armed;
            }
            IndicatorCommand::Stop => {
                debug!("Indicator blink stopped");
                self.mode = Mode::Off;
                match self.pin.set_low() {
                    Ok(()) => self.lit = false,
                    Err(e) => warn!("Failed to switch indicator off: {:?}", e),
                }
            }
        }
    }
}
