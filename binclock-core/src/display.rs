//! Rendering the clock onto the two LED buses.
//!
//! # Bus layout
//!
//! - **Minutes bus**: 6 lines (bits 0-5), fully owned by the display.
//! - **Hours bus**: one 8-bit port. Bits 3-7 carry the five hour LEDs; bits
//!   0-2 are shared wiring with the three button inputs and must never be
//!   driven from the render path.
//!
//! Every write goes through [`LedPort::write_outputs`] with the owned-bit
//! mask, so the button lines are preserved by the facade rather than by
//! caller discipline at each site.

use crate::buttons::ButtonSample;
use crate::clock::TimeOfDay;
use crate::LedPort;

/// Lines of the minutes bus owned by the display (6 LEDs).
pub const MINUTES_LED_MASK: u8 = 0b0011_1111;

/// Lines of the hours bus owned by the display (5 LEDs, bits 3-7).
pub const HOURS_LED_MASK: u8 = 0b1111_1000;

/// Bit position of the least significant hour LED on the hours bus.
pub const HOURS_LED_SHIFT: u8 = 3;

/// Renders clock snapshots onto the LED buses and samples the buttons that
/// share the hours port.
pub struct DisplayDriver<M: LedPort, H: LedPort> {
    minutes_port: M,
    hours_port: H,
}

impl<M: LedPort, H: LedPort> DisplayDriver<M, H> {
    /// Creates a driver over the two bus facades.
    pub const fn new(minutes_port: M, hours_port: H) -> Self {
        Self {
            minutes_port,
            hours_port,
        }
    }

    /// Writes a time snapshot to both buses.
    ///
    /// Minutes are masked to their 6 owned lines; hours are masked to 5 bits
    /// and shifted above the button lines. Out-of-invariant inputs (e.g. a
    /// corrupted hour > 23) are truncated to the owned lines and can never
    /// leak into the button bits.
    pub fn render(&mut self, time: TimeOfDay) {
        self.minutes_port
            .write_outputs(MINUTES_LED_MASK, time.minutes & MINUTES_LED_MASK);
        self.hours_port
            .write_outputs(HOURS_LED_MASK, (time.hours & 0x1F) << HOURS_LED_SHIFT);
    }

    /// Blanks both buses, driving only the LED-bearing bits low.
    ///
    /// Entered on the Active to Sleeping transition; the button lines keep
    /// their pull-up configuration.
    pub fn blank(&mut self) {
        self.minutes_port.write_outputs(MINUTES_LED_MASK, 0);
        self.hours_port.write_outputs(HOURS_LED_MASK, 0);
    }

    /// Samples the three buttons from the hours port's input lines.
    pub fn read_buttons(&self) -> ButtonSample {
        ButtonSample::from_levels(self.hours_port.read_inputs())
    }
}
