//! Hardware-independent core of a battery-powered binary LED clock.
//!
//! # Overview
//!
//! The clock shows hours and minutes in binary on two LED buses:
//! - Six LED lines for minutes (0-59), dimmed as one PWM channel
//! - Five LED lines for hours (0-23), dimmed as a second PWM channel
//!
//! Three active-low buttons adjust the clock while the display is lit:
//! - Brightness button (doubles as the wake button)
//! - Minutes button (alone: +1 minute; together with brightness: next of
//!   five brightness levels)
//! - Hours button (+1 hour, checked independently of the other two)
//!
//! Any accepted press re-arms a 10-second display timeout. Once the timeout
//! expires the display blanks and the device sleeps, waking on its 1 Hz time
//! base to check for a pressed button.
//!
//! # Cross-context sharing
//!
//! Wall-clock time and the display timeout are written by the 1 Hz tick
//! context and read by the polling main loop. [`SharedClock`] keeps both
//! behind a critical section and only hands out whole snapshots, so the main
//! loop can never observe a half-carried rollover or a torn timeout.
//!
//! # Module Organization
//!
//! - [`clock`] - Wall-clock time, display timeout, and the 1 Hz tick
//! - [`buttons`] - Button sampling, press resolution, and debounce hold
//! - [`brightness`] - Brightness level cycling and per-channel duty tables
//! - [`display`] - Rendering onto the two LED buses
//! - [`power`] - Active/Sleeping state machine

#![no_std]

pub mod brightness;
pub mod buttons;
pub mod clock;
pub mod display;
pub mod power;

pub use brightness::BrightnessController;
pub use buttons::{ButtonAction, ButtonSample, InputDispatcher};
pub use clock::{SharedClock, TimeOfDay, DISPLAY_TIMEOUT_SECS};
pub use display::DisplayDriver;
pub use power::{PowerManager, PowerState};

/// Facade over one 8-bit GPIO port carrying LED outputs and, possibly,
/// button inputs on the remaining lines.
///
/// Implementations must only ever drive the bits selected by `mask`; this is
/// the single place where the "never clobber the button lines" invariant is
/// enforced. Callers pass the full port-wide value and the mask of the bits
/// they own.
pub trait LedPort {
    /// Returns the current input levels of the port, one bit per line.
    ///
    /// Button lines are active-low: a pressed button reads 0.
    fn read_inputs(&self) -> u8;

    /// Drives the bits of `value` selected by `mask`, leaving every other
    /// line of the port untouched.
    fn write_outputs(&mut self, mask: u8, value: u8);
}

/// Facade over the two 8-bit PWM duty outputs dimming the LED buses.
///
/// The PWM peripheral mode and frequency are fixed at initialization; the
/// core only ever changes duty cycles.
pub trait PwmChannels {
    /// Sets the duty cycle of the minutes-bus channel (0 = off, 255 = full).
    fn set_minutes_duty(&mut self, duty: u8);

    /// Sets the duty cycle of the hours-bus channel (0 = off, 255 = full).
    fn set_hours_duty(&mut self, duty: u8);
}
