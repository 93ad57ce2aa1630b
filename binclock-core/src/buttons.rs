//! Button sampling, press resolution, and the debounce hold.
//!
//! The three buttons share the low bits of the hours LED port and are
//! active-low with pull-ups: a pressed button reads 0. They are sampled by
//! polling, not by edge interrupts.
//!
//! # Press resolution
//!
//! Presses are resolved by priority each poll:
//!
//! | Condition                          | Action                    |
//! |------------------------------------|---------------------------|
//! | brightness AND minutes asserted    | cycle brightness level    |
//! | minutes asserted alone             | +1 minute                 |
//! | hours asserted (checked always)    | +1 hour                   |
//!
//! The hours button is independent of the first two, so a single poll can
//! accept both a brightness/minutes action and an hours action.
//!
//! # Debounce
//!
//! Each accepted action arms a ~200 ms hold during which sampling is
//! suppressed. This is a level-sampled model, not an edge-triggered one: a
//! held button auto-repeats roughly every 200 ms. That repeat is the
//! device's documented adjustment behavior, so it is preserved rather than
//! replaced by an edge-triggered debounce.

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Brightness/wake button line (bit 0 of the hours port).
pub const BUTTON_BRIGHTNESS: u8 = 1 << 0;
/// Minutes button line (bit 1 of the hours port).
pub const BUTTON_MINUTES: u8 = 1 << 1;
/// Hours button line (bit 2 of the hours port).
pub const BUTTON_HOURS: u8 = 1 << 2;
/// All button lines of the hours port.
pub const BUTTON_LINE_MASK: u8 = BUTTON_BRIGHTNESS | BUTTON_MINUTES | BUTTON_HOURS;

/// Sampling hold armed after each accepted action.
pub const DEBOUNCE_HOLD: Duration = Duration::from_millis(200);

/// One debounced poll result, decoded from the active-low port levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, defmt::Format)]
pub struct ButtonSample {
    /// Brightness/wake button is pressed
    pub brightness: bool,
    /// Minutes button is pressed
    pub minutes: bool,
    /// Hours button is pressed
    pub hours: bool,
}

impl ButtonSample {
    /// Decodes a sample from raw port input levels.
    ///
    /// The buttons are active-low, so a 0 level means pressed.
    #[must_use]
    pub const fn from_levels(levels: u8) -> Self {
        Self {
            brightness: levels & BUTTON_BRIGHTNESS == 0,
            minutes: levels & BUTTON_MINUTES == 0,
            hours: levels & BUTTON_HOURS == 0,
        }
    }

    /// Returns `true` if any of the three buttons is pressed.
    #[must_use]
    pub const fn any_pressed(&self) -> bool {
        self.brightness || self.minutes || self.hours
    }
}

/// A user intent accepted from one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ButtonAction {
    /// Advance to the next of the five brightness levels
    CycleBrightness,
    /// Advance the clock by one minute
    BumpMinute,
    /// Advance the clock by one hour
    BumpHour,
}

/// Polls button samples into accepted actions, enforcing the debounce hold.
///
/// Only the main loop touches the dispatcher, and only while the power
/// state machine is Active.
pub struct InputDispatcher {
    /// Sampling is suppressed until this deadline after an accepted action.
    hold_until: Option<Instant>,
}

impl InputDispatcher {
    /// Creates a dispatcher with no hold armed.
    #[must_use]
    pub const fn new() -> Self {
        Self { hold_until: None }
    }

    /// Resolves one button sample into the accepted actions, highest
    /// priority first.
    ///
    /// Returns an empty list while the debounce hold from a previous accept
    /// is still running. At most two actions can be accepted per poll (a
    /// brightness or minutes action plus an hours action); the hold scales
    /// with the number of accepted actions, matching the one-hold-per-action
    /// behavior of the hardware.
    pub fn poll(&mut self, sample: ButtonSample, now: Instant) -> Vec<ButtonAction, 2> {
        let mut actions = Vec::new();

        if let Some(deadline) = self.hold_until {
            if now < deadline {
                return actions;
            }
            self.hold_until = None;
        }

        if sample.brightness && sample.minutes {
            let _ = actions.push(ButtonAction::CycleBrightness);
        } else if sample.minutes {
            let _ = actions.push(ButtonAction::BumpMinute);
        }
        if sample.hours {
            let _ = actions.push(ButtonAction::BumpHour);
        }

        if !actions.is_empty() {
            self.hold_until = Some(now + DEBOUNCE_HOLD * actions.len() as u32);
        }
        actions
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
