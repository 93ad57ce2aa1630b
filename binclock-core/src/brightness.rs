//! Brightness level cycling and the per-channel duty tables.
//!
//! Brightness is a single index into two fixed five-entry duty tables, one
//! per LED bus. The minutes bus spans the full dynamic range for
//! visibility; the hours bus stays in a narrow high-duty band so the hour
//! LEDs remain dimmer and less distracting.

use crate::PwmChannels;

/// Number of selectable brightness levels.
pub const LEVEL_COUNT: usize = 5;

/// Duty table for the minutes-bus PWM channel, one entry per level.
pub const MINUTES_DUTY_TABLE: [u8; LEVEL_COUNT] = [0, 50, 100, 150, 255];

/// Duty table for the hours-bus PWM channel, one entry per level.
pub const HOURS_DUTY_TABLE: [u8; LEVEL_COUNT] = [240, 243, 245, 250, 255];

/// Power-on brightness level (the middle table entry).
const DEFAULT_LEVEL: usize = 2;

/// Holds the current brightness level and programs the PWM facade.
///
/// Owned by the main loop; the index wraps modulo [`LEVEL_COUNT`], so it is
/// always a valid table index by construction.
pub struct BrightnessController {
    index: usize,
}

impl BrightnessController {
    /// Creates a controller at the power-on level.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: DEFAULT_LEVEL,
        }
    }

    /// Returns the current level index, 0-4.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the duty pair `(minutes, hours)` for the current level.
    #[must_use]
    pub const fn duties(&self) -> (u8, u8) {
        (MINUTES_DUTY_TABLE[self.index], HOURS_DUTY_TABLE[self.index])
    }

    /// Advances to the next level, wrapping after the brightest entry, and
    /// programs both PWM channels.
    pub fn advance(&mut self, pwm: &mut impl PwmChannels) {
        self.index = (self.index + 1) % LEVEL_COUNT;
        self.apply(pwm);
    }

    /// Programs both PWM channels with the current level's duties.
    ///
    /// Called once at startup and after every level change.
    pub fn apply(&self, pwm: &mut impl PwmChannels) {
        let (minutes, hours) = self.duties();
        pwm.set_minutes_duty(minutes);
        pwm.set_hours_duty(hours);
    }
}

impl Default for BrightnessController {
    fn default() -> Self {
        Self::new()
    }
}
