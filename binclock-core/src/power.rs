//! Active/Sleeping power state machine.
//!
//! The machine has exactly two states:
//!
//! - **Active**: display rendered, buttons polled every main-loop cycle.
//! - **Sleeping**: display blanked, the core suspended between 1 Hz ticks,
//!   buttons sampled only once per wake.
//!
//! The only wake source while sleeping is the periodic tick, so the core
//! wakes once per second even with no user present; a wake counts as
//! user-driven only when a button is observed asserted, otherwise the loop
//! re-enters suspend. There is no error state: anything that could go wrong
//! here is a hardware fault outside software's reach.

use crate::buttons::ButtonSample;

/// Current power state of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, defmt::Format)]
pub enum PowerState {
    /// Display lit, buttons polled
    #[default]
    Active,
    /// Display blanked, core suspended except for the 1 Hz tick wake
    Sleeping,
}

/// State machine coordinating display timeout expiry and button wake-up.
///
/// Invariant: the machine is in (or transitioning to) `Sleeping` exactly
/// when the display timeout has reached zero.
pub struct PowerManager {
    state: PowerState,
}

impl PowerManager {
    /// Creates the machine in the Active state, matching the freshly armed
    /// boot timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PowerState::Active,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }

    /// Checks the display timeout at the end of an Active iteration.
    ///
    /// Transitions to Sleeping and returns `true` when the timeout has
    /// expired; the caller must blank the display before suspending. Called
    /// after the iteration's button actions have been applied, so a press
    /// that just re-armed the timeout keeps the device awake.
    pub fn check_timeout(&mut self, display_timeout: u8) -> bool {
        if self.state == PowerState::Active && display_timeout == 0 {
            self.state = PowerState::Sleeping;
            return true;
        }
        false
    }

    /// Classifies one wake from suspend.
    ///
    /// Returns `true` — transitioning to Active — only when a button is
    /// observed asserted; the caller must then restore the display and
    /// re-arm the timeout. A tick wake with no button pressed leaves the
    /// machine Sleeping and the caller re-enters suspend.
    pub fn note_wake(&mut self, sample: ButtonSample) -> bool {
        if self.state == PowerState::Sleeping && sample.any_pressed() {
            self.state = PowerState::Active;
            return true;
        }
        false
    }
}

impl Default for PowerManager {
    fn default() -> Self {
        Self::new()
    }
}
