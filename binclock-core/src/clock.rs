//! Wall-clock time, display timeout, and the 1 Hz tick.
//!
//! The tick context is the sole writer of the time and the sole decrementer
//! of the display timeout; the main loop adjusts minutes/hours and re-arms
//! the timeout in response to button presses. [`SharedClock`] wraps both in
//! a critical section so that every observation from the main loop is a
//! consistent snapshot, even when a tick lands mid-rollover.

use core::cell::RefCell;

use critical_section::Mutex;

/// Seconds the display stays lit after the last accepted interaction.
pub const DISPLAY_TIMEOUT_SECS: u8 = 10;

/// A wall-clock time of day.
///
/// All arithmetic is closed under modular wraparound, so out-of-range values
/// cannot be produced by [`tick`](Self::tick) or the bump operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct TimeOfDay {
    /// Hours, 0-23
    pub hours: u8,
    /// Minutes, 0-59
    pub minutes: u8,
    /// Seconds, 0-59
    pub seconds: u8,
}

impl Default for TimeOfDay {
    /// The power-on time. The device has no persistence, so every boot
    /// starts the clock at noon.
    fn default() -> Self {
        Self {
            hours: 12,
            minutes: 0,
            seconds: 0,
        }
    }
}

impl TimeOfDay {
    /// Advances the clock by one second.
    ///
    /// Returns `true` when the minute changed, i.e. when the binary display
    /// would show a different value and a refresh is due.
    pub fn tick(&mut self) -> bool {
        self.seconds += 1;
        if self.seconds >= 60 {
            self.seconds = 0;
            self.bump_minute();
            return true;
        }
        false
    }

    /// Increments the minute, carrying into hours at the 60-minute rollover.
    pub fn bump_minute(&mut self) {
        self.minutes += 1;
        if self.minutes >= 60 {
            self.minutes = 0;
            self.bump_hour();
        }
    }

    /// Increments the hour, wrapping from 23 back to 0.
    pub fn bump_hour(&mut self) {
        self.hours = (self.hours + 1) % 24;
    }
}

/// Inner state guarded by the [`SharedClock`] critical section.
struct ClockCell {
    time: TimeOfDay,
    /// Remaining lit seconds; 0 means the display has timed out.
    timeout: u8,
    /// Set by the tick on a minute rollover while the display is lit,
    /// cleared when the main loop picks it up and re-renders.
    refresh: bool,
}

/// Interrupt-safe container for the clock state shared between the 1 Hz
/// tick context and the polling main loop.
///
/// Every method runs inside a single critical section, so the tick can
/// preempt the main loop at any instant without either side observing a
/// partial update (e.g. minutes incremented but the hour carry not yet
/// applied).
pub struct SharedClock {
    inner: Mutex<RefCell<ClockCell>>,
}

impl SharedClock {
    /// Creates a clock at the power-on defaults: 12:00:00 with a freshly
    /// armed display timeout.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ClockCell {
                time: TimeOfDay {
                    hours: 12,
                    minutes: 0,
                    seconds: 0,
                },
                timeout: DISPLAY_TIMEOUT_SECS,
                refresh: false,
            })),
        }
    }

    /// Advances the clock by one second and counts the display timeout down.
    ///
    /// Called exactly once per real second by the time base, independent of
    /// main-loop progress. On a minute rollover while the display is still
    /// lit, a refresh request is recorded for the main loop. The timeout
    /// never decrements below zero.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow_ref_mut(cs);
            let rolled = cell.time.tick();
            if rolled && cell.timeout > 0 {
                cell.refresh = true;
            }
            if cell.timeout > 0 {
                cell.timeout -= 1;
            }
        });
    }

    /// Returns a consistent snapshot of the current time.
    pub fn snapshot(&self) -> TimeOfDay {
        critical_section::with(|cs| self.inner.borrow_ref(cs).time)
    }

    /// Returns the remaining display timeout in seconds.
    pub fn display_timeout(&self) -> u8 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).timeout)
    }

    /// Re-arms the display timeout without changing the time.
    ///
    /// Used by brightness changes and by the wake-from-sleep path. Returns
    /// the snapshot to render.
    pub fn touch(&self) -> TimeOfDay {
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow_ref_mut(cs);
            cell.timeout = DISPLAY_TIMEOUT_SECS;
            cell.time
        })
    }

    /// Applies a minutes-button press: +1 minute (with hour carry) and a
    /// re-armed timeout. Returns the snapshot to render.
    pub fn bump_minute(&self) -> TimeOfDay {
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow_ref_mut(cs);
            cell.time.bump_minute();
            cell.timeout = DISPLAY_TIMEOUT_SECS;
            cell.time
        })
    }

    /// Applies an hours-button press: +1 hour (mod 24) and a re-armed
    /// timeout. Returns the snapshot to render.
    pub fn bump_hour(&self) -> TimeOfDay {
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow_ref_mut(cs);
            cell.time.bump_hour();
            cell.timeout = DISPLAY_TIMEOUT_SECS;
            cell.time
        })
    }

    /// Takes a pending refresh request, if any, returning the snapshot to
    /// render. The request is cleared.
    pub fn take_refresh(&self) -> Option<TimeOfDay> {
        critical_section::with(|cs| {
            let mut cell = self.inner.borrow_ref_mut(cs);
            if cell.refresh {
                cell.refresh = false;
                Some(cell.time)
            } else {
                None
            }
        })
    }
}

impl Default for SharedClock {
    fn default() -> Self {
        Self::new()
    }
}
