//! 1 Hz time base driving the wall clock and the sleep wake-up.
//!
//! The embassy time driver runs from the 32.768 kHz crystal configuration
//! (`tick-hz-32_768`), so the one-second cadence is crystal-derived rather
//! than tied to the MSI sysclk. The tick task is the sole writer of the
//! wall-clock time and the sole decrementer of the display timeout; both
//! live behind the [`SharedClock`] critical section, so a tick landing
//! between two main-loop reads can never expose a half-carried rollover.
//!
//! Each tick is also announced on [`TICK_WAKE`]. While the device sleeps,
//! that signal is the only wake source: the main loop wakes once per
//! second, samples the buttons, and re-enters suspend if none is pressed.

use binclock_core::SharedClock;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

/// Announces each completed tick to the (possibly suspended) main loop.
///
/// Mirrors the interrupt-to-loop signalling used for button wake-up: the
/// tick context signals, the sleeping main loop waits.
pub static TICK_WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Async task advancing the clock exactly once per second.
///
/// Runs independently of main-loop progress; a busy main loop delays
/// rendering, never timekeeping.
#[embassy_executor::task]
pub async fn tick_task(clock: &'static SharedClock) {
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        clock.tick();
        TICK_WAKE.signal(());
    }
}
