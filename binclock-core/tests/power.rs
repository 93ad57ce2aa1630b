use binclock_core::buttons::ButtonSample;
use binclock_core::clock::{SharedClock, DISPLAY_TIMEOUT_SECS};
use binclock_core::power::{PowerManager, PowerState};

const NONE: ButtonSample = ButtonSample {
    brightness: false,
    minutes: false,
    hours: false,
};

const MINUTES_PRESSED: ButtonSample = ButtonSample {
    brightness: false,
    minutes: true,
    hours: false,
};

#[test]
fn starts_active() {
    let power = PowerManager::new();
    assert_eq!(power.state(), PowerState::Active);
}

#[test]
fn stays_active_while_timeout_running() {
    let mut power = PowerManager::new();
    for timeout in 1..=DISPLAY_TIMEOUT_SECS {
        assert!(!power.check_timeout(timeout));
        assert_eq!(power.state(), PowerState::Active);
    }
}

#[test]
fn scenario_last_tick_sends_device_to_sleep() {
    // Start with one second of display time left.
    let clock = SharedClock::new();
    for _ in 0..DISPLAY_TIMEOUT_SECS - 1 {
        clock.tick();
    }
    assert_eq!(clock.display_timeout(), 1);

    // One tick with no button asserted expires the timeout.
    clock.tick();
    let mut power = PowerManager::new();
    assert!(power.check_timeout(clock.display_timeout()));
    assert_eq!(power.state(), PowerState::Sleeping);
}

#[test]
fn tick_wake_without_button_goes_back_to_sleep() {
    let mut power = PowerManager::new();
    assert!(power.check_timeout(0));

    // Several 1 Hz wake-ups with nothing pressed stay logically asleep.
    for _ in 0..5 {
        assert!(!power.note_wake(NONE));
        assert_eq!(power.state(), PowerState::Sleeping);
    }
}

#[test]
fn scenario_button_wake_restores_active_display() {
    let clock = SharedClock::new();
    for _ in 0..DISPLAY_TIMEOUT_SECS {
        clock.tick();
    }
    let mut power = PowerManager::new();
    assert!(power.check_timeout(clock.display_timeout()));

    // Minutes button observed asserted after a tick wake: back to Active
    // with a re-armed timeout and the current time ready to render.
    assert!(power.note_wake(MINUTES_PRESSED));
    assert_eq!(power.state(), PowerState::Active);

    let restored = clock.touch();
    assert_eq!(clock.display_timeout(), DISPLAY_TIMEOUT_SECS);
    assert_eq!((restored.hours, restored.minutes), (12, 0));
}

#[test]
fn wake_classification_only_applies_while_sleeping() {
    let mut power = PowerManager::new();
    // A press while Active is the dispatcher's business, not a wake.
    assert!(!power.note_wake(MINUTES_PRESSED));
    assert_eq!(power.state(), PowerState::Active);
}

#[test]
fn timeout_check_is_idempotent_once_sleeping() {
    let mut power = PowerManager::new();
    assert!(power.check_timeout(0));
    // Only the first expiry reports a transition (one blank per entry).
    assert!(!power.check_timeout(0));
    assert_eq!(power.state(), PowerState::Sleeping);
}
