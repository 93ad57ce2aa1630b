use binclock_core::brightness::{BrightnessController, LEVEL_COUNT};
use binclock_core::buttons::{
    ButtonAction, ButtonSample, InputDispatcher, BUTTON_BRIGHTNESS, BUTTON_HOURS,
    BUTTON_LINE_MASK, BUTTON_MINUTES,
};
use binclock_core::PwmChannels;
use embassy_time::Instant;

const NONE: ButtonSample = ButtonSample {
    brightness: false,
    minutes: false,
    hours: false,
};

fn pressed(brightness: bool, minutes: bool, hours: bool) -> ButtonSample {
    ButtonSample {
        brightness,
        minutes,
        hours,
    }
}

#[derive(Default)]
struct RecordingPwm {
    minutes: Option<u8>,
    hours: Option<u8>,
}

impl PwmChannels for RecordingPwm {
    fn set_minutes_duty(&mut self, duty: u8) {
        self.minutes = Some(duty);
    }

    fn set_hours_duty(&mut self, duty: u8) {
        self.hours = Some(duty);
    }
}

#[test]
fn active_low_decoding() {
    // All lines pulled up: nothing pressed.
    assert_eq!(ButtonSample::from_levels(BUTTON_LINE_MASK), NONE);
    // A low level means pressed.
    assert_eq!(
        ButtonSample::from_levels(BUTTON_LINE_MASK & !BUTTON_MINUTES),
        pressed(false, true, false)
    );
    assert_eq!(
        ButtonSample::from_levels(!(BUTTON_BRIGHTNESS | BUTTON_HOURS)),
        pressed(true, false, true)
    );
    assert!(ButtonSample::from_levels(0).any_pressed());
    assert!(!NONE.any_pressed());
}

#[test]
fn combo_takes_priority_over_minutes_alone() {
    let mut dispatcher = InputDispatcher::new();
    let actions = dispatcher.poll(pressed(true, true, false), Instant::from_millis(0));
    assert_eq!(actions.as_slice(), [ButtonAction::CycleBrightness]);
}

#[test]
fn minutes_alone_bumps_minute() {
    let mut dispatcher = InputDispatcher::new();
    let actions = dispatcher.poll(pressed(false, true, false), Instant::from_millis(0));
    assert_eq!(actions.as_slice(), [ButtonAction::BumpMinute]);
}

#[test]
fn brightness_alone_is_wake_only() {
    let mut dispatcher = InputDispatcher::new();
    let actions = dispatcher.poll(pressed(true, false, false), Instant::from_millis(0));
    assert!(actions.is_empty());
}

#[test]
fn hours_is_resolved_unconditionally() {
    let mut dispatcher = InputDispatcher::new();
    let actions = dispatcher.poll(pressed(true, true, true), Instant::from_millis(0));
    assert_eq!(
        actions.as_slice(),
        [ButtonAction::CycleBrightness, ButtonAction::BumpHour]
    );

    let mut dispatcher = InputDispatcher::new();
    let actions = dispatcher.poll(pressed(false, false, true), Instant::from_millis(0));
    assert_eq!(actions.as_slice(), [ButtonAction::BumpHour]);
}

#[test]
fn held_button_repeats_every_hold_period() {
    let mut dispatcher = InputDispatcher::new();
    let held = pressed(false, true, false);

    assert_eq!(
        dispatcher.poll(held, Instant::from_millis(0)).as_slice(),
        [ButtonAction::BumpMinute]
    );
    // Polls inside the 200 ms hold are suppressed, even though the level
    // is still asserted.
    assert!(dispatcher.poll(held, Instant::from_millis(10)).is_empty());
    assert!(dispatcher.poll(held, Instant::from_millis(190)).is_empty());
    // Once the hold elapses the held button auto-repeats.
    assert_eq!(
        dispatcher.poll(held, Instant::from_millis(200)).as_slice(),
        [ButtonAction::BumpMinute]
    );
}

#[test]
fn hold_scales_with_accepted_action_count() {
    let mut dispatcher = InputDispatcher::new();
    let both = pressed(false, true, true);

    assert_eq!(dispatcher.poll(both, Instant::from_millis(0)).len(), 2);
    // Two accepted actions arm a 2 * 200 ms hold.
    assert!(dispatcher.poll(both, Instant::from_millis(399)).is_empty());
    assert_eq!(dispatcher.poll(both, Instant::from_millis(400)).len(), 2);
}

#[test]
fn release_during_hold_accepts_nothing_afterwards() {
    let mut dispatcher = InputDispatcher::new();
    dispatcher.poll(pressed(false, true, false), Instant::from_millis(0));
    assert!(dispatcher.poll(NONE, Instant::from_millis(250)).is_empty());
}

#[test]
fn brightness_index_advances_mod_five_from_middle() {
    let mut controller = BrightnessController::new();
    let mut pwm = RecordingPwm::default();
    assert_eq!(controller.index(), 2);

    for advances in 1..=12usize {
        controller.advance(&mut pwm);
        assert_eq!(controller.index(), (2 + advances) % LEVEL_COUNT);
    }
}

#[test]
fn scenario_wrap_to_dimmest_level() {
    let mut controller = BrightnessController::new();
    let mut pwm = RecordingPwm::default();
    // Walk 2 -> 3 -> 4.
    controller.advance(&mut pwm);
    controller.advance(&mut pwm);
    assert_eq!(controller.index(), 4);
    assert_eq!(controller.duties(), (255, 255));

    // One more combo advance wraps to level 0.
    controller.advance(&mut pwm);
    assert_eq!(controller.index(), 0);
    assert_eq!(pwm.minutes, Some(0));
    assert_eq!(pwm.hours, Some(240));
}

#[test]
fn apply_programs_both_channels() {
    let controller = BrightnessController::new();
    let mut pwm = RecordingPwm::default();
    controller.apply(&mut pwm);
    assert_eq!(pwm.minutes, Some(100));
    assert_eq!(pwm.hours, Some(245));
}
