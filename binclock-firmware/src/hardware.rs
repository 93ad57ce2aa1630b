//! Hardware abstraction and peripheral initialization.
//!
//! This module maps the core's port and PWM facades onto the STM32L031
//! GPIO and TIM2 peripherals.
//!
//! # Pin Assignments
//!
//! ## Minutes LED bus (6 lines, bit 0 = LSB of the minute value)
//! - **PA2**: MIN0
//! - **PA3**: MIN1
//! - **PA4**: MIN2
//! - **PA5**: MIN3
//! - **PA6**: MIN4
//! - **PA7**: MIN5
//!
//! ## Hours LED bus (5 lines, presented as bits 3-7 of the port facade)
//! - **PB3**: HR0
//! - **PB4**: HR1
//! - **PB5**: HR2
//! - **PB6**: HR3
//! - **PA15**: HR4
//!
//! ## Buttons (active-low, internal pull-ups; bits 0-2 of the hours port
//! ## facade, matching the shared-wiring layout of the board)
//! - **PA8**: BTN_BRIGHTNESS (doubles as the wake button)
//! - **PB0**: BTN_MINUTES
//! - **PB1**: BTN_HOURS
//!
//! ## PWM dimming (TIM2, 8-bit duty resolution at the facade)
//! - **PA0**: TIM2_CH1 - minutes-bus supply
//! - **PA1**: TIM2_CH2 - hours-bus supply
//!
//! ## Low Power & RTC
//! - **PC14**: OSC32_IN - 32.768 kHz crystal input
//! - **PC15**: OSC32_OUT - 32.768 kHz crystal output

use binclock_core::display::HOURS_LED_SHIFT;
use binclock_core::{LedPort, PwmChannels};
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::peripherals::TIM2;
use embassy_stm32::time::khz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm, SimplePwmChannel};

/// The six minutes LED lines, presented to the core as bits 0-5 of one
/// fully-owned output bus.
pub struct MinutesBus {
    lines: [Output<'static>; 6],
}

impl LedPort for MinutesBus {
    /// The minutes bus carries no inputs; reads return the driven levels.
    fn read_inputs(&self) -> u8 {
        let mut levels = 0;
        for (bit, line) in self.lines.iter().enumerate() {
            if line.is_set_high() {
                levels |= 1 << bit;
            }
        }
        levels
    }

    fn write_outputs(&mut self, mask: u8, value: u8) {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            if mask & (1 << bit) != 0 {
                line.set_level(Level::from(value & (1 << bit) != 0));
            }
        }
    }
}

/// The five hours LED lines plus the three button inputs, presented to the
/// core as one 8-bit port: buttons on bits 0-2, LEDs on bits 3-7.
///
/// The facade can only physically drive the LED pins, so a write with a
/// stray mask bit still cannot disturb the button lines or their pull-ups.
pub struct HoursPort {
    leds: [Output<'static>; 5],
    buttons: [Input<'static>; 3],
}

impl LedPort for HoursPort {
    fn read_inputs(&self) -> u8 {
        let mut levels = 0;
        for (bit, button) in self.buttons.iter().enumerate() {
            if button.is_high() {
                levels |= 1 << bit;
            }
        }
        for (led, line) in self.leds.iter().enumerate() {
            if line.is_set_high() {
                levels |= 1 << (led as u8 + HOURS_LED_SHIFT);
            }
        }
        levels
    }

    fn write_outputs(&mut self, mask: u8, value: u8) {
        for (led, line) in self.leds.iter_mut().enumerate() {
            let bit = 1 << (led as u8 + HOURS_LED_SHIFT);
            if mask & bit != 0 {
                line.set_level(Level::from(value & bit != 0));
            }
        }
    }
}

/// The two TIM2 duty outputs dimming the LED buses.
pub struct PwmOutputs {
    minutes: SimplePwmChannel<'static, TIM2>,
    hours: SimplePwmChannel<'static, TIM2>,
}

impl PwmChannels for PwmOutputs {
    fn set_minutes_duty(&mut self, duty: u8) {
        self.minutes.set_duty_cycle_fraction(u16::from(duty), 255);
    }

    fn set_hours_duty(&mut self, duty: u8) {
        self.hours.set_duty_cycle_fraction(u16::from(duty), 255);
    }
}

/// Top-level peripheral container for the clock board.
pub struct Board {
    /// Display driver over the two LED bus facades (also samples buttons)
    pub display: binclock_core::DisplayDriver<MinutesBus, HoursPort>,
    /// PWM dimming channels
    pub pwm: PwmOutputs,
}

impl Board {
    /// Initializes all peripherals from the STM32 peripheral singleton.
    ///
    /// # Initial GPIO States
    ///
    /// - All LED lines: low (dark) until the first render
    /// - Button lines: inputs with internal pull-ups (active-low)
    /// - TIM2 CH1/CH2: enabled at 1 kHz, duty programmed by the
    ///   brightness controller before the first render
    pub fn new(p: embassy_stm32::Peripherals) -> Self {
        let pwm = SimplePwm::new(
            p.TIM2,
            Some(PwmPin::new_ch1(p.PA0, OutputType::PushPull)),
            Some(PwmPin::new_ch2(p.PA1, OutputType::PushPull)),
            None,
            None,
            khz(1),
            Default::default(),
        );
        let channels = pwm.split();
        let mut minutes_pwm = channels.ch1;
        let mut hours_pwm = channels.ch2;
        minutes_pwm.enable();
        hours_pwm.enable();

        let minutes_bus = MinutesBus {
            lines: [
                Output::new(p.PA2, Level::Low, Speed::Low),
                Output::new(p.PA3, Level::Low, Speed::Low),
                Output::new(p.PA4, Level::Low, Speed::Low),
                Output::new(p.PA5, Level::Low, Speed::Low),
                Output::new(p.PA6, Level::Low, Speed::Low),
                Output::new(p.PA7, Level::Low, Speed::Low),
            ],
        };
        let hours_port = HoursPort {
            leds: [
                Output::new(p.PB3, Level::Low, Speed::Low),
                Output::new(p.PB4, Level::Low, Speed::Low),
                Output::new(p.PB5, Level::Low, Speed::Low),
                Output::new(p.PB6, Level::Low, Speed::Low),
                Output::new(p.PA15, Level::Low, Speed::Low),
            ],
            buttons: [
                Input::new(p.PA8, Pull::Up),
                Input::new(p.PB0, Pull::Up),
                Input::new(p.PB1, Pull::Up),
            ],
        };

        Self {
            display: binclock_core::DisplayDriver::new(minutes_bus, hours_port),
            pwm: PwmOutputs {
                minutes: minutes_pwm,
                hours: hours_pwm,
            },
        }
    }
}
