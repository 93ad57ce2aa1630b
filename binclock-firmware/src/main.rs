//! Firmware for a battery-powered binary LED clock.
//!
//! # Overview
//!
//! This firmware drives a binary wall clock featuring:
//! - Six minute LEDs and five hour LEDs on two PWM-dimmed buses
//! - Three active-low buttons: brightness/wake, minutes, hours
//! - Five brightness levels with independent per-bus duty tables
//! - A 10-second display timeout followed by low-power sleep
//!
//! # Hardware
//!
//! - **MCU**: STM32L031G6 (Cortex-M0+, ultra-low-power)
//! - **Time base**: 32.768 kHz crystal on the LSE oscillator
//! - **LEDs**: 11 total on PORTA/PORTB lines, bus supplies switched by
//!   TIM2 CH1/CH2 PWM
//! - **Buttons**: internal pull-ups, sampled by polling (no edge
//!   interrupts)
//!
//! # Power Management
//!
//! The display stays lit for 10 seconds after the last accepted button
//! press, then blanks, and the executor suspends the core between events.
//! The 1 Hz time base is the only wake source while sleeping: every wake
//! samples the buttons once and either restores the display (button
//! pressed) or re-enters suspend.
//!
//! # Module Organization
//!
//! - [`hardware`] - Pin mappings and the port/PWM facade implementations
//! - [`timebase`] - The 1 Hz tick task and its wake signal
//! - `binclock_core` - Timekeeping, input resolution, brightness, display
//!   rendering, and the power state machine (host-tested)

#![no_std]
#![no_main]

mod hardware;
mod timebase;

use binclock_core::{
    BrightnessController, ButtonAction, InputDispatcher, PowerManager, PowerState, SharedClock,
};
use embassy_executor::Spawner;
use embassy_stm32::{
    rcc::{mux::ClockMux, LsConfig, LseConfig},
    time::Hertz,
    Config,
};
use embassy_time::{Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use hardware::Board;
use timebase::{tick_task, TICK_WAKE};

/// Main-loop poll period while the display is active.
///
/// Button sampling, action dispatch, and the timeout check all run on this
/// cadence; it bounds input latency, not timekeeping.
const POLL_PERIOD: Duration = Duration::from_millis(10);

/// Wall-clock time, display timeout, and refresh requests, shared between
/// the tick task and the main loop.
static CLOCK: SharedClock = SharedClock::new();

/// Creates a low-power clock configuration for STM32L031.
///
/// # Clock Settings
///
/// - **MSI**: 1.048 MHz in normal mode, 2.097 MHz in debug mode (for a
///   reliable debug connection)
/// - **System clock**: MSI (no PLL)
/// - **LSE**: 32.768 kHz external crystal for the time base
/// - **Voltage scale**: Range 1 (1.8V core for low power)
///
/// This configuration prioritizes power efficiency over performance; the
/// main loop only samples three buttons and writes eleven GPIO lines per
/// 10 ms cycle.
fn create_low_power_config() -> embassy_stm32::rcc::Config {
    embassy_stm32::rcc::Config {
        #[cfg(feature = "debug-mode")]
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE2M),
        #[cfg(not(feature = "debug-mode"))]
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE1M),
        hsi: false,
        hse: None,
        pll: None,
        sys: embassy_stm32::rcc::Sysclk::MSI,
        ahb_pre: embassy_stm32::rcc::AHBPrescaler::DIV1,
        apb1_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        apb2_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        ls: LsConfig {
            rtc: embassy_stm32::rcc::RtcClockSource::LSE,
            lsi: false,
            lse: Some(LseConfig {
                frequency: Hertz::hz(32768),
                mode: embassy_stm32::rcc::LseMode::Oscillator(embassy_stm32::rcc::LseDrive::Low),
            }),
        },
        voltage_scale: embassy_stm32::rcc::VoltageScale::RANGE1,
        mux: ClockMux::default(),
    }
}

/// Main entry point for the binary clock firmware.
///
/// # Initialization Sequence
///
/// 1. Configure clocks for low-power operation (MSI sysclk, LSE crystal)
/// 2. Initialize GPIO buses, buttons, and the TIM2 PWM channels
/// 3. Program the PWM from the default brightness level (middle entry)
/// 4. Render the boot time (12:00:00) with a fresh 10-second timeout
/// 5. Spawn the 1 Hz tick task
/// 6. Enter the poll loop
///
/// # Main Loop
///
/// While Active, each 10 ms cycle samples the buttons, applies the accepted
/// actions (brightness combo, +1 minute, +1 hour - each re-rendering and
/// re-arming the timeout), picks up minute-rollover refresh requests from
/// the tick task, and checks the timeout. On expiry the display blanks and
/// the loop parks on the tick signal; each 1 Hz wake samples the buttons
/// once and returns to Active only when one is pressed.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_low_power_config();

    let p = embassy_stm32::init(config);

    #[cfg(feature = "debug-mode")]
    {
        defmt::info!("binary clock firmware starting...");
        // Give the debugger a moment to attach before the executor starts
        // suspending the core between poll periods.
        Timer::after_secs(3).await;
    }

    let mut board = Board::new(p);
    let mut brightness = BrightnessController::new();
    let mut dispatcher = InputDispatcher::new();
    let mut power = PowerManager::new();

    brightness.apply(&mut board.pwm);
    board.display.render(CLOCK.snapshot());

    spawner.spawn(tick_task(&CLOCK)).unwrap();

    #[cfg(feature = "debug-mode")]
    defmt::info!("entering poll loop");

    loop {
        match power.state() {
            PowerState::Active => {
                let sample = board.display.read_buttons();
                for action in dispatcher.poll(sample, Instant::now()) {
                    match action {
                        ButtonAction::CycleBrightness => {
                            brightness.advance(&mut board.pwm);
                            board.display.render(CLOCK.touch());

                            #[cfg(feature = "debug-mode")]
                            defmt::info!("brightness level {}", brightness.index());
                        }
                        ButtonAction::BumpMinute => {
                            board.display.render(CLOCK.bump_minute());
                        }
                        ButtonAction::BumpHour => {
                            board.display.render(CLOCK.bump_hour());
                        }
                    }
                }

                if let Some(snapshot) = CLOCK.take_refresh() {
                    board.display.render(snapshot);
                }

                if power.check_timeout(CLOCK.display_timeout()) {
                    board.display.blank();
                    // Park on the next tick, not a stale one from the
                    // active period.
                    TICK_WAKE.reset();

                    #[cfg(feature = "debug-mode")]
                    defmt::info!("display timeout, sleeping");
                } else {
                    Timer::after(POLL_PERIOD).await;
                }
            }
            PowerState::Sleeping => {
                // The core suspends here; the 1 Hz tick is the only wake
                // source.
                TICK_WAKE.wait().await;

                let sample = board.display.read_buttons();
                if power.note_wake(sample) {
                    board.display.render(CLOCK.touch());

                    #[cfg(feature = "debug-mode")]
                    defmt::info!("button wake, display restored");
                }
            }
        }
    }
}
