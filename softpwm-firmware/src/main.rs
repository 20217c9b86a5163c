//! SoftPWM demo firmware
//!
//! Fades four pins out of phase using software PWM on a single timer, and
//! periodically hands one pin back to GPIO input to exercise the release
//! hook.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::interrupt;
use embassy_time::{Duration, Ticker};
use softpwm_hal::PinMode;
use softpwm_hal_stm32f0::{pin_by_name, pwm};
use {defmt_rtt as _, panic_probe as _};

/// Pins to fade, by name
const FADE_PINS: [&str; 4] = ["PA4", "PA5", "PA6", "PA7"];

/// Time between brightness steps
const FADE_STEP_MS: u64 = 10;

/// Steps in one up-and-down fade
const FADE_STEPS: u32 = 510;

/// Steps between releasing and re-claiming the last pin
const RELEASE_EVERY: u32 = 4 * FADE_STEPS;

#[interrupt]
fn TIM2() {
    pwm::on_timer_interrupt();
}

/// Triangle wave 0..=255..=0 over `FADE_STEPS`
fn brightness(step: u32) -> u8 {
    let phase = step % FADE_STEPS;
    if phase < 256 {
        phase as u8
    } else {
        (FADE_STEPS - phase) as u8
    }
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("SoftPWM demo starting...");

    let _p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let mut pins = [0u8; FADE_PINS.len()];
    for (slot, name) in pins.iter_mut().zip(FADE_PINS) {
        match pin_by_name(name) {
            Some(pin) => *slot = pin,
            None => {
                error!("Unknown pin {}", name);
                return;
            }
        }
    }

    let mut ticker = Ticker::every(Duration::from_millis(FADE_STEP_MS));
    let mut step: u32 = 0;
    let mut released = false;

    loop {
        ticker.next().await;

        if step % RELEASE_EVERY == 0 && step != 0 {
            let last = pins[pins.len() - 1];
            released = !released;
            if released {
                info!("Releasing pin {} to input", last);
                pwm::pin_mode(last, PinMode::Input);
            } else {
                info!("Re-claiming pin {}", last);
            }
        }

        for (i, &pin) in pins.iter().enumerate() {
            if released && i == pins.len() - 1 {
                continue;
            }
            let offset = i as u32 * (FADE_STEPS / pins.len() as u32);
            if let Err(e) = pwm::analog_write(pin, brightness(step + offset)) {
                warn!("Pin {} not driven: {}", pin, e);
            }
        }

        step = step.wrapping_add(1);
    }
}
