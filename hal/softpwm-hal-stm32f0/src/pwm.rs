//! Board software PWM instance
//!
//! One `SoftPwm` per board, sized to drive every pin, plus the entry
//! points the firmware and the timer vector use.

use softpwm_core::{Bindings, Hooks, PwmConfig, PwmError, SoftPwm, TimerState};
use softpwm_hal::{PinMode, PinModeControl, PinTable};

use crate::gpio::{Stm32Board, Stm32Port, PIN_COUNT};
use crate::timer::Stm32Timer;

/// Board PWM driver type
pub type BoardPwm = SoftPwm<'static, Stm32Timer, Stm32Port, PIN_COUNT>;

/// Vector and pin-release dispatch, filled on first `analog_write`
pub static HOOKS: Hooks<Stm32Port> = Hooks::new();

/// The board's software PWM driver
pub static PWM: BoardPwm = SoftPwm::new(
    PwmConfig::DEFAULT,
    Stm32Timer::new(),
    &HOOKS,
    Bindings {
        isr: pwm_isr,
        release: pwm_release,
    },
);

fn pwm_isr() {
    PWM.on_interrupt();
}

fn pwm_release(port: Stm32Port, mask: u32) {
    PWM.disable(port, mask);
}

/// Drive `pin` with an 8-bit duty value (0 = off, 255 = on)
///
/// The first call claims and starts the PWM timer.
pub fn analog_write(pin: u8, value: u8) -> Result<(), PwmError> {
    #[cfg(feature = "defmt")]
    let was_running = PWM.state() == TimerState::Running;

    let result = PWM.analog_write(&mut Stm32Board, pin, value);

    #[cfg(feature = "defmt")]
    match result {
        Ok(()) if !was_running => defmt::info!("Software PWM timer started (pin {})", pin),
        Ok(()) => {}
        Err(e) => defmt::warn!("analog_write(pin {}) failed: {}", pin, e),
    }

    result
}

/// Change a pin's mode, taking it away from software PWM first
pub fn pin_mode(pin: u8, mode: PinMode) {
    if let Some(id) = Stm32Board.lookup(pin) {
        HOOKS.release(id.port, id.mask);
    }
    Stm32Board.set_pin_mode(pin, mode);
}

/// Check if the PWM timer has been claimed
pub fn is_running() -> bool {
    PWM.state() == TimerState::Running
}

/// Timer vector body
///
/// Call from the TIM2 (or TIM3 with the `tim3` feature) interrupt handler.
pub fn on_timer_interrupt() {
    HOOKS.on_timer_irq();
}
