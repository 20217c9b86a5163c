//! STM32F0 board support for SoftPWM
//!
//! This crate implements the `softpwm-hal` traits on STM32F0 register
//! blocks and owns the single software PWM instance for the board:
//!
//! - STM32F042F6 / STM32F042K6
//!
//! # Features
//!
//! - `stm32f042f6`, `stm32f042k6` - Chip selection
//! - `tim3` - Use TIM3 instead of TIM2 for the PWM time base
//! - `defmt` - Enable debug formatting and logging
//!
//! # Usage
//!
//! The firmware routes the timer vector to [`pwm::on_timer_interrupt`] and
//! then calls [`pwm::analog_write`] from thread mode:
//!
//! ```ignore
//! #[interrupt]
//! fn TIM2() {
//!     softpwm_hal_stm32f0::pwm::on_timer_interrupt();
//! }
//!
//! softpwm_hal_stm32f0::pwm::analog_write(pin, 128)?;
//! ```

#![no_std]

pub mod gpio;
pub mod pwm;
pub mod timer;

pub use gpio::{pin_by_name, Stm32Board, Stm32Port, PIN_COUNT};
pub use timer::Stm32Timer;
