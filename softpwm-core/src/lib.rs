//! Board-agnostic software PWM core
//!
//! Emulates PWM on any GPIO pin by multiplexing a single hardware timer:
//!
//! - Pin slot table (dense, fixed capacity)
//! - Duty/period evaluator
//! - Adaptive timer scheduler (reload follows the next pin transition)
//! - Dispatch hooks for the interrupt vector and pin-mode changes
//! - [`SoftPwm`], the owned object tying these together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod pwm;
pub mod scheduler;
pub mod slots;

#[cfg(test)]
pub(crate) mod mock;

pub use config::PwmConfig;
pub use dispatch::{Bindings, Hooks};
pub use error::PwmError;
pub use pwm::{SoftPwm, TimerState};
pub use slots::{PinSlot, SlotTable};
