//! SoftPWM Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interfaces the software PWM core
//! drives. Chip-specific crates (STM32F0, etc.) implement them so the same
//! scheduler runs on any board and on the host under test.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (softpwm-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softpwm-core (slots, scheduler)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softpwm-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ softpwm-hal-  │
//!             │   stm32f0     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PortBank`] - Atomic set/reset of pins within a GPIO port
//! - [`gpio::PinTable`] - Logical pin number to `(port, mask)` lookup
//! - [`gpio::PinModeControl`] - Pin mode switching
//! - [`timer::UpdateTimer`] - Update-event timer driven by the scheduler

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{PinId, PinMode, PinModeControl, PinTable, PortBank};
pub use timer::{auto_reload, CountMode, UpdateTimer};
