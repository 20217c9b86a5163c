//! Adaptive timer scheduler
//!
//! Evaluates every active pin once per timer interrupt and reprograms the
//! timer to wake exactly at the next pin transition, instead of ticking at
//! the PWM resolution.

pub mod evaluator;
pub mod phase;

pub use evaluator::{drive_slots, evaluate_slot, SlotLevel};
pub use phase::PhaseScheduler;
