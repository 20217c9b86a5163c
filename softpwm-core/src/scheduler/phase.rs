//! Phase counter and per-interrupt protocol

use softpwm_hal::{PortBank, UpdateTimer};

use super::evaluator::drive_slots;
use crate::slots::PinSlot;

/// Phase counter plus the period the timer was last programmed with
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    /// Elapsed ticks since the timer started (wrapping)
    counter: u32,
    /// Reload value currently in the timer
    period: u32,
    /// Counter modulus and fallback period
    max_period: u32,
}

impl PhaseScheduler {
    /// Create a scheduler for a timer started with `max_period` as reload
    pub const fn new(max_period: u32) -> Self {
        Self {
            counter: 0,
            period: max_period,
            max_period,
        }
    }

    /// Current phase counter
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Period the timer is currently programmed with
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Handle one timer interrupt
    ///
    /// Returns `false` without touching any state if the update event is
    /// not pending or not enabled (shared or spurious interrupt).
    pub fn on_update<T, P>(&mut self, timer: &mut T, slots: &[PinSlot<P>]) -> bool
    where
        T: UpdateTimer,
        P: PortBank,
    {
        if !timer.is_update_flag_set() || !timer.is_update_interrupt_enabled() {
            return false;
        }
        timer.clear_update_flag();

        let next = self.advance(slots);
        timer.set_reload(next);
        true
    }

    /// Advance by the elapsed period, drive all pins and pick the next period
    pub fn advance<P: PortBank>(&mut self, slots: &[PinSlot<P>]) -> u32 {
        self.counter = self.counter.wrapping_add(self.period);
        let next = drive_slots(slots, self.counter, self.max_period);
        self.period = non_zero_period(next, self.max_period);
        self.period
    }
}

/// A zero reload would stall the timer or storm the interrupt line
fn non_zero_period(next: u32, max_period: u32) -> u32 {
    if next == 0 {
        max_period
    } else {
        next
    }
}
