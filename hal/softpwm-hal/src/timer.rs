//! Hardware timer abstraction
//!
//! The register contract the software PWM scheduler drives: a prescaled
//! counter whose auto-reload register decides when the next update
//! interrupt fires.

/// Counter direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountMode {
    /// Count up from 0 to the reload value
    Up,
    /// Count down from the reload value to 0
    Down,
}

/// Timer that raises an update event every `reload` ticks
///
/// `reload` is a tick count, not a register value: hardware whose counter
/// runs `0..=ARR` must program [`auto_reload`]`(reload)`. Implementations
/// must tolerate `set_reload` being called from the timer's own interrupt
/// handler.
pub trait UpdateTimer {
    /// Configure prescaler, count direction and initial reload value
    ///
    /// Also enables the peripheral clock. Does not start counting.
    fn init(&mut self, prescaler: u16, mode: CountMode, reload: u32);

    /// Enable the update interrupt and start counting
    fn start_interrupt_mode(&mut self);

    /// Raise the next update event `value` ticks after the last one
    fn set_reload(&mut self, value: u32);

    /// Acknowledge a pending update event
    fn clear_update_flag(&mut self);

    /// Check if an update event is pending
    fn is_update_flag_set(&self) -> bool;

    /// Check if the update event is routed to the interrupt line
    fn is_update_interrupt_enabled(&self) -> bool;
}

/// Auto-reload register value for an update event every `ticks` ticks
///
/// An up-counter counts `0..=arr` and overflows every `arr + 1` ticks.
/// Saturates at the 16-bit register width.
pub fn auto_reload(ticks: u32) -> u16 {
    u16::try_from(ticks.saturating_sub(1)).unwrap_or(u16::MAX)
}
