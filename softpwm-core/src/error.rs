//! Software PWM errors

/// Errors reported to callers registering pins
///
/// Interrupt-side conditions (spurious interrupts, a degenerate zero
/// period) are corrected in place and never surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Pin number not present in the board pin table
    UnknownPin,
    /// Every slot is taken by another pin; the table was left unchanged
    TableFull,
    /// Resolution is zero or longer than the counter modulus
    InvalidResolution,
}
