//! GPIO port abstractions
//!
//! Software PWM writes whole pin masks into a port's set/reset register
//! rather than going through per-pin handles, so the traits here work at
//! port granularity.

/// A GPIO register bank that can drive pins high or low by mask
///
/// Equality must compare *identity* (which register bank), not any
/// register content. Handles are cheap copies of that identity.
pub trait PortBank: Copy + PartialEq {
    /// Drive every pin in `mask` high
    fn set_mask(&self, mask: u32);

    /// Drive every pin in `mask` low
    fn reset_mask(&self, mask: u32);

    /// Drive every pin in `mask` to the given level
    fn write_mask(&self, mask: u32, high: bool) {
        if high {
            self.set_mask(mask);
        } else {
            self.reset_mask(mask);
        }
    }
}

/// Location of a logical pin: its port and the bit mask within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId<P> {
    /// Register bank the pin lives in
    pub port: P,
    /// Bit mask selecting the pin within the port
    pub mask: u32,
}

impl<P> PinId<P> {
    /// Create a pin location
    pub const fn new(port: P, mask: u32) -> Self {
        Self { port, mask }
    }
}

/// Board pin table
///
/// Maps the logical pin numbers used by application code onto ports and
/// masks. Read-only board configuration data.
pub trait PinTable {
    /// Port handle type of this board
    type Port: PortBank;

    /// Look up a logical pin
    ///
    /// Returns `None` if the pin number does not exist on this board.
    fn lookup(&self, pin: u8) -> Option<PinId<Self::Port>>;
}

/// Pin direction/function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input
    Input,
    /// Input with pull-up
    InputPullUp,
    /// Input with pull-down
    InputPullDown,
    /// Push-pull output
    Output,
    /// Analog (ADC/DAC)
    Analog,
}

/// Pin mode switching
///
/// Implementations only reconfigure the pin. Software PWM calls this once,
/// with [`PinMode::Output`], when it first claims a pin.
pub trait PinModeControl {
    /// Configure `pin` for the given mode
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode);
}
