//! Software PWM configuration
//!
//! Timer prescaler and the counter modulus shared by all pins. Defaults
//! give an 8-bit `analog_write` on a timer clocked at 1/1000 of the bus.

use crate::error::PwmError;

/// Default timer prescaler (divide by 1000)
pub const DEFAULT_PRESCALER: u16 = 999;

/// Default counter modulus: the longest period the timer is ever programmed with
pub const DEFAULT_MAX_PERIOD: u32 = 256;

/// Resolution used by `analog_write` (8-bit duty values)
pub const ANALOG_RESOLUTION: u16 = 255;

/// Software PWM configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Timer prescaler written at initialization
    pub prescaler: u16,
    /// Maximum reload value; also the fallback period when nothing is due
    pub max_period: u32,
    /// Resolution applied by `analog_write`
    pub resolution: u16,
}

impl PwmConfig {
    /// Default configuration, usable in `const` contexts
    pub const DEFAULT: Self = Self {
        prescaler: DEFAULT_PRESCALER,
        max_period: DEFAULT_MAX_PERIOD,
        resolution: ANALOG_RESOLUTION,
    };

    /// Check that a per-pin resolution fits this configuration
    ///
    /// A resolution must be non-zero and no longer than the counter modulus.
    pub fn check_resolution(&self, resolution: u16) -> Result<(), PwmError> {
        if resolution == 0 || u32::from(resolution) > self.max_period {
            return Err(PwmError::InvalidResolution);
        }
        Ok(())
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
