//! Interrupt and pin-release dispatch
//!
//! The physical timer vector and the board's pin-mode code do not know
//! which `SoftPwm` instance (or which timer) is in use. They go through a
//! [`Hooks`] table instead, which the PWM object fills in once when it
//! claims its timer.
//!
//! ```ignore
//! static HOOKS: Hooks<Port> = Hooks::new();
//!
//! #[interrupt]
//! fn TIM2() {
//!     HOOKS.on_timer_irq();
//! }
//!
//! fn pin_mode(pin: u8, mode: PinMode) {
//!     let id = PINS.lookup(pin).unwrap();
//!     HOOKS.release(id.port, id.mask);
//!     // ... reconfigure the pin
//! }
//! ```

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Timer interrupt entry point
pub type IsrFn = fn();

/// Stop driving `(port, mask)`
pub type ReleaseFn<P> = fn(P, u32);

/// Handlers a `SoftPwm` installs when it starts its timer
pub struct Bindings<P> {
    /// Called from the timer interrupt vector
    pub isr: IsrFn,
    /// Called when a pin leaves PWM output mode
    pub release: ReleaseFn<P>,
}

// Manual impls: derive would require `P: Clone`
impl<P> Clone for Bindings<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Bindings<P> {}

/// Once-installed dispatch table
pub struct Hooks<P> {
    isr: Mutex<CriticalSectionRawMutex, Cell<Option<IsrFn>>>,
    release: Mutex<CriticalSectionRawMutex, Cell<Option<ReleaseFn<P>>>>,
}

impl<P> Hooks<P> {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            isr: Mutex::new(Cell::new(None)),
            release: Mutex::new(Cell::new(None)),
        }
    }

    /// Install handlers
    ///
    /// Only the first call has an effect. Returns `true` if the handlers were
    /// installed by this call.
    pub fn install(&self, bindings: Bindings<P>) -> bool {
        self.isr.lock(|isr| {
            if isr.get().is_some() {
                return false;
            }
            isr.set(Some(bindings.isr));
            self.release.lock(|release| release.set(Some(bindings.release)));
            true
        })
    }

    /// Check if handlers have been installed
    pub fn is_installed(&self) -> bool {
        self.isr.lock(|isr| isr.get().is_some())
    }

    /// Forward a timer interrupt
    ///
    /// Returns `false` if nothing is installed yet.
    pub fn on_timer_irq(&self) -> bool {
        match self.isr.lock(Cell::get) {
            Some(isr) => {
                isr();
                true
            }
            None => false,
        }
    }

    /// Tell the PWM owner to stop driving a pin
    ///
    /// Must be called by anything that takes a pin away from PWM output.
    /// Safe on pins that were never driven. Returns `false` if nothing is
    /// installed yet.
    pub fn release(&self, port: P, mask: u32) -> bool {
        match self.release.lock(Cell::get) {
            Some(release) => {
                release(port, mask);
                true
            }
            None => false,
        }
    }
}

impl<P> Default for Hooks<P> {
    fn default() -> Self {
        Self::new()
    }
}
