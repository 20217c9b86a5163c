//! Software PWM driver object
//!
//! [`SoftPwm`] owns the slot table, the phase scheduler and the hardware
//! timer. Caller context registers pins through `analog_write`/`set` and
//! removes them through `disable`; interrupt context calls `on_interrupt`.
//! Both sides take the same critical-section mutex, so the interrupt never
//! sees a half-written slot.
//!
//! # Usage
//!
//! ```ignore
//! static HOOKS: Hooks<Port> = Hooks::new();
//! static PWM: SoftPwm<'static, Timer, Port, 32> = SoftPwm::new(
//!     PwmConfig::DEFAULT,
//!     Timer::tim2(),
//!     &HOOKS,
//!     Bindings { isr: pwm_isr, release: pwm_release },
//! );
//!
//! fn pwm_isr() {
//!     PWM.on_interrupt();
//! }
//!
//! fn pwm_release(port: Port, mask: u32) {
//!     PWM.disable(port, mask);
//! }
//!
//! PWM.analog_write(&mut board, 5, 128)?;
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use softpwm_hal::{CountMode, PinMode, PinModeControl, PinTable, PortBank, UpdateTimer};

use crate::config::PwmConfig;
use crate::dispatch::{Bindings, Hooks};
use crate::error::PwmError;
use crate::scheduler::PhaseScheduler;
use crate::slots::SlotTable;

/// Hardware timer ownership state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Timer not claimed yet
    Uninitialized,
    /// Timer claimed and raising update interrupts
    Running,
}

/// State shared between caller and interrupt context
struct Shared<T, P, const N: usize> {
    timer: T,
    state: TimerState,
    slots: SlotTable<P, N>,
    scheduler: PhaseScheduler,
}

/// Software PWM over one hardware timer and up to `N` pins
pub struct SoftPwm<'a, T, P, const N: usize> {
    config: PwmConfig,
    hooks: &'a Hooks<P>,
    bindings: Bindings<P>,
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared<T, P, N>>>,
}

impl<'a, T, P, const N: usize> SoftPwm<'a, T, P, N> {
    /// Create a driver that will claim `timer` on first use
    ///
    /// `N` should be the board's pin count so that every pin can be driven.
    pub const fn new(
        config: PwmConfig,
        timer: T,
        hooks: &'a Hooks<P>,
        bindings: Bindings<P>,
    ) -> Self {
        Self {
            config,
            hooks,
            bindings,
            shared: Mutex::new(RefCell::new(Shared {
                timer,
                state: TimerState::Uninitialized,
                slots: SlotTable::new(),
                scheduler: PhaseScheduler::new(config.max_period),
            })),
        }
    }

    /// Configuration this driver was built with
    pub fn config(&self) -> &PwmConfig {
        &self.config
    }

    /// Timer ownership state
    pub fn state(&self) -> TimerState {
        self.shared.lock(|shared| shared.borrow().state)
    }

    /// Number of pins currently driven
    pub fn active_count(&self) -> usize {
        self.shared.lock(|shared| shared.borrow().slots.len())
    }

    /// Current phase counter
    pub fn phase_counter(&self) -> u32 {
        self.shared.lock(|shared| shared.borrow().scheduler.counter())
    }

    /// Reload value the timer is currently programmed with
    pub fn period(&self) -> u32 {
        self.shared.lock(|shared| shared.borrow().scheduler.period())
    }
}

impl<'a, T, P, const N: usize> SoftPwm<'a, T, P, N>
where
    T: UpdateTimer,
    P: PortBank,
{
    /// Drive `pin` with an 8-bit duty value
    ///
    /// `0` is always low and `255` always high. The pin is switched to
    /// output mode the first time it is driven.
    pub fn analog_write<B>(&self, board: &mut B, pin: u8, value: u8) -> Result<(), PwmError>
    where
        B: PinTable<Port = P> + PinModeControl,
    {
        self.set(board, pin, u16::from(value), self.config.resolution)
    }

    /// Drive `pin` with `duty` ticks high out of every `resolution` ticks
    ///
    /// Fails with `TableFull` if the pin is new and every slot is taken; the
    /// table is then left unchanged.
    pub fn set<B>(&self, board: &mut B, pin: u8, duty: u16, resolution: u16) -> Result<(), PwmError>
    where
        B: PinTable<Port = P> + PinModeControl,
    {
        self.config.check_resolution(resolution)?;
        let id = board.lookup(pin).ok_or(PwmError::UnknownPin)?;

        let updated = self.shared.lock(|shared| -> Result<bool, PwmError> {
            let mut shared = shared.borrow_mut();
            if shared.slots.position(&id.port, id.mask).is_some() {
                shared.slots.set(id.port, id.mask, duty, resolution)?;
                self.start_timer(&mut shared);
                Ok(true)
            } else if shared.slots.is_full() {
                Err(PwmError::TableFull)
            } else {
                Ok(false)
            }
        })?;
        if updated {
            return Ok(());
        }

        // New pin: configure it before the interrupt can start toggling it.
        // Only caller context inserts, so the slot checked above is still free.
        board.set_pin_mode(pin, PinMode::Output);

        self.shared.lock(|shared| -> Result<(), PwmError> {
            let mut shared = shared.borrow_mut();
            shared.slots.set(id.port, id.mask, duty, resolution)?;
            self.start_timer(&mut shared);
            Ok(())
        })
    }

    /// Stop driving `(port, mask)`
    ///
    /// The pin keeps whatever level it was last driven to. Returns `false`
    /// if the pin was not being driven.
    pub fn disable(&self, port: P, mask: u32) -> bool {
        self.shared
            .lock(|shared| shared.borrow_mut().slots.remove(&port, mask))
    }

    /// Duty value of a driven pin
    pub fn duty_of(&self, port: P, mask: u32) -> Option<u16> {
        self.shared
            .lock(|shared| shared.borrow().slots.find(&port, mask).map(|s| s.duty))
    }

    /// Timer interrupt handler
    ///
    /// Returns `true` if an update event was handled. Bounded by the table
    /// capacity; never allocates or logs.
    pub fn on_interrupt(&self) -> bool {
        self.shared.lock(|shared| {
            let mut shared = shared.borrow_mut();
            if shared.state != TimerState::Running {
                return false;
            }
            let Shared {
                timer,
                slots,
                scheduler,
                ..
            } = &mut *shared;
            scheduler.on_update(timer, slots.as_slice())
        })
    }

    /// Claim the timer on the first successful registration
    fn start_timer(&self, shared: &mut Shared<T, P, N>) {
        if shared.state == TimerState::Running {
            return;
        }
        self.hooks.install(self.bindings);
        shared
            .timer
            .init(self.config.prescaler, CountMode::Up, self.config.max_period);
        shared.timer.start_interrupt_mode();
        shared.state = TimerState::Running;
    }
}
