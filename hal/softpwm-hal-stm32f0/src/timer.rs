//! PWM time base for STM32F0
//!
//! TIM2 is used by default; the `tim3` feature selects TIM3 for parts or
//! boards where TIM2 is taken. Both are driven through the 16-bit
//! general-purpose register layout.

use embassy_stm32::interrupt::{self, InterruptExt, Priority};
use embassy_stm32::pac;
use embassy_stm32::pac::timer::{vals, TimGp16};
use softpwm_hal::{auto_reload, CountMode, UpdateTimer};

#[cfg(not(feature = "tim3"))]
const PWM_TIMER: *mut () = pac::TIM2.as_ptr();
#[cfg(feature = "tim3")]
const PWM_TIMER: *mut () = pac::TIM3.as_ptr();

#[cfg(not(feature = "tim3"))]
const PWM_IRQ: interrupt::Interrupt = interrupt::TIM2;
#[cfg(feature = "tim3")]
const PWM_IRQ: interrupt::Interrupt = interrupt::TIM3;

/// Timer driven by the software PWM scheduler
pub struct Stm32Timer {
    regs: TimGp16,
}

// SAFETY: the handle is only an address; the scheduler serialises access
unsafe impl Send for Stm32Timer {}

impl Stm32Timer {
    /// Handle to the selected PWM timer
    ///
    /// Nothing is touched until [`UpdateTimer::init`].
    pub const fn new() -> Self {
        Self {
            // SAFETY: PWM_TIMER is a general-purpose timer register block
            regs: unsafe { TimGp16::from_ptr(PWM_TIMER) },
        }
    }

    fn enable_clock(&self) {
        #[cfg(not(feature = "tim3"))]
        pac::RCC.apb1enr().modify(|w| w.set_tim2en(true));
        #[cfg(feature = "tim3")]
        pac::RCC.apb1enr().modify(|w| w.set_tim3en(true));
    }
}

impl Default for Stm32Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateTimer for Stm32Timer {
    fn init(&mut self, prescaler: u16, mode: CountMode, reload: u32) {
        self.enable_clock();

        self.regs.cr1().modify(|w| {
            w.set_cen(false);
            w.set_dir(match mode {
                CountMode::Up => vals::Dir::UP,
                CountMode::Down => vals::Dir::DOWN,
            });
        });
        self.regs.psc().write_value(prescaler);
        self.set_reload(reload);

        // Latch the prescaler now rather than at the first overflow
        self.regs.egr().write(|w| w.set_ug(true));
        self.clear_update_flag();
    }

    fn start_interrupt_mode(&mut self) {
        self.clear_update_flag();
        self.regs.dier().modify(|w| w.set_uie(true));

        PWM_IRQ.set_priority(Priority::P0);
        // SAFETY: the vector only forwards to the PWM hooks
        unsafe { PWM_IRQ.enable() };

        self.regs.cr1().modify(|w| w.set_cen(true));
    }

    fn set_reload(&mut self, value: u32) {
        // Update fires on the overflow after ARR, one tick past it
        self.regs.arr().write(|w| w.set_arr(auto_reload(value)));
    }

    fn clear_update_flag(&mut self) {
        self.regs.sr().modify(|w| w.set_uif(false));
    }

    fn is_update_flag_set(&self) -> bool {
        self.regs.sr().read().uif()
    }

    fn is_update_interrupt_enabled(&self) -> bool {
        self.regs.dier().read().uie()
    }
}
