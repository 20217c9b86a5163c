//! GPIO support for STM32F0
//!
//! Port handles, the board pin table and pin-mode switching.

use embassy_stm32::pac;
use embassy_stm32::pac::gpio::{regs, vals, Gpio};
use softpwm_hal::{PinId, PinMode, PinModeControl, PinTable, PortBank};

/// GPIO register bank, compared by address
#[derive(Clone, Copy)]
pub struct Stm32Port(Gpio);

// SAFETY: the handle is only an address; BSRR writes are single atomic stores
unsafe impl Send for Stm32Port {}

impl Stm32Port {
    /// Port A
    pub const A: Self = Self(pac::GPIOA);
    /// Port B
    pub const B: Self = Self(pac::GPIOB);
    /// Port F
    pub const F: Self = Self(pac::GPIOF);

    fn regs(&self) -> Gpio {
        self.0
    }
}

impl PartialEq for Stm32Port {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ptr() == other.0.as_ptr()
    }
}

impl PortBank for Stm32Port {
    fn set_mask(&self, mask: u32) {
        self.0.bsrr().write_value(regs::Bsrr(mask & 0xFFFF));
    }

    fn reset_mask(&self, mask: u32) {
        self.0.bsrr().write_value(regs::Bsrr((mask & 0xFFFF) << 16));
    }
}

/// Logical pin numbers, in order: PA0-PA15, PB0-PB7, PF0-PF1
const PIN_LIST: [(Stm32Port, u8); 26] = [
    (Stm32Port::A, 0),
    (Stm32Port::A, 1),
    (Stm32Port::A, 2),
    (Stm32Port::A, 3),
    (Stm32Port::A, 4),
    (Stm32Port::A, 5),
    (Stm32Port::A, 6),
    (Stm32Port::A, 7),
    (Stm32Port::A, 8),
    (Stm32Port::A, 9),
    (Stm32Port::A, 10),
    (Stm32Port::A, 11),
    (Stm32Port::A, 12),
    (Stm32Port::A, 13),
    (Stm32Port::A, 14),
    (Stm32Port::A, 15),
    (Stm32Port::B, 0),
    (Stm32Port::B, 1),
    (Stm32Port::B, 2),
    (Stm32Port::B, 3),
    (Stm32Port::B, 4),
    (Stm32Port::B, 5),
    (Stm32Port::B, 6),
    (Stm32Port::B, 7),
    (Stm32Port::F, 0),
    (Stm32Port::F, 1),
];

/// Number of logical pins on the board
pub const PIN_COUNT: usize = PIN_LIST.len();

/// Board pin table and mode control
#[derive(Debug, Default, Clone, Copy)]
pub struct Stm32Board;

impl PinTable for Stm32Board {
    type Port = Stm32Port;

    fn lookup(&self, pin: u8) -> Option<PinId<Stm32Port>> {
        PIN_LIST
            .get(usize::from(pin))
            .map(|&(port, n)| PinId::new(port, 1 << n))
    }
}

impl PinModeControl for Stm32Board {
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) {
        let Some(&(port, n)) = PIN_LIST.get(usize::from(pin)) else {
            return;
        };
        let n = usize::from(n);
        let regs = port.regs();

        let (moder, pupdr) = match mode {
            PinMode::Input => (vals::Moder::INPUT, vals::Pupdr::FLOATING),
            PinMode::InputPullUp => (vals::Moder::INPUT, vals::Pupdr::PULL_UP),
            PinMode::InputPullDown => (vals::Moder::INPUT, vals::Pupdr::PULL_DOWN),
            PinMode::Output => (vals::Moder::OUTPUT, vals::Pupdr::FLOATING),
            PinMode::Analog => (vals::Moder::ANALOG, vals::Pupdr::FLOATING),
        };

        if mode == PinMode::Output {
            regs.otyper().modify(|w| w.set_ot(n, vals::Ot::PUSH_PULL));
        }
        regs.pupdr().modify(|w| w.set_pupdr(n, pupdr));
        regs.moder().modify(|w| w.set_moder(n, moder));
    }
}

/// Look up a logical pin number by name
///
/// Supports formats:
/// - "PA0" -> 0
/// - "PB3" -> 19
/// - "pf1" -> 25
pub fn pin_by_name(s: &str) -> Option<u8> {
    let s = s.trim().as_bytes();
    if s.len() < 3 || !s[0].eq_ignore_ascii_case(&b'P') {
        return None;
    }

    let port = match s[1].to_ascii_uppercase() {
        b'A' => Stm32Port::A,
        b'B' => Stm32Port::B,
        b'F' => Stm32Port::F,
        _ => return None,
    };

    let pin: u8 = core::str::from_utf8(&s[2..]).ok()?.parse().ok()?;
    if pin > 15 {
        return None;
    }

    PIN_LIST
        .iter()
        .position(|&(p, n)| p == port && n == pin)
        .map(|i| i as u8)
}
