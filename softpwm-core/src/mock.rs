//! Host-side stand-ins for ports, timer registers and the board

use core::cell::{Cell, RefCell};

use softpwm_hal::{auto_reload, CountMode, PinId, PinMode, PinModeControl, PinTable, PortBank, UpdateTimer};

/// Port backed by a shared output register
#[derive(Debug, Clone, Copy)]
pub struct MockPort<'a> {
    odr: &'a Cell<u32>,
}

impl<'a> MockPort<'a> {
    pub fn new(odr: &'a Cell<u32>) -> Self {
        Self { odr }
    }

    pub fn is_high(&self, mask: u32) -> bool {
        self.odr.get() & mask == mask
    }
}

impl PartialEq for MockPort<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.odr, other.odr)
    }
}

impl PortBank for MockPort<'_> {
    fn set_mask(&self, mask: u32) {
        self.odr.set(self.odr.get() | mask);
    }

    fn reset_mask(&self, mask: u32) {
        self.odr.set(self.odr.get() & !mask);
    }
}

/// Timer register file shared between a test and its [`MockTimer`]
#[derive(Debug, Default)]
pub struct TimerRegs {
    pub prescaler: Cell<u16>,
    pub mode: Cell<Option<CountMode>>,
    pub reload: Cell<u32>,
    pub update_flag: Cell<bool>,
    pub update_irq: Cell<bool>,
    pub running: Cell<bool>,
    pub init_calls: Cell<u32>,
    pub reload_log: RefCell<Vec<u32>>,
}

impl TimerRegs {
    /// Raise an update event as the counter would on overflow
    pub fn fire(&self) {
        self.update_flag.set(true);
    }

    /// Ticks until the next overflow of a counter running `0..=ARR`, with
    /// ARR programmed the way a register-level driver programs it
    pub fn overflow_ticks(&self) -> u32 {
        u32::from(auto_reload(self.reload.get())) + 1
    }
}

pub struct MockTimer<'a> {
    regs: &'a TimerRegs,
}

impl<'a> MockTimer<'a> {
    pub fn new(regs: &'a TimerRegs) -> Self {
        Self { regs }
    }
}

impl UpdateTimer for MockTimer<'_> {
    fn init(&mut self, prescaler: u16, mode: CountMode, reload: u32) {
        self.regs.prescaler.set(prescaler);
        self.regs.mode.set(Some(mode));
        self.regs.reload.set(reload);
        self.regs.init_calls.set(self.regs.init_calls.get() + 1);
    }

    fn start_interrupt_mode(&mut self) {
        self.regs.update_irq.set(true);
        self.regs.running.set(true);
    }

    fn set_reload(&mut self, value: u32) {
        self.regs.reload.set(value);
        self.regs.reload_log.borrow_mut().push(value);
    }

    fn clear_update_flag(&mut self) {
        self.regs.update_flag.set(false);
    }

    fn is_update_flag_set(&self) -> bool {
        self.regs.update_flag.get()
    }

    fn is_update_interrupt_enabled(&self) -> bool {
        self.regs.update_irq.get()
    }
}

/// Two 16-pin ports: pins 0..16 on port A, 16..32 on port B
pub struct MockBoard<'a> {
    port_a: MockPort<'a>,
    port_b: MockPort<'a>,
    pub mode_calls: Vec<(u8, PinMode)>,
}

impl<'a> MockBoard<'a> {
    pub fn new(port_a: &'a Cell<u32>, port_b: &'a Cell<u32>) -> Self {
        Self {
            port_a: MockPort::new(port_a),
            port_b: MockPort::new(port_b),
            mode_calls: Vec::new(),
        }
    }

    pub fn pin(&self, pin: u8) -> PinId<MockPort<'a>> {
        self.lookup(pin).expect("pin on board")
    }
}

impl<'a> PinTable for MockBoard<'a> {
    type Port = MockPort<'a>;

    fn lookup(&self, pin: u8) -> Option<PinId<MockPort<'a>>> {
        match pin {
            0..=15 => Some(PinId::new(self.port_a, 1 << pin)),
            16..=31 => Some(PinId::new(self.port_b, 1 << (pin - 16))),
            _ => None,
        }
    }
}

impl PinModeControl for MockBoard<'_> {
    fn set_pin_mode(&mut self, pin: u8, mode: PinMode) {
        self.mode_calls.push((pin, mode));
    }
}
