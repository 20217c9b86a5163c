//! Pin slot table
//!
//! Fixed-capacity table of the pins currently driven by software PWM.
//! Active slots are always packed at the front: the table length marks the
//! end of the active region, so the interrupt handler walks a plain slice.

use heapless::Vec;
use softpwm_hal::PortBank;

use crate::error::PwmError;

/// One actively driven pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSlot<P> {
    /// Register bank of the pin (compared by identity)
    pub port: P,
    /// Bit mask of the pin within the port
    pub pin_mask: u32,
    /// Period length in ticks
    pub resolution: u16,
    /// On-time in ticks, `0..=resolution`
    pub duty: u16,
}

impl<P: PortBank> PinSlot<P> {
    /// Check if this slot drives `pin_mask` on `port`
    pub fn matches(&self, port: &P, pin_mask: u32) -> bool {
        self.port == *port && self.pin_mask == pin_mask
    }
}

/// Result of a successful [`SlotTable::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetOutcome {
    /// An existing slot was updated in place
    Updated,
    /// A free slot was claimed for a new pin
    Inserted,
}

/// Dense table of at most `N` pin slots
#[derive(Debug)]
pub struct SlotTable<P, const N: usize> {
    slots: Vec<PinSlot<P>, N>,
}

impl<P, const N: usize> SlotTable<P, N> {
    /// Create an empty table
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of active slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no pin is active
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if every slot is taken
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Active slots, in table order
    pub fn as_slice(&self) -> &[PinSlot<P>] {
        &self.slots
    }

    /// Iterate over active slots
    pub fn iter(&self) -> impl Iterator<Item = &PinSlot<P>> {
        self.slots.iter()
    }
}

impl<P, const N: usize> Default for SlotTable<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PortBank, const N: usize> SlotTable<P, N> {
    /// Index of the slot driving `pin_mask` on `port`
    pub fn position(&self, port: &P, pin_mask: u32) -> Option<usize> {
        self.slots.iter().position(|s| s.matches(port, pin_mask))
    }

    /// Slot driving `pin_mask` on `port`
    pub fn find(&self, port: &P, pin_mask: u32) -> Option<&PinSlot<P>> {
        self.slots.iter().find(|s| s.matches(port, pin_mask))
    }

    /// Register or update a pin
    ///
    /// Updates the matching slot in place, or claims the next free slot.
    /// `duty` is clamped to `resolution`. When the table is full and the pin
    /// is not already present, nothing changes and `TableFull` is returned.
    pub fn set(
        &mut self,
        port: P,
        pin_mask: u32,
        duty: u16,
        resolution: u16,
    ) -> Result<SetOutcome, PwmError> {
        if resolution == 0 {
            return Err(PwmError::InvalidResolution);
        }
        let duty = duty.min(resolution);

        if let Some(slot) = self.slots.iter_mut().find(|s| s.matches(&port, pin_mask)) {
            slot.duty = duty;
            slot.resolution = resolution;
            return Ok(SetOutcome::Updated);
        }

        self.slots
            .push(PinSlot {
                port,
                pin_mask,
                resolution,
                duty,
            })
            .map_err(|_| PwmError::TableFull)?;
        Ok(SetOutcome::Inserted)
    }

    /// Stop tracking a pin
    ///
    /// The last active slot moves into the freed position, so survivors are
    /// not kept in registration order. Returns `false` if the pin was not
    /// registered.
    pub fn remove(&mut self, port: &P, pin_mask: u32) -> bool {
        match self.position(port, pin_mask) {
            Some(index) => {
                self.slots.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPort;
    use core::cell::Cell;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[test]
    fn test_set_inserts_then_updates() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 4> = SlotTable::new();

        assert_eq!(table.set(port, 1 << 3, 10, 255), Ok(SetOutcome::Inserted));
        assert_eq!(table.set(port, 1 << 3, 200, 255), Ok(SetOutcome::Updated));

        assert_eq!(table.len(), 1);
        let slot = table.find(&port, 1 << 3).unwrap();
        assert_eq!(slot.duty, 200);
        assert_eq!(slot.resolution, 255);
    }

    #[test]
    fn test_same_mask_on_different_ports() {
        let odr_a = Cell::new(0);
        let odr_b = Cell::new(0);
        let port_a = MockPort::new(&odr_a);
        let port_b = MockPort::new(&odr_b);
        let mut table: SlotTable<_, 4> = SlotTable::new();

        table.set(port_a, 1, 10, 255).unwrap();
        table.set(port_b, 1, 20, 255).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.find(&port_a, 1).unwrap().duty, 10);
        assert_eq!(table.find(&port_b, 1).unwrap().duty, 20);
    }

    #[test]
    fn test_duty_clamped_to_resolution() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 2> = SlotTable::new();

        table.set(port, 1, 300, 100).unwrap();
        assert_eq!(table.find(&port, 1).unwrap().duty, 100);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 2> = SlotTable::new();

        assert_eq!(table.set(port, 1, 0, 0), Err(PwmError::InvalidResolution));
        assert!(table.is_empty());
    }

    #[test]
    fn test_full_table_rejects_new_pin() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 2> = SlotTable::new();

        table.set(port, 1 << 0, 10, 255).unwrap();
        table.set(port, 1 << 1, 20, 255).unwrap();
        assert!(table.is_full());

        let before: Vec<_> = table.iter().copied().collect();
        assert_eq!(table.set(port, 1 << 2, 30, 255), Err(PwmError::TableFull));
        let after: Vec<_> = table.iter().copied().collect();
        assert_eq!(before, after);
        assert!(table.find(&port, 1 << 2).is_none());

        // Pins already present can still be updated
        assert_eq!(table.set(port, 1 << 1, 99, 255), Ok(SetOutcome::Updated));
    }

    #[test]
    fn test_remove_moves_last_slot_into_gap() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 4> = SlotTable::new();

        table.set(port, 1 << 0, 10, 255).unwrap();
        table.set(port, 1 << 1, 20, 100).unwrap();
        table.set(port, 1 << 2, 30, 200).unwrap();

        assert!(table.remove(&port, 1 << 0));

        // The whole last slot moved, not just its port and mask
        let moved = table.as_slice()[0];
        assert_eq!(moved.pin_mask, 1 << 2);
        assert_eq!(moved.duty, 30);
        assert_eq!(moved.resolution, 200);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_remove_unknown_pin_is_noop() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 4> = SlotTable::new();

        assert!(!table.remove(&port, 1));
        table.set(port, 1, 10, 255).unwrap();
        assert!(!table.remove(&port, 2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_set_then_remove_restores_occupancy() {
        let odr = Cell::new(0);
        let port = MockPort::new(&odr);
        let mut table: SlotTable<_, 4> = SlotTable::new();
        table.set(port, 1 << 0, 10, 255).unwrap();

        let before = table.len();
        table.set(port, 1 << 5, 42, 255).unwrap();
        table.remove(&port, 1 << 5);
        assert_eq!(table.len(), before);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Set(u8, u16),
        Remove(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8, 0u16..=255).prop_map(|(pin, duty)| Op::Set(pin, duty)),
            (0u8..8).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_table_matches_model(ops in prop::collection::vec(op(), 0..64)) {
            let odr = Cell::new(0);
            let port = MockPort::new(&odr);
            let mut table: SlotTable<_, 5> = SlotTable::new();
            let mut model: Vec<(u8, u16)> = Vec::new();

            for op in ops {
                match op {
                    Op::Set(pin, duty) => {
                        let result = table.set(port, 1 << pin, duty, 255);
                        if let Some(entry) = model.iter_mut().find(|(p, _)| *p == pin) {
                            entry.1 = duty;
                            prop_assert_eq!(result, Ok(SetOutcome::Updated));
                        } else if model.len() < 5 {
                            model.push((pin, duty));
                            prop_assert_eq!(result, Ok(SetOutcome::Inserted));
                        } else {
                            prop_assert_eq!(result, Err(PwmError::TableFull));
                        }
                    }
                    Op::Remove(pin) => {
                        let was_present = model.iter().any(|(p, _)| *p == pin);
                        model.retain(|(p, _)| *p != pin);
                        prop_assert_eq!(table.remove(&port, 1 << pin), was_present);
                    }
                }

                // Active region is exactly the model, with no duplicates
                prop_assert_eq!(table.len(), model.len());
                for (pin, duty) in &model {
                    prop_assert_eq!(table.find(&port, 1 << pin).map(|s| s.duty), Some(*duty));
                }
                for (i, slot) in table.iter().enumerate() {
                    prop_assert_eq!(table.position(&port, slot.pin_mask), Some(i));
                }
            }
        }
    }
}
