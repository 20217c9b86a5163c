//! Duty/period evaluator
//!
//! Given the phase counter, decides each pin's level and how many ticks
//! remain until that pin next changes.

use softpwm_hal::PortBank;

use crate::slots::PinSlot;

/// Level of one slot at a given counter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotLevel {
    /// Pin should be driven high
    pub high: bool,
    /// Ticks until the pin must change (turn off, or restart its period)
    pub ticks_to_next: u32,
}

/// Evaluate one slot at `counter`
///
/// `duty == 0` is never high and `duty == resolution` is always high,
/// since the phase is always below the resolution.
pub fn evaluate_slot<P>(slot: &PinSlot<P>, counter: u32) -> SlotLevel {
    let resolution = u32::from(slot.resolution);
    let duty = u32::from(slot.duty);
    let phase = counter % resolution;

    if duty > phase {
        SlotLevel {
            high: true,
            ticks_to_next: duty - phase,
        }
    } else {
        SlotLevel {
            high: false,
            ticks_to_next: resolution - phase,
        }
    }
}

/// Drive every slot to its level at `counter`
///
/// Returns the tightest deadline across all slots, capped at `ceiling`.
pub fn drive_slots<P: PortBank>(slots: &[PinSlot<P>], counter: u32, ceiling: u32) -> u32 {
    slots.iter().fold(ceiling, |next, slot| {
        let level = evaluate_slot(slot, counter);
        slot.port.write_mask(slot.pin_mask, level.high);
        next.min(level.ticks_to_next)
    })
}
