// Dataentry Modifier Latches
// Three shift-like slots that change what the next keypress does

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of modifier slots
pub const MODIFIER_SLOTS: usize = 3;

/// How a control drives a modifier slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatchMode {
    /// Active while at least one control holds it
    #[default]
    Hold,
    /// Flip between active and released
    Toggle,
    /// Active until consumed by the next insert
    Onetime,
    /// Release the slot
    Release,
}

impl fmt::Display for LatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatchMode::Hold => write!(f, "hold"),
            LatchMode::Toggle => write!(f, "toggle"),
            LatchMode::Onetime => write!(f, "onetime"),
            LatchMode::Release => write!(f, "release"),
        }
    }
}

/// State of one modifier slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierSlot {
    /// Logical active state
    pub effective: bool,
    /// Single-use latch, consumed by the caller
    pub onetime: bool,
    /// Controls currently holding this slot active
    pub controls: IndexSet<String>,
}

impl ModifierSlot {
    fn release(&mut self) {
        self.controls.clear();
        self.effective = false;
        self.onetime = false;
    }
}

/// Errors that can occur when addressing modifier slots
#[derive(Debug, Clone, PartialEq)]
pub enum ModifierError {
    SlotOutOfRange(usize),
}

impl fmt::Display for ModifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierError::SlotOutOfRange(slot) => {
                write!(f, "modifier slot {} out of range (0..{})", slot, MODIFIER_SLOTS)
            }
        }
    }
}

impl std::error::Error for ModifierError {}

/// The three modifier slots
#[derive(Debug, Clone, Default)]
pub struct ModifierLatches {
    slots: [ModifierSlot; MODIFIER_SLOTS],
}

impl ModifierLatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: usize) -> Option<&ModifierSlot> {
        self.slots.get(slot)
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut ModifierSlot, ModifierError> {
        self.slots
            .get_mut(slot)
            .ok_or(ModifierError::SlotOutOfRange(slot))
    }

    /// Check whether a slot is active; out-of-range slots are never active
    pub fn is_active(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|s| s.effective)
    }

    /// Lowest active slot, which selects a control's alternate text
    pub fn active_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.effective)
    }

    /// All active slots in ascending order
    pub fn active_slots(&self) -> SmallVec<[usize; MODIFIER_SLOTS]> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.effective)
            .map(|(i, _)| i)
            .collect()
    }

    /// Mark `control` as holding `slot` active
    pub fn press(&mut self, slot: usize, control: &str) -> Result<(), ModifierError> {
        let s = self.slot_mut(slot)?;
        s.controls.insert(control.to_string());
        s.effective = true;
        Ok(())
    }

    /// Drop every hold `control` has
    ///
    /// A slot whose last holder goes away deactivates unless it is a pending
    /// one-time latch. Returns true if any slot changed.
    pub fn release_control(&mut self, control: &str) -> bool {
        let mut changed = false;
        for s in &mut self.slots {
            if s.controls.shift_remove(control) {
                changed = true;
                if s.controls.is_empty() && !s.onetime {
                    s.effective = false;
                }
            }
        }
        changed
    }

    /// Flip a slot between active and released
    pub fn toggle(&mut self, slot: usize) -> Result<bool, ModifierError> {
        let s = self.slot_mut(slot)?;
        if s.effective {
            s.release();
        } else {
            s.effective = true;
        }
        Ok(s.effective)
    }

    /// Latch a slot until the next consume
    pub fn set_onetime(&mut self, slot: usize) -> Result<(), ModifierError> {
        let s = self.slot_mut(slot)?;
        s.effective = true;
        s.onetime = true;
        Ok(())
    }

    /// Release a slot: clear its holders and reset both flags
    pub fn release(&mut self, slot: usize) -> Result<(), ModifierError> {
        self.slot_mut(slot)?.release();
        Ok(())
    }

    /// Release every slot
    pub fn release_all(&mut self) {
        for s in &mut self.slots {
            s.release();
        }
    }

    /// Apply a latch mode coming from `control`
    pub fn apply(&mut self, slot: usize, mode: LatchMode, control: &str) -> Result<(), ModifierError> {
        match mode {
            LatchMode::Hold => self.press(slot, control),
            LatchMode::Toggle => self.toggle(slot).map(|_| ()),
            LatchMode::Onetime => self.set_onetime(slot),
            LatchMode::Release => self.release(slot),
        }
    }

    /// Release one-time latches that are not also physically held
    ///
    /// Called after a keypress has used the modifiers. Returns true if any
    /// slot was released.
    pub fn consume_onetime(&mut self) -> bool {
        let mut consumed = false;
        for s in &mut self.slots {
            if s.onetime && s.controls.is_empty() {
                s.release();
                consumed = true;
            }
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_released() {
        let latches = ModifierLatches::new();
        for slot in 0..MODIFIER_SLOTS {
            assert!(!latches.is_active(slot));
        }
        assert_eq!(latches.active_slot(), None);
        assert!(!latches.is_active(7));
    }

    #[test]
    fn test_hold_until_last_control_released() {
        let mut latches = ModifierLatches::new();
        latches.press(1, "shift-a").unwrap();
        latches.press(1, "shift-b").unwrap();
        assert!(latches.is_active(1));

        assert!(latches.release_control("shift-a"));
        assert!(latches.is_active(1));
        assert!(latches.release_control("shift-b"));
        assert!(!latches.is_active(1));
        assert!(!latches.release_control("shift-b"));
    }

    #[test]
    fn test_release_is_atomic() {
        let mut latches = ModifierLatches::new();
        latches.press(0, "k1").unwrap();
        latches.set_onetime(0).unwrap();
        latches.release(0).unwrap();

        let slot = latches.slot(0).unwrap();
        assert!(!slot.effective);
        assert!(!slot.onetime);
        assert!(slot.controls.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut latches = ModifierLatches::new();
        assert_eq!(latches.toggle(2), Ok(true));
        assert_eq!(latches.active_slot(), Some(2));
        assert_eq!(latches.toggle(2), Ok(false));
        assert_eq!(latches.active_slot(), None);
    }

    #[test]
    fn test_onetime_consumed_unless_held() {
        let mut latches = ModifierLatches::new();
        latches.set_onetime(0).unwrap();
        latches.set_onetime(1).unwrap();
        latches.press(1, "held").unwrap();

        assert!(latches.consume_onetime());
        assert!(!latches.is_active(0));
        assert!(latches.is_active(1));

        // Releasing the holder keeps a pending one-time latch
        latches.release_control("held");
        assert!(latches.is_active(1));
        assert!(latches.consume_onetime());
        assert!(!latches.is_active(1));
    }

    #[test]
    fn test_active_slots_and_lowest() {
        let mut latches = ModifierLatches::new();
        latches.toggle(2).unwrap();
        latches.toggle(1).unwrap();
        assert_eq!(latches.active_slots().as_slice(), &[1, 2]);
        assert_eq!(latches.active_slot(), Some(1));
    }

    #[test]
    fn test_out_of_range_slot() {
        let mut latches = ModifierLatches::new();
        assert_eq!(
            latches.press(3, "x"),
            Err(ModifierError::SlotOutOfRange(3))
        );
        assert_eq!(
            ModifierError::SlotOutOfRange(3).to_string(),
            "modifier slot 3 out of range (0..3)"
        );
    }

    #[test]
    fn test_apply_modes() {
        let mut latches = ModifierLatches::new();
        latches.apply(0, LatchMode::Hold, "k").unwrap();
        assert!(latches.is_active(0));
        latches.apply(0, LatchMode::Release, "k").unwrap();
        assert!(!latches.is_active(0));
        latches.apply(1, LatchMode::Onetime, "k").unwrap();
        assert!(latches.slot(1).unwrap().onetime);
    }
}
