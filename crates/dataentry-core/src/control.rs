// Dataentry Controls
// What pressing a control does, by control id

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::CopyMode;
use crate::modifier::{LatchMode, MODIFIER_SLOTS};

/// Operation performed when a control is pressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ControlAction {
    /// Insert text at the cursor; `alternates[n]` replaces it while slot `n` is the lowest active modifier
    Insert {
        text: String,
        #[serde(default)]
        alternates: Vec<String>,
    },
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorStart,
    CursorEnd,
    CursorTo {
        position: usize,
    },
    Clear,
    /// Replace the whole entry
    Set {
        text: String,
    },
    /// Commit now, optionally overriding the configured copy mode
    Enter {
        #[serde(default)]
        copy: Option<CopyMode>,
    },
    Modifier {
        slot: usize,
        #[serde(default)]
        mode: LatchMode,
    },
}

impl ControlAction {
    /// Text an insert produces given the lowest active modifier slot
    pub fn insert_text<'a>(text: &'a str, alternates: &'a [String], modifier: Option<usize>) -> &'a str {
        modifier
            .and_then(|slot| alternates.get(slot))
            .filter(|alt| !alt.is_empty())
            .map_or(text, String::as_str)
    }
}

/// Built-in binding for an unconfigured control id
///
/// Single characters insert themselves; a few key names map to editing
/// operations and F1-F3 toggle the modifier slots.
pub fn builtin_action(control: &str) -> Option<ControlAction> {
    let mut chars = control.chars();
    if let (Some(_), None) = (chars.next(), chars.next()) {
        return Some(ControlAction::Insert {
            text: control.to_string(),
            alternates: Vec::new(),
        });
    }

    let action = match control.to_ascii_lowercase().as_str() {
        "backspace" => ControlAction::Backspace,
        "delete" => ControlAction::Delete,
        "left" => ControlAction::CursorLeft,
        "right" => ControlAction::CursorRight,
        "home" => ControlAction::CursorStart,
        "end" => ControlAction::CursorEnd,
        "enter" => ControlAction::Enter { copy: None },
        "escape" | "clear" => ControlAction::Clear,
        "f1" => toggle(0),
        "f2" => toggle(1),
        "f3" => toggle(2),
        _ => return None,
    };
    Some(action)
}

fn toggle(slot: usize) -> ControlAction {
    ControlAction::Modifier {
        slot,
        mode: LatchMode::Toggle,
    }
}

/// Configured control bindings in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlMap {
    bindings: IndexMap<String, ControlAction>,
}

impl ControlMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, control: &str, action: ControlAction) {
        self.bindings.insert(control.to_string(), action);
    }

    /// Configured binding only
    pub fn get(&self, control: &str) -> Option<&ControlAction> {
        self.bindings.get(control)
    }

    /// Configured binding, falling back to the built-in one
    pub fn resolve(&self, control: &str) -> Option<ControlAction> {
        self.bindings
            .get(control)
            .cloned()
            .or_else(|| builtin_action(control))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControlAction)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// First binding that names a modifier slot that does not exist
    pub fn invalid_modifier_slot(&self) -> Option<(&str, usize)> {
        self.iter().find_map(|(control, action)| match action {
            ControlAction::Modifier { slot, .. } if *slot >= MODIFIER_SLOTS => Some((control, *slot)),
            _ => None,
        })
    }
}
