// Dataentry Snapshot
// Read-only view of every derived value, for presentation layers

use serde::Serialize;
use smallvec::SmallVec;

use crate::modifier::MODIFIER_SLOTS;

/// Derived entry state at one point in time
///
/// Lengths and the cursor position count characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub raw: String,
    pub formatted: String,
    /// Raw entry with the cursor glyph inserted
    pub cursor: String,
    pub raw_length: usize,
    pub cursor_position: usize,
    pub last: String,
    pub second_last: String,
    pub last_length: usize,
    pub counter: u64,
    pub modifiers: [bool; MODIFIER_SLOTS],
}

impl Snapshot {
    /// Host variable name/value pairs
    pub fn variables(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = vec![
            ("entry_raw".into(), self.raw.clone()),
            ("entry_last".into(), self.last.clone()),
            ("entry_second_last".into(), self.second_last.clone()),
            ("entry_raw_length".into(), self.raw_length.to_string()),
            ("entry_last_length".into(), self.last_length.to_string()),
            ("entry_formatted".into(), self.formatted.clone()),
            ("entry_cursor".into(), self.cursor.clone()),
            ("entry_cursor_position".into(), self.cursor_position.to_string()),
            ("entrycounter".into(), self.counter.to_string()),
        ];
        vars.extend(
            self.modifiers
                .iter()
                .enumerate()
                .map(|(i, on)| (format!("modifier_{}", i), on.to_string())),
        );
        vars
    }

    /// Look up one variable by name
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn active_modifiers(&self) -> SmallVec<[usize; MODIFIER_SLOTS]> {
        self.modifiers
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
            .collect()
    }

    /// Variables rendered as one `name=value` line
    pub fn variable_line(&self) -> String {
        self.variables()
            .iter()
            .map(|(name, value)| format!("{}={:?}", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
