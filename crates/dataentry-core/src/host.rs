// Dataentry Host Interfaces
//
// Collaborators the entry context calls out to: variable interpolation for
// the format spec, and observers that get told about state changes.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

use crate::snapshot::Snapshot;

/// Interpolates host variables into text
///
/// Applied to the format spec before it is parsed.
pub trait VariableResolver {
    fn interpolate(&self, text: &str) -> String;
}

/// Resolver that leaves text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariables;

impl VariableResolver for NoVariables {
    fn interpolate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Resolver backed by a fixed map of `namespace:name` values
///
/// Replaces `$(namespace:name)` tokens. Tokens with no value are kept as
/// written.
#[derive(Debug, Clone, Default)]
pub struct StaticVariables {
    values: IndexMap<String, String>,
}

static TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\$\(([^:()\s]+):([^()\s]+)\)").ok());

impl StaticVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, namespace: &str, name: &str, value: impl Into<String>) {
        self.values.insert(format!("{}:{}", namespace, name), value.into());
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&str> {
        self.values
            .get(&format!("{}:{}", namespace, name))
            .map(String::as_str)
    }

    pub fn remove(&mut self, namespace: &str, name: &str) -> Option<String> {
        self.values.shift_remove(&format!("{}:{}", namespace, name))
    }
}

impl VariableResolver for StaticVariables {
    fn interpolate(&self, text: &str) -> String {
        let Some(token) = TOKEN.as_ref().filter(|_| text.contains("$(")) else {
            return text.to_string();
        };
        token
            .replace_all(text, |caps: &Captures| match self.get(&caps[1], &caps[2]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Kind of state change reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryEvent {
    /// The buffer or cursor changed
    Changed,
    /// A commit happened
    Entered,
    /// A modifier slot changed
    ModifierChanged,
}

impl fmt::Display for EntryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryEvent::Changed => write!(f, "changed"),
            EntryEvent::Entered => write!(f, "entered"),
            EntryEvent::ModifierChanged => write!(f, "modifier_changed"),
        }
    }
}

/// Receives state changes from the entry context
///
/// Presentation layers implement this to refresh their variables and
/// feedbacks.
pub trait EntryObserver {
    fn notify(&mut self, event: EntryEvent, snapshot: &Snapshot);
}
