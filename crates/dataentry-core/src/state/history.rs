// Dataentry Entry History
// Last two committed values and the commit counter

/// Committed entries
///
/// The counter is only ever incremented; nothing in this crate resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryHistory {
    last: String,
    second_last: String,
    counter: u64,
}

impl EntryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift `value` in as the newest entry
    pub fn push(&mut self, value: String) {
        self.second_last = std::mem::replace(&mut self.last, value);
    }

    /// Count one commit, returning the new counter value
    pub fn count(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn second_last(&self) -> &str {
        &self.second_last
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }
}
