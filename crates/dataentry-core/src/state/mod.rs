// Dataentry State
// Entry buffer and commit history owned by the context object

pub mod buffer;
pub mod history;

pub use buffer::{CursorMove, EntryBuffer, DEFAULT_MAX_LENGTH};
pub use history::EntryHistory;
