// Dataentry Core Library
// Text-entry accumulator with auto-enter rules

pub mod config;
pub mod control;
pub mod criteria;
pub mod entry;
pub mod format;
pub mod host;
pub mod modifier;
pub mod pattern;
pub mod snapshot;
pub mod state;
pub mod timeout;
pub mod trigger;

pub use config::{default_config_content, AfterEntry, Config, ConfigError, CopyMode};
pub use control::{builtin_action, ControlAction, ControlMap};
pub use criteria::{should_enter, AutoEnter, AutoEnterConfig, CriteriaLogic};
pub use entry::{DataEntry, MatchSource, Outcome};
pub use format::{format, FormatSpec, NamedTransform};
pub use host::{EntryEvent, EntryObserver, NoVariables, StaticVariables, VariableResolver};
pub use modifier::{LatchMode, ModifierError, ModifierLatches, MODIFIER_SLOTS};
pub use pattern::{EntryPattern, PatternError, PatternFlags};
pub use snapshot::Snapshot;
pub use state::{CursorMove, EntryBuffer, EntryHistory};
pub use timeout::InactivityTimer;
pub use trigger::Trigger;
