// Dataentry Config API
// TOML configuration for the entry, commit and auto-enter behavior

pub mod parser;

pub use parser::{default_config_content, AfterEntry, Config, ConfigError, CopyMode, EnterConfig, EntryConfig};
