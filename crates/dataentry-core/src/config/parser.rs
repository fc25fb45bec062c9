// Dataentry Config Parser - TOML with Serde
// Parses configuration from TOML files

use std::fmt;
#[cfg(feature = "toml-config")]
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::control::ControlMap;
use crate::criteria::AutoEnterConfig;
use crate::format::DEFAULT_FORMAT;
use crate::modifier::MODIFIER_SLOTS;
use crate::state::DEFAULT_MAX_LENGTH;

/// Smallest and largest accepted length settings
pub const LENGTH_RANGE: (usize, usize) = (1, 65536);

/// Smallest and largest accepted timeout in seconds
pub const TIMEOUT_RANGE: (f64, f64) = (0.1, 30.0);

/// Configuration parser errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Cursor must be exactly one character, got {0:?}")]
    InvalidCursor(String),

    #[error("Control '{control}' uses modifier slot {slot}, only 0..{max} exist", max = MODIFIER_SLOTS)]
    InvalidModifierSlot { control: String, slot: usize },
}

/// Which value a commit copies into the history
///
/// Anything other than the known names is kept verbatim so that a commit can
/// report it; such a commit still counts but leaves the history unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CopyMode {
    #[default]
    Raw,
    Formatted,
    /// Commit without copying anything and keep the buffer
    Nothing,
    Unrecognized(String),
}

impl CopyMode {
    pub fn parse(s: &str) -> Self {
        match s {
            "raw" => CopyMode::Raw,
            "formatted" => CopyMode::Formatted,
            "none" => CopyMode::Nothing,
            other => CopyMode::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CopyMode::Raw => "raw",
            CopyMode::Formatted => "formatted",
            CopyMode::Nothing => "none",
            CopyMode::Unrecognized(s) => s,
        }
    }
}

impl From<String> for CopyMode {
    fn from(s: String) -> Self {
        CopyMode::parse(&s)
    }
}

impl From<CopyMode> for String {
    fn from(mode: CopyMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for CopyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happens to the buffer after a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterEntry {
    #[default]
    Clear,
    Keep,
}

/// Entry buffer and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EntryConfig {
    /// Format spec; host variables are interpolated before use
    pub format: String,

    /// Maximum entry length before truncation
    pub max_length: usize,

    /// Cursor glyph shown in the cursor display
    pub cursor: String,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            cursor: "|".to_string(),
        }
    }
}

/// Commit behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EnterConfig {
    /// Value copied into the history on commit
    pub copy: CopyMode,

    /// Buffer handling after commit
    pub after: AfterEntry,
}

/// Main configuration structure (root TOML table)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub entry: EntryConfig,

    pub enter: EnterConfig,

    pub auto_enter: AutoEnterConfig,

    /// Control bindings by control id
    pub controls: ControlMap,
}

impl Config {
    /// Load config from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    #[cfg(feature = "toml-config")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path)?;
        log::debug!("Loading config from {}", path.as_ref().display());
        Self::from_toml(&content)
    }

    /// Get the default config path
    #[cfg(feature = "toml-config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dataentry").join("config.toml"))
    }

    /// Load from default location (~/.config/dataentry/config.toml)
    #[cfg(feature = "toml-config")]
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default config if file doesn't exist
        Ok(Self::default())
    }

    /// Check value ranges and cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_length("entry.max_length", self.entry.max_length)?;
        check_length("auto_enter.raw_length", self.auto_enter.raw_length)?;
        check_length("auto_enter.formatted_length", self.auto_enter.formatted_length)?;

        let timeout = self.auto_enter.timeout;
        if !(TIMEOUT_RANGE.0..=TIMEOUT_RANGE.1).contains(&timeout) {
            return Err(ConfigError::OutOfRange {
                field: "auto_enter.timeout",
                value: timeout.to_string(),
            });
        }

        if self.entry.cursor.chars().count() != 1 {
            return Err(ConfigError::InvalidCursor(self.entry.cursor.clone()));
        }

        if let Some((control, slot)) = self.controls.invalid_modifier_slot() {
            return Err(ConfigError::InvalidModifierSlot {
                control: control.to_string(),
                slot,
            });
        }

        if let CopyMode::Unrecognized(mode) = &self.enter.copy {
            log::warn!("enter.copy '{}' is not raw, formatted or none; commits will not copy", mode);
        }

        Ok(())
    }

    /// Inactivity timeout as a duration
    pub fn timeout(&self) -> Duration {
        self.auto_enter.timeout_duration()
    }
}

fn check_length(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if (LENGTH_RANGE.0..=LENGTH_RANGE.1).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
        })
    }
}

/// Create default config content for a new installation
pub fn default_config_content() -> &'static str {
    r#"# Dataentry Config
# Place this file at: ~/.config/dataentry/config.toml

[entry]
# "*" keeps the entry as typed. Other options:
#   "/find/replace/flag"   regex substitution (at most one flag)
#   "Channel %s"           printf style, the entry is the only argument
#   "html", "htmlAttr", "htmlSpecialChars", "shellArg", "regExp",
#   "regExpReplacement", "control"
format = "*"
max_length = 1024
cursor = "|"

[enter]
# raw | formatted | none
copy = "raw"
# clear | keep
after = "clear"

[auto_enter]
# or: any checked criterion enters, and: all checked criteria must hold
logic = "or"
on_raw_length = false
raw_length = 4
on_formatted_length = false
formatted_length = 4
on_regex = false
regex = "/.*/i"
on_timeout = false
# seconds
timeout = 2.5

# Control bindings. Unbound single characters insert themselves.
# [controls.shift]
# action = "modifier"
# slot = 0
# mode = "toggle"
#
# [controls.k2]
# action = "insert"
# text = "2"
# alternates = ["a", "b", "c"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlAction;
    use crate::criteria::CriteriaLogic;
    use crate::modifier::LatchMode;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.entry.format, "*");
        assert_eq!(config.entry.max_length, 1024);
        assert_eq!(config.entry.cursor, "|");
        assert_eq!(config.enter.copy, CopyMode::Raw);
        assert_eq!(config.enter.after, AfterEntry::Clear);
        assert_eq!(config.auto_enter.logic, CriteriaLogic::Or);
        assert_eq!(config.auto_enter.raw_length, 4);
        assert_eq!(config.auto_enter.regex, "/.*/i");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_copy_mode_parse() {
        assert_eq!(CopyMode::parse("raw"), CopyMode::Raw);
        assert_eq!(CopyMode::parse("formatted"), CopyMode::Formatted);
        assert_eq!(CopyMode::parse("none"), CopyMode::Nothing);
        assert_eq!(
            CopyMode::parse("upper"),
            CopyMode::Unrecognized("upper".to_string())
        );
        assert_eq!(CopyMode::Nothing.to_string(), "none");
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
[entry]
format = "html"
max_length = 8

[enter]
copy = "formatted"
after = "keep"

[auto_enter]
logic = "and"
on_raw_length = true
raw_length = 3
on_timeout = true
timeout = 0.5

[controls.shift]
action = "modifier"
slot = 1
mode = "onetime"

[controls.k2]
action = "insert"
text = "2"
alternates = ["a", "b"]
"#,
        )
        .unwrap();

        assert_eq!(config.entry.format, "html");
        assert_eq!(config.entry.cursor, "|");
        assert_eq!(config.enter.copy, CopyMode::Formatted);
        assert_eq!(config.enter.after, AfterEntry::Keep);
        assert_eq!(config.auto_enter.logic, CriteriaLogic::And);
        assert!(config.auto_enter.on_raw_length);
        assert!(!config.auto_enter.on_regex);
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(
            config.controls.get("shift"),
            Some(&ControlAction::Modifier {
                slot: 1,
                mode: LatchMode::Onetime
            })
        );
        assert_eq!(
            config.controls.get("k2"),
            Some(&ControlAction::Insert {
                text: "2".to_string(),
                alternates: vec!["a".to_string(), "b".to_string()]
            })
        );
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_rejects_unknown_fields() {
        let err = Config::from_toml("[entry]\nmaxlength = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_range_checks() {
        assert!(matches!(
            Config::from_toml("[entry]\nmax_length = 0\n"),
            Err(ConfigError::OutOfRange { field: "entry.max_length", .. })
        ));
        assert!(matches!(
            Config::from_toml("[auto_enter]\ntimeout = 31.0\n"),
            Err(ConfigError::OutOfRange { field: "auto_enter.timeout", .. })
        ));
        assert!(matches!(
            Config::from_toml("[entry]\ncursor = \"<>\"\n"),
            Err(ConfigError::InvalidCursor(_))
        ));
        assert!(matches!(
            Config::from_toml("[controls.m]\naction = \"modifier\"\nslot = 3\n"),
            Err(ConfigError::InvalidModifierSlot { slot: 3, .. })
        ));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_unknown_copy_mode_is_kept() {
        let config = Config::from_toml("[enter]\ncopy = \"upper\"\n").unwrap();
        assert_eq!(config.enter.copy, CopyMode::Unrecognized("upper".to_string()));
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_default_content_parses() {
        let config = Config::from_toml(default_config_content()).unwrap();
        assert_eq!(config, Config::default());
    }
}
