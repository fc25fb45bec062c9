// Dataentry Auto-Enter Criteria
// Decides whether the current entry should be committed automatically

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pattern::EntryPattern;
use crate::Trigger;

/// How enabled criteria combine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriteriaLogic {
    /// Any enabled criterion suffices
    #[default]
    Or,
    /// Every enabled criterion must hold
    And,
}

impl fmt::Display for CriteriaLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriteriaLogic::Or => write!(f, "or"),
            CriteriaLogic::And => write!(f, "and"),
        }
    }
}

/// Auto-enter criteria settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AutoEnterConfig {
    pub logic: CriteriaLogic,

    /// Enter when the raw entry reaches `raw_length` characters
    pub on_raw_length: bool,
    pub raw_length: usize,

    /// Enter when the formatted entry reaches `formatted_length` characters
    pub on_formatted_length: bool,
    pub formatted_length: usize,

    /// Enter when `regex` matches the raw entry
    pub on_regex: bool,
    pub regex: String,

    /// Enter when the inactivity timer fires
    pub on_timeout: bool,
    /// Inactivity timeout in seconds
    pub timeout: f64,
}

impl Default for AutoEnterConfig {
    fn default() -> Self {
        Self {
            logic: CriteriaLogic::Or,
            on_raw_length: false,
            raw_length: 4,
            on_formatted_length: false,
            formatted_length: 4,
            on_regex: false,
            regex: "/.*/i".to_string(),
            on_timeout: false,
            timeout: 2.5,
        }
    }
}

impl AutoEnterConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout).unwrap_or(crate::timeout::DEFAULT_TIMEOUT)
    }

    /// Returns true if any criterion is enabled
    pub fn any_enabled(&self) -> bool {
        self.on_timeout || self.on_raw_length || self.on_formatted_length || self.on_regex
    }
}

/// Evaluate the criteria against an entry
///
/// `formatted` is only called if the formatted-length criterion is reached.
/// The timeout criterion holds only when `trigger` is [`Trigger::Timer`].
pub fn should_enter<F>(
    config: &AutoEnterConfig,
    pattern: &EntryPattern,
    raw: &str,
    formatted: F,
    trigger: Trigger,
) -> bool
where
    F: FnOnce() -> String,
{
    let raw_len = raw.chars().count();

    match config.logic {
        CriteriaLogic::Or => {
            (config.on_timeout && trigger.is_timer())
                || (config.on_raw_length && raw_len >= config.raw_length)
                || (config.on_formatted_length
                    && formatted().chars().count() >= config.formatted_length)
                || (config.on_regex && pattern.is_match(raw))
        }
        CriteriaLogic::And => {
            // Nothing enabled means nothing to satisfy; never auto-enter
            if !config.any_enabled() {
                return false;
            }
            if config.on_timeout && !trigger.is_timer() {
                return false;
            }
            if config.on_raw_length && raw_len < config.raw_length {
                return false;
            }
            if config.on_formatted_length && formatted().chars().count() < config.formatted_length {
                return false;
            }
            if config.on_regex && !pattern.is_match(raw) {
                return false;
            }
            true
        }
    }
}

/// Criteria together with their compiled pattern
#[derive(Debug, Clone)]
pub struct AutoEnter {
    config: AutoEnterConfig,
    pattern: EntryPattern,
}

impl AutoEnter {
    pub fn new(config: AutoEnterConfig) -> Self {
        let pattern = if config.on_regex {
            EntryPattern::compile(&config.regex)
        } else {
            EntryPattern::never()
        };
        Self { config, pattern }
    }

    pub fn config(&self) -> &AutoEnterConfig {
        &self.config
    }

    pub fn pattern(&self) -> &EntryPattern {
        &self.pattern
    }

    pub fn should_enter<F>(&self, raw: &str, formatted: F, trigger: Trigger) -> bool
    where
        F: FnOnce() -> String,
    {
        should_enter(&self.config, &self.pattern, raw, formatted, trigger)
    }
}

impl Default for AutoEnter {
    fn default() -> Self {
        Self::new(AutoEnterConfig::default())
    }
}
