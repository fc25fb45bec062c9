// Dataentry Pattern Compiler
// Turns "/pattern/flags" literals into matchers that fail safe

use std::fmt;

use regex::{Regex, RegexBuilder};

/// Flag characters accepted after the closing slash of a pattern literal
pub const FLAG_ALPHABET: &str = "gmiyusvd";

/// Returns true if `flags` is empty or a single character from [`FLAG_ALPHABET`]
pub fn is_flag_segment(flags: &str) -> bool {
    let mut chars = flags.chars();
    match (chars.next(), chars.next()) {
        (None, _) => true,
        (Some(c), None) => FLAG_ALPHABET.contains(c),
        _ => false,
    }
}

/// Errors that can occur while compiling a pattern literal
///
/// These never escape to callers of [`EntryPattern::compile`]; they are
/// logged and the pattern degrades to one that never matches.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("'{0}' is not of the form /pattern/flags")]
    Shape(String),

    #[error("cannot compile regular expression: {0}")]
    Compile(String),
}

/// Parsed pattern flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub global: bool,
    pub multiline: bool,
    pub ignore_case: bool,
    pub sticky: bool,
    pub unicode: bool,
    pub dot_all: bool,
    pub unicode_sets: bool,
    pub indices: bool,
}

impl PatternFlags {
    /// Parse a flag segment such as "i"
    ///
    /// At most one flag is accepted, taken from [`FLAG_ALPHABET`].
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        if !is_flag_segment(flags) {
            return Err(PatternError::Shape(format!("bad flags '{}'", flags)));
        }
        let mut parsed = Self::default();
        for c in flags.chars() {
            let slot = match c {
                'g' => &mut parsed.global,
                'm' => &mut parsed.multiline,
                'i' => &mut parsed.ignore_case,
                'y' => &mut parsed.sticky,
                'u' => &mut parsed.unicode,
                's' => &mut parsed.dot_all,
                'v' => &mut parsed.unicode_sets,
                'd' => &mut parsed.indices,
                other => {
                    return Err(PatternError::Shape(format!("unknown flag '{}'", other)));
                }
            };
            *slot = true;
        }
        Ok(parsed)
    }

    /// Build a regex for `pattern` honoring the flags that affect matching
    pub fn build(&self, pattern: &str) -> Result<Regex, PatternError> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.ignore_case)
            .multi_line(self.multiline)
            .dot_matches_new_line(self.dot_all)
            .build()
            .map_err(|e| PatternError::Compile(e.to_string()))
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = [
            (self.indices, 'd'),
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.unicode_sets, 'v'),
            (self.sticky, 'y'),
        ];
        for (set, c) in pairs {
            if set {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Split a "/pattern/flags" literal into its pattern and flag parts
///
/// The pattern runs from the first slash to the last one, so it may itself
/// contain slashes. Returns `None` when the shape does not fit.
pub fn split_literal(literal: &str) -> Option<(&str, &str)> {
    let body = literal.strip_prefix('/')?;
    let end = body.rfind('/')?;
    let (pattern, flags) = (&body[..end], &body[end + 1..]);
    if pattern.is_empty() || !is_flag_segment(flags) {
        return None;
    }
    Some((pattern, flags))
}

/// A compiled pattern used by the auto-enter regex criterion and by feedbacks
///
/// An `EntryPattern` without a regex never matches anything, not even the
/// empty string.
#[derive(Debug, Clone)]
pub struct EntryPattern {
    source: String,
    regex: Option<Regex>,
    flags: PatternFlags,
}

impl EntryPattern {
    /// Compile a pattern literal, logging and degrading to [`EntryPattern::never`] on failure
    pub fn compile(literal: &str) -> Self {
        match Self::try_compile(literal) {
            Ok(pattern) => pattern,
            Err(e) => {
                log::error!("Cannot compile regular expression from \"{}\", {}", literal, e);
                Self {
                    source: literal.to_string(),
                    ..Self::never()
                }
            }
        }
    }

    /// Compile a pattern literal, reporting why it failed
    pub fn try_compile(literal: &str) -> Result<Self, PatternError> {
        let (pattern, flags) =
            split_literal(literal).ok_or_else(|| PatternError::Shape(literal.to_string()))?;
        let flags = PatternFlags::parse(flags)?;
        let regex = flags.build(pattern)?;
        Ok(Self {
            source: literal.to_string(),
            regex: Some(regex),
            flags,
        })
    }

    /// A pattern that never matches
    pub fn never() -> Self {
        Self {
            source: String::new(),
            regex: None,
            flags: PatternFlags::default(),
        }
    }

    /// Test whether the pattern matches somewhere in `text`
    ///
    /// Sticky patterns only match at the start of `text`.
    pub fn is_match(&self, text: &str) -> bool {
        match &self.regex {
            None => false,
            Some(re) if self.flags.sticky => re.find(text).is_some_and(|m| m.start() == 0),
            Some(re) => re.is_match(text),
        }
    }

    /// Returns true if this pattern can never match
    pub fn is_never(&self) -> bool {
        self.regex.is_none()
    }

    /// The literal this pattern was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }
}

impl Default for EntryPattern {
    fn default() -> Self {
        Self::never()
    }
}
