// Dataentry Formatter
// Turns the raw entry into its displayable/exported form

pub mod escape;
pub mod printf;
pub mod substitute;

pub use escape::NamedTransform;
pub use substitute::Substitution;

/// Default format spec; resolves to the identity transform
pub const DEFAULT_FORMAT: &str = "*";

/// A parsed format spec
///
/// Specs are classified in a fixed order, first match wins: substitution,
/// printf directive, named transform, identity.
#[derive(Debug, Clone)]
pub enum FormatSpec {
    Substitute(Substitution),
    Printf(String),
    Named(NamedTransform),
    Identity,
}

impl FormatSpec {
    /// Classify an (already interpolated) format spec
    ///
    /// A substitution whose pattern fails to compile is logged and treated as
    /// the identity transform.
    pub fn parse(spec: &str) -> Self {
        if let Some(substitution) = Substitution::parse(spec) {
            return match substitution {
                Ok(s) => FormatSpec::Substitute(s),
                Err(e) => {
                    log::error!("Regex formatting failed for \"{}\": {}", spec, e);
                    FormatSpec::Identity
                }
            };
        }

        if printf::has_directive(spec) {
            return FormatSpec::Printf(spec.to_string());
        }

        match NamedTransform::from_name(spec) {
            Some(transform) => FormatSpec::Named(transform),
            None => FormatSpec::Identity,
        }
    }

    pub fn apply(&self, raw: &str) -> String {
        match self {
            FormatSpec::Substitute(s) => s.apply(raw),
            FormatSpec::Printf(spec) => printf::printf(spec, raw),
            FormatSpec::Named(transform) => transform.apply(raw),
            FormatSpec::Identity => raw.to_string(),
        }
    }
}

/// Format `raw` according to `spec`
pub fn format(raw: &str, spec: &str) -> String {
    FormatSpec::parse(spec).apply(raw)
}

/// Keeps the parsed form of the most recently used spec string
///
/// The format string is re-interpolated on every use since host variables may change,
/// but it is only re-parsed when the interpolated text differs.
#[derive(Debug, Clone)]
pub struct FormatCache {
    spec: String,
    parsed: FormatSpec,
}

impl FormatCache {
    pub fn new() -> Self {
        Self {
            spec: DEFAULT_FORMAT.to_string(),
            parsed: FormatSpec::Identity,
        }
    }

    /// Get the parsed form of `spec`, re-parsing only when it changed
    pub fn get(&mut self, spec: &str) -> &FormatSpec {
        if self.spec != spec {
            self.parsed = FormatSpec::parse(spec);
            self.spec = spec.to_string();
        }
        &self.parsed
    }
}

impl Default for FormatCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_is_identity() {
        assert_eq!(format("<b>1234", DEFAULT_FORMAT), "<b>1234");
        assert!(matches!(FormatSpec::parse("*"), FormatSpec::Identity));
    }

    #[test]
    fn test_named_transform() {
        assert_eq!(format("<b>", "html"), "&lt;b&gt;");
    }

    #[test]
    fn test_unknown_name_is_identity() {
        assert_eq!(format("<b>", "Html "), "<b>");
    }

    #[test]
    fn test_substitution_wins_over_printf() {
        // Contains "%s" but is shaped like a substitution
        assert_eq!(format("a", "/a/%s/"), "%s");
    }

    #[test]
    fn test_printf_wins_over_named() {
        assert_eq!(format("7", "Cam %s"), "Cam 7");
    }

    #[test]
    fn test_broken_substitution_is_identity() {
        assert!(matches!(FormatSpec::parse("/(/x/"), FormatSpec::Identity));
        assert_eq!(format("(abc", "/(/x/"), "(abc");
    }

    #[test]
    fn test_substitution_with_two_flags_is_identity() {
        assert!(matches!(FormatSpec::parse("/a/x/gi"), FormatSpec::Identity));
        assert_eq!(format("bAnana", "/a/x/gi"), "bAnana");
    }

    #[test]
    fn test_format_cache_reparses_on_change() {
        let mut cache = FormatCache::new();
        assert!(matches!(cache.get("*"), FormatSpec::Identity));
        assert!(matches!(cache.get("html"), FormatSpec::Named(NamedTransform::Html)));
        assert!(matches!(cache.get("%d"), FormatSpec::Printf(_)));
    }
}
