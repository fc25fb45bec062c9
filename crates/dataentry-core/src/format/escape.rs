// Named escape transforms selectable as a format spec

use std::fmt;

/// Deterministic text transforms addressed by name in the format spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedTransform {
    ShellArg,
    RegExp,
    RegExpReplacement,
    Html,
    HtmlAttr,
    HtmlSpecialChars,
    Control,
}

impl NamedTransform {
    pub const ALL: [NamedTransform; 7] = [
        NamedTransform::ShellArg,
        NamedTransform::RegExp,
        NamedTransform::RegExpReplacement,
        NamedTransform::Html,
        NamedTransform::HtmlAttr,
        NamedTransform::HtmlSpecialChars,
        NamedTransform::Control,
    ];

    /// Look up a transform by its exact spec name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedTransform::ShellArg => "shellArg",
            NamedTransform::RegExp => "regExp",
            NamedTransform::RegExpReplacement => "regExpReplacement",
            NamedTransform::Html => "html",
            NamedTransform::HtmlAttr => "htmlAttr",
            NamedTransform::HtmlSpecialChars => "htmlSpecialChars",
            NamedTransform::Control => "control",
        }
    }

    pub fn apply(self, input: &str) -> String {
        match self {
            NamedTransform::ShellArg => shell_arg(input),
            NamedTransform::RegExp => reg_exp(input),
            NamedTransform::RegExpReplacement => input.replace('$', "$$"),
            NamedTransform::Html => replace_chars(input, |c| match c {
                '&' => Some("&amp;"),
                '<' => Some("&lt;"),
                '>' => Some("&gt;"),
                _ => None,
            }),
            NamedTransform::HtmlAttr => replace_chars(input, |c| match c {
                '&' => Some("&amp;"),
                '"' => Some("&quot;"),
                _ => None,
            }),
            NamedTransform::HtmlSpecialChars => replace_chars(input, |c| match c {
                '&' => Some("&amp;"),
                '<' => Some("&lt;"),
                '>' => Some("&gt;"),
                '"' => Some("&quot;"),
                '\'' => Some("&#039;"),
                _ => None,
            }),
            NamedTransform::Control => control(input),
        }
    }
}

impl fmt::Display for NamedTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn replace_chars(input: &str, map: impl Fn(char) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match map(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Single-quote for a POSIX shell, closing and reopening around embedded quotes
fn shell_arg(input: &str) -> String {
    format!("'{}'", input.replace('\'', "'\\''"))
}

fn reg_exp(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if ".*+?^${}()|[]\\/".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn control(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{7f}' => out.push_str("\\x7f"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_transform() {
        for t in NamedTransform::ALL {
            assert_eq!(NamedTransform::from_name(t.name()), Some(t));
        }
        assert_eq!(NamedTransform::from_name("HTML"), None);
        assert_eq!(NamedTransform::from_name("*"), None);
    }

    #[test]
    fn test_html() {
        assert_eq!(NamedTransform::Html.apply("<b>"), "&lt;b&gt;");
        assert_eq!(NamedTransform::Html.apply("a & \"b\""), "a &amp; \"b\"");
    }

    #[test]
    fn test_html_attr() {
        assert_eq!(NamedTransform::HtmlAttr.apply("say \"hi\" & <go>"), "say &quot;hi&quot; &amp; <go>");
    }

    #[test]
    fn test_html_special_chars() {
        assert_eq!(
            NamedTransform::HtmlSpecialChars.apply("<a href='x'>\"&\"</a>"),
            "&lt;a href=&#039;x&#039;&gt;&quot;&amp;&quot;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_shell_arg() {
        assert_eq!(NamedTransform::ShellArg.apply("abc"), "'abc'");
        assert_eq!(NamedTransform::ShellArg.apply("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_reg_exp() {
        assert_eq!(NamedTransform::RegExp.apply("1.5*(x)"), "1\\.5\\*\\(x\\)");
        assert_eq!(NamedTransform::RegExp.apply("a/b"), "a\\/b");
    }

    #[test]
    fn test_reg_exp_replacement() {
        assert_eq!(NamedTransform::RegExpReplacement.apply("$1 costs $5"), "$$1 costs $$5");
    }

    #[test]
    fn test_control() {
        assert_eq!(NamedTransform::Control.apply("a\tb\r\n"), "a\\tb\\r\\n");
        assert_eq!(NamedTransform::Control.apply("\u{1b}[0m"), "\\x1b[0m");
        assert_eq!(NamedTransform::Control.apply("plain"), "plain");
    }
}
