// Regex substitution format specs: "/find/replace/flags"

use regex::{Captures, Regex};

use crate::pattern::{is_flag_segment, PatternError, PatternFlags};

/// A compiled "/find/replace/flags" substitution
#[derive(Debug, Clone)]
pub struct Substitution {
    regex: Regex,
    replacement: String,
    flags: PatternFlags,
}

/// Split a substitution spec into find, replacement and flags
///
/// Find and replacement are separated by the last slash that is not preceded
/// by a backslash. Escaped slashes in the replacement are unescaped.
pub fn split_substitution(spec: &str) -> Option<(&str, String, &str)> {
    let body = spec.strip_prefix('/')?;
    let end = body.rfind('/')?;
    let (rest, flags) = (&body[..end], &body[end + 1..]);
    if !is_flag_segment(flags) {
        return None;
    }

    let bytes = rest.as_bytes();
    let sep = rest
        .rmatch_indices('/')
        .map(|(i, _)| i)
        .find(|&i| i >= 1 && bytes[i - 1] != b'\\')?;

    let find = &rest[..sep];
    let replacement = rest[sep + 1..].replace("\\/", "/");
    Some((find, replacement, flags))
}

impl Substitution {
    /// Parse a substitution spec
    ///
    /// Returns `None` when `spec` is not shaped like a substitution at all and
    /// `Some(Err(..))` when it is, but the find pattern does not compile.
    pub fn parse(spec: &str) -> Option<Result<Self, PatternError>> {
        let (find, replacement, flags) = split_substitution(spec)?;
        Some(Self::new(find, replacement, flags))
    }

    pub fn new(find: &str, replacement: String, flags: &str) -> Result<Self, PatternError> {
        let flags = PatternFlags::parse(flags)?;
        let regex = flags.build(find)?;
        Ok(Self {
            regex,
            replacement,
            flags,
        })
    }

    /// Replace the first match in `text`, or every match with the global flag
    ///
    /// With the sticky flag matches must start where the previous one ended,
    /// beginning at the start of `text`.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in self.regex.captures_iter(text) {
            let Some(m) = caps.get(0) else {
                continue;
            };
            if self.flags.sticky && m.start() != last {
                break;
            }
            out.push_str(&text[last..m.start()]);
            expand_replacement(&self.regex, &caps, text, &self.replacement, &mut out);
            last = m.end();
            if !self.flags.global {
                break;
            }
        }

        out.push_str(&text[last..]);
        out
    }
}

/// Expand `$` tokens in a replacement template for one match
///
/// Supports `$$`, `$&`, `` $` ``, `$'`, `$n`, `$nn` and `$<name>`. Tokens that
/// refer to nothing are copied through literally.
fn expand_replacement(regex: &Regex, caps: &Captures<'_>, text: &str, template: &str, out: &mut String) {
    let Some(whole) = caps.get(0) else {
        return;
    };
    let group_count = caps.len() - 1;
    let has_names = regex.capture_names().flatten().next().is_some();

    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let mut chars = after.chars();

        match chars.next() {
            Some('$') => {
                out.push('$');
                rest = &after[1..];
            }
            Some('&') => {
                out.push_str(whole.as_str());
                rest = &after[1..];
            }
            Some('`') => {
                out.push_str(&text[..whole.start()]);
                rest = &after[1..];
            }
            Some('\'') => {
                out.push_str(&text[whole.end()..]);
                rest = &after[1..];
            }
            Some(d) if d.is_ascii_digit() => {
                let first = d.to_digit(10).unwrap_or(0) as usize;
                let two = chars
                    .next()
                    .and_then(|c| c.to_digit(10))
                    .map(|second| first * 10 + second as usize);

                if let Some(n) = two.filter(|&n| n >= 1 && n <= group_count) {
                    out.push_str(caps.get(n).map_or("", |m| m.as_str()));
                    rest = &after[2..];
                } else if first >= 1 && first <= group_count {
                    out.push_str(caps.get(first).map_or("", |m| m.as_str()));
                    rest = &after[1..];
                } else {
                    out.push('$');
                    rest = after;
                }
            }
            Some('<') if has_names => match after.find('>') {
                Some(close) => {
                    let name = &after[1..close];
                    out.push_str(caps.name(name).map_or("", |m| m.as_str()));
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('$');
                    rest = after;
                }
            },
            _ => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
}
