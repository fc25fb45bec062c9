// Printf-style format specs with the raw entry as the only argument

/// Returns true if `spec` contains a `%` directive
pub fn has_directive(spec: &str) -> bool {
    let mut chars = spec.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(next) = chars.clone().next() {
                if !matches!(next, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                    return true;
                }
            }
        }
    }
    false
}

/// Apply `spec` to `arg`
///
/// Only the first argument-consuming directive receives `arg`; any later ones
/// render as empty strings. Unknown directives are copied through.
pub fn printf(spec: &str, arg: &str) -> String {
    let mut out = String::with_capacity(spec.len() + arg.len());
    let mut consumed = false;
    let mut chars = spec.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut directive = String::from('%');
        let mut precision: Option<usize> = None;
        if chars.peek() == Some(&'.') {
            directive.push('.');
            chars.next();
            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                digits.push(d);
                directive.push(d);
                chars.next();
            }
            precision = digits.parse().ok();
        }

        let Some(conversion) = chars.next() else {
            out.push_str(&directive);
            break;
        };

        if conversion == '%' && precision.is_none() {
            out.push('%');
            continue;
        }

        if !is_conversion(conversion) {
            out.push_str(&directive);
            out.push(conversion);
            continue;
        }

        if consumed {
            continue;
        }
        consumed = true;
        out.push_str(&convert(conversion, precision, arg));
    }

    out
}

fn is_conversion(c: char) -> bool {
    matches!(c, 's' | 'd' | 'i' | 'f' | 'e' | 'x' | 'X' | 'o' | 'b' | 'J' | 'u' | 'l')
}

fn convert(conversion: char, precision: Option<usize>, arg: &str) -> String {
    match conversion {
        's' => arg.to_string(),
        'u' => arg.to_uppercase(),
        'l' => arg.to_lowercase(),
        'J' => json_quote(arg),
        'd' | 'i' => integer(to_number(arg), |n| n.to_string()),
        'x' => integer(to_number(arg), |n| signed(n, |a| format!("{:x}", a))),
        'X' => integer(to_number(arg), |n| signed(n, |a| format!("{:X}", a))),
        'o' => integer(to_number(arg), |n| signed(n, |a| format!("{:o}", a))),
        'b' => integer(to_number(arg), |n| signed(n, |a| format!("{:b}", a))),
        'f' => {
            let n = to_number(arg);
            match precision {
                Some(p) if n.is_finite() => format!("{:.*}", p, n),
                _ => float(n),
            }
        }
        'e' => {
            let n = to_number(arg);
            if !n.is_finite() {
                return float(n);
            }
            let raw = match precision {
                Some(p) => format!("{:.*e}", p, n),
                None => format!("{:e}", n),
            };
            // "1.5e3" -> "1.5e+3"
            match raw.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
                _ => raw,
            }
        }
        _ => String::new(),
    }
}

/// Numeric value of the argument: blank is zero, unparseable is NaN
fn to_number(arg: &str) -> f64 {
    let trimmed = arg.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn integer(n: f64, render: impl Fn(i64) -> String) -> String {
    if n.is_finite() {
        render(n.trunc() as i64)
    } else {
        float(n)
    }
}

fn signed(n: i64, render: impl Fn(u64) -> String) -> String {
    if n < 0 {
        format!("-{}", render(n.unsigned_abs()))
    } else {
        render(n as u64)
    }
}

fn float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else {
        n.to_string()
    }
}

fn json_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_directive() {
        assert!(has_directive("Channel %s"));
        assert!(has_directive("%%"));
        assert!(!has_directive("100%"));
        assert!(!has_directive("*"));
        assert!(!has_directive("50%\nmore"));
        assert!(!has_directive("50%\r\n"));
        assert!(!has_directive("50%\u{2028}"));
        assert!(!has_directive("50%\u{2029}"));
    }

    #[test]
    fn test_string_directive() {
        assert_eq!(printf("Channel %s!", "42"), "Channel 42!");
        assert_eq!(printf("%u/%l", "MiXed"), "MIXED/");
    }

    #[test]
    fn test_only_first_directive_consumes() {
        assert_eq!(printf("[%s][%s]", "x"), "[x][]");
    }

    #[test]
    fn test_integer_directives() {
        assert_eq!(printf("%d", "42.9"), "42");
        assert_eq!(printf("%i", "-7.5"), "-7");
        assert_eq!(printf("%d", ""), "0");
        assert_eq!(printf("%d", "abc"), "NaN");
        assert_eq!(printf("%x", "255"), "ff");
        assert_eq!(printf("%X", "255"), "FF");
        assert_eq!(printf("%o", "8"), "10");
        assert_eq!(printf("%b", "5"), "101");
        assert_eq!(printf("%x", "-255"), "-ff");
    }

    #[test]
    fn test_float_directives() {
        assert_eq!(printf("%.2f", "3.14159"), "3.14");
        assert_eq!(printf("%f", "2.5"), "2.5");
        assert_eq!(printf("%.1e", "1500"), "1.5e+3");
        assert_eq!(printf("%e", "0.015"), "1.5e-2");
    }

    #[test]
    fn test_percent_literal_and_unknown() {
        assert_eq!(printf("100%% of %s", "x"), "100% of x");
        assert_eq!(printf("%q %s", "x"), "%q x");
        assert_eq!(printf("trailing %", "x"), "trailing %");
    }

    #[test]
    fn test_json_directive() {
        assert_eq!(printf("%J", "say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    }
}
