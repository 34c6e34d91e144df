//! Canonical String Conversion
//!
//! Two renderings exist, mirroring the default conversions of a dynamic
//! language's client library:
//!
//! - **str**: what gets stored. Text is emitted verbatim.
//! - **repr**: how an element looks *inside* a sequence or mapping. Text is
//!   quoted and escaped; every other variant renders the same as its str form.
//!
//! ## Quoting Rules
//!
//! ```text
//! hello      -> 'hello'
//! it's       -> "it's"
//! it's "x"   -> 'it\'s "x"'
//! a\b        -> 'a\\b'
//! tab<TAB>   -> 'tab\t'
//! <ESC>      -> '\x1b'
//! ```

use super::types::Value;
use std::fmt::{self, Write};
use unicode_general_category::{get_general_category, GeneralCategory};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            other => other.write_repr(f),
        }
    }
}

impl Value {
    /// Returns the quoted, nested-element form of this value.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_repr(&mut out);
        out
    }

    fn write_repr<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Value::Bool(true) => out.write_str("True"),
            Value::Bool(false) => out.write_str("False"),
            Value::Int(n) => write!(out, "{}", n),
            Value::Text(s) => write_quoted(out, s),
            Value::Seq(items) => {
                out.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    item.write_repr(out)?;
                }
                out.write_char(']')
            }
            Value::Map(entries) => {
                out.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    write_quoted(out, key)?;
                    out.write_str(": ")?;
                    value.write_repr(out)?;
                }
                out.write_char('}')
            }
        }
    }
}

/// Writes `s` as a quoted literal.
///
/// Single quotes are preferred; double quotes are used only when the text
/// contains a single quote and no double quote.
fn write_quoted<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    out.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c == quote => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            c if is_printable(c) => out.write_char(c)?,
            c => {
                let code = c as u32;
                if code <= 0xff {
                    write!(out, "\\x{:02x}", code)?;
                } else if code <= 0xffff {
                    write!(out, "\\u{:04x}", code)?;
                } else {
                    write!(out, "\\U{:08x}", code)?;
                }
            }
        }
    }
    out.write_char(quote)
}

/// Whether a character is emitted literally inside a quoted literal.
///
/// Everything but the ASCII space in the "Other" and "Separator" general
/// categories is escaped: controls, format characters, surrogates, private
/// use, unassigned code points and every kind of separator.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Reduces a value to the string the store keeps for it.
pub fn canonicalize(value: &Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bools() {
        assert_eq!(canonicalize(&Value::from(true)), "True");
        assert_eq!(canonicalize(&Value::from(false)), "False");
        assert_eq!(canonicalize(&Value::seq([true, false])), "[True, False]");
    }

    #[test]
    fn test_integers() {
        assert_eq!(canonicalize(&Value::from(0)), "0");
        assert_eq!(canonicalize(&Value::from(5)), "5");
        assert_eq!(canonicalize(&Value::from(-17)), "-17");
        assert_eq!(
            canonicalize(&Value::Int(i64::MIN)),
            "-9223372036854775808"
        );
    }

    #[test]
    fn test_text_is_verbatim_at_top_level() {
        assert_eq!(canonicalize(&Value::from("it's \"raw\"\n")), "it's \"raw\"\n");
        assert_eq!(canonicalize(&Value::from("")), "");
    }

    #[test]
    fn test_sequences() {
        let value = Value::seq([Value::from(1), Value::from("2")]);
        assert_eq!(canonicalize(&value), "[1, '2']");

        assert_eq!(canonicalize(&Value::Seq(vec![])), "[]");

        let nested = Value::seq([Value::seq([1, 2]), Value::Seq(vec![])]);
        assert_eq!(canonicalize(&nested), "[[1, 2], []]");
    }

    #[test]
    fn test_mappings() {
        let value = Value::map([("a", Value::from(1)), ("b", Value::from("c"))]);
        assert_eq!(canonicalize(&value), "{'a': 1, 'b': 'c'}");

        assert_eq!(canonicalize(&Value::Map(vec![])), "{}");

        let nested = Value::map([("xs", Value::seq(["x"])), ("ok", Value::from(true))]);
        assert_eq!(canonicalize(&nested), "{'xs': ['x'], 'ok': True}");
    }

    #[test]
    fn test_quote_selection() {
        assert_eq!(Value::from("plain").repr(), "'plain'");
        assert_eq!(Value::from("it's").repr(), "\"it's\"");
        assert_eq!(Value::from("say \"hi\"").repr(), "'say \"hi\"'");
        assert_eq!(Value::from("it's \"both\"").repr(), "'it\\'s \"both\"'");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(Value::from("a\\b").repr(), "'a\\\\b'");
        assert_eq!(Value::from("l1\nl2\r\t").repr(), "'l1\\nl2\\r\\t'");
        assert_eq!(Value::from("\u{1b}[0m").repr(), "'\\x1b[0m'");
        assert_eq!(Value::from("\u{7f}").repr(), "'\\x7f'");
        assert_eq!(Value::from("a\u{a0}b").repr(), "'a\\xa0b'");
        assert_eq!(Value::from("\u{200b}").repr(), "'\\u200b'");
    }

    #[test]
    fn test_invisible_categories_are_escaped() {
        // Format, private use, unassigned
        assert_eq!(Value::seq(["\u{0600}"]).canonical(), "['\\u0600']");
        assert_eq!(Value::seq(["\u{e000}"]).canonical(), "['\\ue000']");
        assert_eq!(Value::seq(["\u{0378}"]).canonical(), "['\\u0378']");
        assert_eq!(Value::from("\u{06dd}\u{fff9}").repr(), "'\\u06dd\\ufff9'");
        assert_eq!(Value::from("\u{e0001}").repr(), "'\\U000e0001'");

        // Separators other than the ASCII space
        assert_eq!(Value::from("a\u{2028}b\u{3000}").repr(), "'a\\u2028b\\u3000'");
        assert_eq!(Value::from("\u{85}").repr(), "'\\x85'");
    }

    #[test]
    fn test_printable_unicode_is_literal() {
        assert_eq!(Value::from("héllo ✓").repr(), "'héllo ✓'");
        assert_eq!(Value::from("日本").repr(), "'日本'");
    }

    #[test]
    fn test_repr_of_non_text_matches_str() {
        let value = Value::map([("k", Value::seq([1]))]);
        assert_eq!(value.repr(), value.canonical());
        assert_eq!(Value::from(3).repr(), "3");
    }
}
