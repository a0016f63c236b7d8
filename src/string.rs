//! String escape codec
//!
//! [`escape_string`] produces the quoted canonical form; the reader decodes
//! with [`unescape_char`] plus the `\x`/`\u`/`\U` hex escapes.

use std::fmt::Write;

/// Map a single-letter escape to the character it stands for.
pub fn unescape_char(letter: char) -> Option<char> {
    Some(match letter {
        'a' => '\x07',
        'b' => '\x08',
        't' => '\t',
        'n' => '\n',
        'f' => '\x0c',
        'r' => '\r',
        'e' => '\x1b',
        '\\' => '\\',
        '"' => '"',
        _ => return None,
    })
}

fn escape_letter(c: char) -> Option<char> {
    Some(match c {
        '\x07' => 'a',
        '\x08' => 'b',
        '\t' => 't',
        '\n' => 'n',
        '\x0c' => 'f',
        '\r' => 'r',
        '\x1b' => 'e',
        '\\' => '\\',
        '"' => '"',
        _ => return None,
    })
}

/// Quote `value`, escaping everything outside printable ASCII.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if let Some(letter) = escape_letter(c) {
            out.push('\\');
            out.push(letter);
        } else if c == ' ' || c.is_ascii_graphic() {
            out.push(c);
        } else {
            let code = u32::from(c);
            // Writing to a String cannot fail.
            let _ = if code < 0x100 {
                write!(out, "\\x{code:02x}")
            } else if code < 0x10000 {
                write!(out, "\\u{code:04x}")
            } else {
                write!(out, "\\U{code:06x}")
            };
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        let cases = [
            ("", r#""""#),
            ("abc", r#""abc""#),
            ("abc \"def\" ghi", r#""abc \"def\" ghi""#),
            ("abc \\ def", r#""abc \\ def""#),
            ("abc \x07\x08\t\n\x0c\r\x0b\x1b def", r#""abc \a\b\t\n\f\r\x0b\e def""#),
            ("abc \x00\x7f\u{ffff}\u{10ffff} def", r#""abc \x00\x7f\uffff\U10ffff def""#),
        ];
        for (raw, escaped) in cases {
            assert_eq!(escape_string(raw), escaped);
        }
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(escape_string("é"), r#""\xe9""#);
        assert_eq!(escape_string("\u{1234}"), r#""\u1234""#);
    }

    #[test]
    fn test_unescape_table_is_inverse() {
        for letter in "abtnfre\\\"".chars() {
            let c = unescape_char(letter).unwrap();
            assert_eq!(escape_letter(c), Some(letter));
        }
        assert_eq!(unescape_char('d'), None);
        assert_eq!(unescape_char('v'), None);
    }
}
