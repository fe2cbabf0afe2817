//! String-literal decoding shared by the language adapters
//!
//! Candidates carry decoded string content, never raw source text with
//! quotes and escape sequences. Each adapter strips its own delimiters and
//! prefixes, then runs the body through [`unescape`].

use std::iter::Peekable;
use std::str::Chars;

/// Strip one layer of matching quote characters from a literal.
///
/// Returns the input unchanged when it is not wrapped in matching quotes.
pub fn strip_quotes(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'' || first == b'`') && bytes[bytes.len() - 1] == first {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

/// Expand backslash escape sequences in a quoted-literal body.
///
/// Covers the escapes shared by the supported languages: single-character
/// escapes, `\xNN`, `\uXXXX`, `\u{...}`, `\UXXXXXXXX`, octal, and
/// backslash-newline continuations. Unknown sequences are kept verbatim
/// rather than rejected - a scan must not fail on one odd literal.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            '`' => out.push('`'),
            '/' => out.push('/'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            // Line continuation: backslash-newline disappears
            '\n' => {}
            'x' => push_hex(&mut out, &mut chars, 2, "\\x"),
            'u' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    push_braced_hex(&mut out, &mut chars);
                } else {
                    push_hex(&mut out, &mut chars, 4, "\\u");
                }
            }
            'U' => push_hex(&mut out, &mut chars, 8, "\\U"),
            '0'..='7' => push_octal(&mut out, &mut chars, escape),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn push_hex(out: &mut String, chars: &mut Peekable<Chars<'_>>, width: usize, prefix: &str) {
    let mut digits = String::new();
    while digits.len() < width {
        match chars.peek() {
            Some(&d) if d.is_ascii_hexdigit() => {
                digits.push(d);
                chars.next();
            }
            _ => break,
        }
    }
    match decode_hex(&digits, width) {
        Some(ch) => out.push(ch),
        None => {
            out.push_str(prefix);
            out.push_str(&digits);
        }
    }
}

fn push_braced_hex(out: &mut String, chars: &mut Peekable<Chars<'_>>) {
    let mut digits = String::new();
    let mut closed = false;
    while let Some(&d) = chars.peek() {
        chars.next();
        if d == '}' {
            closed = true;
            break;
        }
        digits.push(d);
    }
    let decoded = if closed {
        u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
    } else {
        None
    };
    match decoded {
        Some(ch) => out.push(ch),
        None => {
            out.push_str("\\u{");
            out.push_str(&digits);
            if closed {
                out.push('}');
            }
        }
    }
}

fn push_octal(out: &mut String, chars: &mut Peekable<Chars<'_>>, first: char) {
    let mut value = first.to_digit(8).unwrap_or(0);
    let mut count = 1;
    while count < 3 {
        match chars.peek() {
            Some(&d) if ('0'..='7').contains(&d) => {
                value = value * 8 + d.to_digit(8).unwrap_or(0);
                chars.next();
                count += 1;
            }
            _ => break,
        }
    }
    out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
}

fn decode_hex(digits: &str, width: usize) -> Option<char> {
    if digits.len() != width {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}
