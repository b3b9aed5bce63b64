//! String literal escape decoding.

use std::iter::Peekable;
use std::str::Chars;

/// Decode the body of a JavaScript string literal (quotes already removed).
///
/// Handles the single-character escapes, `\xHH`, `\uHHHH` (joining escaped
/// surrogate pairs), `\u{H…}`, and line continuations. Unpaired surrogates
/// and malformed escapes decode to U+FFFD.
pub fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            'x' => out.push(to_char(scan_hex_escape(&mut chars, 2))),
            'u' => out.push(scan_unicode_escape(&mut chars)),
            // Line continuation
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }
    out
}

fn to_char(value: Option<u32>) -> char {
    value.and_then(char::from_u32).unwrap_or('\u{FFFD}')
}

fn scan_hex_escape(chars: &mut Peekable<Chars<'_>>, len: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..len {
        let digit = chars.peek()?.to_digit(16)?;
        value = value * 16 + digit;
        chars.next();
    }
    Some(value)
}

fn scan_unicode_escape_braces(chars: &mut Peekable<Chars<'_>>) -> Option<u32> {
    chars.next(); // Skip {
    let mut value = 0u32;
    while let Some(&c) = chars.peek() {
        if c == '}' {
            chars.next();
            return Some(value);
        }
        value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
        chars.next();
    }
    None
}

/// After `\u`: either `{H…}` or four hex digits, possibly the high half of
/// an escaped surrogate pair.
fn scan_unicode_escape(chars: &mut Peekable<Chars<'_>>) -> char {
    if chars.peek() == Some(&'{') {
        return to_char(scan_unicode_escape_braces(chars));
    }
    let Some(high) = scan_hex_escape(chars, 4) else {
        return '\u{FFFD}';
    };
    if !(0xD800..0xDC00).contains(&high) {
        return to_char(Some(high));
    }

    let mut lookahead = chars.clone();
    if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
        if let Some(low) = scan_hex_escape(&mut lookahead, 4) {
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                return to_char(Some(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)));
            }
        }
    }
    '\u{FFFD}'
}
