//! Code units and character classification.
//!
//! The scanner only ever compares against ASCII characters (plus NBSP), so
//! every code unit is projected onto a single byte before classification.
//! All predicates here are pure functions of that byte.

/// Projection of a non-ASCII unit other than NBSP.
pub(crate) const NON_ASCII: u8 = 0x80;

/// No-break space, the only non-ASCII unit treated as whitespace.
pub(crate) const NBSP: u8 = 0xA0;

/// A unit of source text the lexer can scan.
///
/// Implemented for `u16` (UTF-16, as produced by JavaScript hosts) and `u8`
/// (UTF-8, for Rust callers holding a `&str`). Offsets reported by the lexer
/// are indices into the slice of units that was scanned.
pub trait CodeUnit: Copy {
    /// Project this unit onto the byte the scanner classifies.
    fn to_ascii(self) -> u8;

    /// Decode a run of units into a `String`, replacing invalid sequences.
    fn decode_lossy(units: &[Self]) -> String;
}

impl CodeUnit for u8 {
    #[inline]
    fn to_ascii(self) -> u8 {
        // UTF-8 continuation bytes may equal 0xA0, never classify them as NBSP.
        if self.is_ascii() {
            self
        } else {
            NON_ASCII
        }
    }

    fn decode_lossy(units: &[Self]) -> String {
        String::from_utf8_lossy(units).into_owned()
    }
}

impl CodeUnit for u16 {
    #[inline]
    fn to_ascii(self) -> u8 {
        match u8::try_from(self) {
            Ok(b) if b.is_ascii() || b == NBSP => b,
            _ => NON_ASCII,
        }
    }

    fn decode_lossy(units: &[Self]) -> String {
        String::from_utf16_lossy(units)
    }
}

/// Line terminators. Only `\r` and `\n`; U+2028/U+2029 are not supported.
#[inline]
pub(crate) fn is_br(c: u8) -> bool {
    c == b'\r' || c == b'\n'
}

#[inline]
pub(crate) fn is_ws_not_br(c: u8) -> bool {
    matches!(c, b'\t' | 0x0B | 0x0C | b' ' | NBSP)
}

#[inline]
pub(crate) fn is_br_or_ws(c: u8) -> bool {
    (c > 8 && c < 14) || c == b' ' || c == NBSP
}

/// Whitespace skipped by the driver loops without touching the last token.
#[inline]
pub(crate) fn is_scan_whitespace(c: u8) -> bool {
    c == b' ' || (c > 8 && c < 14)
}

/// The 23 punctuator characters: `!%&()*+,-./:;<=>?[]^{|}~`
#[inline]
pub(crate) fn is_punctuator(c: u8) -> bool {
    matches!(
        c,
        b'!' | b'%'
            | b'&'
            | b'('..=b'/'
            | b':'..=b'?'
            | b'['
            | b']'
            | b'^'
            | b'{'..=b'~'
    )
}

/// Punctuators after which an expression (and so a regex) may start.
///
/// The 20 characters `!%&(*+,-.:;<=>?[^{|~`.
#[inline]
pub(crate) fn is_expression_punctuator(c: u8) -> bool {
    matches!(
        c,
        b'!' | b'%'
            | b'&'
            | b'('
            | b'*'..=b'.'
            | b':'..=b'?'
            | b'['
            | b'^'
            | b'{'
            | b'|'
            | b'~'
    )
}

#[inline]
pub(crate) fn is_br_or_ws_or_punctuator_not_dot(c: u8) -> bool {
    is_br_or_ws(c) || (is_punctuator(c) && c != b'.')
}

#[inline]
pub(crate) fn is_quote(c: u8) -> bool {
    c == b'\'' || c == b'"'
}

#[inline]
pub(crate) fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c == NON_ASCII
}
