use thiserror::Error;

/// The single failure mode of a scan: structure the lexer cannot follow.
///
/// Raised for unmatched closers, unterminated strings, templates and regular
/// expressions, brackets or dynamic imports still open at end of input, an
/// `import { … }` without its `from` clause, and a malformed `export { … }`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unexpected structure at offset {offset}")]
pub struct LexError {
    /// Code-unit offset at which scanning stopped.
    pub offset: u32,
}

impl LexError {
    #[inline]
    pub(crate) fn at(pos: usize) -> Self {
        Self {
            offset: u32::try_from(pos).unwrap_or(u32::MAX),
        }
    }
}
