//! modscan-lexer: ES module syntax scanner
//!
//! Finds the `import`/`export` structure of a JavaScript (or TypeScript)
//! source without parsing it: a single forward pass with a bracket stack and
//! a backward-looking regex/division heuristic.
//!
//! # Design Principles
//!
//! 1. **Lexical, not grammatical**
//!    - Strings, templates, comments and regexes are skipped as opaque spans
//!    - `import`/`export` are recognized at keyword positions only
//!    - Invalid input gives garbage out, not necessarily an error
//!
//! 2. **Offsets, not strings**
//!    - Records hold code-unit offsets into the caller's buffer
//!    - Decoding specifiers and names is opt-in
//!
//! 3. **Caller-owned storage**
//!    - Records live in an [`Arena`] supplied per scan
//!    - No global state; scans of different buffers are independent
//!
//! 4. **Facade detection**
//!    - A module made only of imports, exports and comments is reported as a
//!      facade, safe to skip for side effects
//!
//! # Example
//!
//! ```
//! let module = modscan_lexer::parse("import { a } from './a.js';\nexport const b = a;").unwrap();
//!
//! assert_eq!(module.imports.len(), 1);
//! assert_eq!(module.exports.len(), 1);
//! assert!(!module.facade);
//! ```

mod arena;
mod division;
mod error;
mod export;
mod import;
mod lexer;
mod record;
mod skip;
mod span;
mod stack;
mod unescape;
mod unit;

// Re-exports
pub use arena::Arena;
pub use error::LexError;
pub use lexer::Lexer;
pub use record::{Export, Import, ImportKind, Module, ParseResult};
pub use span::{LineIndex, Location, Span};
pub use stack::{MAX_DYNAMIC_IMPORT_DEPTH, MAX_NESTING_DEPTH};
pub use unescape::unescape;
pub use unit::CodeUnit;

/// Scan `source`, allocating records in `arena`.
pub fn scan<'a, U: CodeUnit>(arena: &'a Arena, source: &[U]) -> ParseResult<'a> {
    Lexer::new(arena, source).scan()
}

/// Scan UTF-8 source into owned records. Offsets are byte offsets.
pub fn parse(source: &str) -> Result<Module, LexError> {
    let arena = Arena::for_source_len(source.len());
    scan(&arena, source.as_bytes()).into_module()
}

/// Scan UTF-16 source into owned records. Offsets are code-unit offsets.
pub fn parse_utf16(source: &[u16]) -> Result<Module, LexError> {
    let arena = Arena::for_source_len(source.len());
    scan(&arena, source).into_module()
}
