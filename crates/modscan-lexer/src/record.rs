//! Import and export records produced by a scan.

use crate::arena;
use crate::error::LexError;
use crate::span::Span;
use crate::unescape::unescape;
use crate::unit::CodeUnit;

/// What kind of `import` occurrence a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `import … from "x"`, `import "x"`, or `export … from "x"`.
    Static,
    /// `import(expr)`. `paren` is the offset of the call's `(`.
    Dynamic { paren: u32 },
    /// `import.meta`.
    Meta,
}

/// One `import` occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Import {
    /// Offset of the `import` (or `export`) keyword.
    pub statement_start: u32,
    /// One past the end of the statement. `None` while a dynamic import is
    /// still open.
    pub statement_end: Option<u32>,
    /// Start of the specifier. For static imports this is the first unit
    /// inside the quotes; for dynamic imports the first unit of the argument.
    pub specifier_start: u32,
    /// End of the specifier (exclusive). `None` while a dynamic import's
    /// argument has not been delimited.
    pub specifier_end: Option<u32>,
    /// Offset of the `{` of an `assert`/`with` clause, or of the second
    /// argument of a dynamic import.
    pub attributes: Option<u32>,
    pub kind: ImportKind,
    /// The specifier is a plain string literal and can be read without
    /// evaluating anything.
    pub safe: bool,
}

impl Import {
    /// The specifier span, once delimited.
    ///
    /// Static: string contents without quotes. Dynamic: the argument
    /// expression (quotes included for a string argument). Meta: the
    /// `import.meta` text.
    pub fn specifier(&self) -> Option<Span> {
        self.specifier_end
            .map(|end| Span::new(self.specifier_start, end))
    }

    /// The full statement (or call) span, once terminated.
    pub fn statement(&self) -> Option<Span> {
        self.statement_end
            .map(|end| Span::new(self.statement_start, end))
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, ImportKind::Dynamic { .. })
    }

    pub fn is_meta(&self) -> bool {
        self.kind == ImportKind::Meta
    }

    /// Span of the string literal contents for safe imports.
    pub fn literal(&self) -> Option<Span> {
        if !self.safe {
            return None;
        }
        let span = self.specifier()?;
        match self.kind {
            ImportKind::Static => Some(span),
            ImportKind::Dynamic { .. } if span.len() >= 2 => {
                Some(Span::new(span.start + 1, span.end - 1))
            }
            _ => None,
        }
    }

    /// Decode the specifier string of a safe import, escapes resolved.
    pub fn decode_specifier<U: CodeUnit>(&self, source: &[U]) -> Option<String> {
        let raw = self.literal()?.slice(source)?;
        Some(unescape(&U::decode_lossy(raw)))
    }
}

/// One exported binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Export {
    /// The exported name: an identifier, or a string literal including its
    /// quotes (`export { a as "b c" }`).
    pub name: Span,
    /// The local binding, absent for re-exports, `export * as ns`, and
    /// anonymous default exports.
    pub local: Option<Span>,
}

impl Export {
    /// Decode the exported name. String names are unquoted and unescaped.
    pub fn decode_name<U: CodeUnit>(&self, source: &[U]) -> Option<String> {
        decode_name(self.name, source)
    }

    /// Decode the local binding name, if any.
    pub fn decode_local<U: CodeUnit>(&self, source: &[U]) -> Option<String> {
        decode_name(self.local?, source)
    }
}

fn decode_name<U: CodeUnit>(span: Span, source: &[U]) -> Option<String> {
    let raw = span.slice(source)?;
    let text = U::decode_lossy(raw);
    match text.as_bytes().first() {
        Some(b'\'' | b'"') if text.len() >= 2 => Some(unescape(&text[1..text.len() - 1])),
        _ => Some(text),
    }
}

/// Output of a scan, with record storage borrowed from the caller's arena.
pub struct ParseResult<'a> {
    /// Imports in source order.
    pub imports: arena::Vec<'a, Import>,
    /// Exports in source order.
    pub exports: arena::Vec<'a, Export>,
    /// The source holds nothing but import/export statements, comments and
    /// whitespace.
    pub facade: bool,
    /// At least one static import, `import.meta`, or export was seen.
    pub has_module_syntax: bool,
    /// Where scanning stopped, if it failed. Records before it stay valid.
    pub error: Option<LexError>,
}

impl ParseResult<'_> {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Copy the records out of the arena, failing if the scan failed.
    pub fn into_module(self) -> Result<Module, LexError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Module {
            imports: self.imports.iter().copied().collect(),
            exports: self.exports.iter().copied().collect(),
            facade: self.facade,
            has_module_syntax: self.has_module_syntax,
        })
    }
}

/// Owned scan output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    pub facade: bool,
    pub has_module_syntax: bool,
}
