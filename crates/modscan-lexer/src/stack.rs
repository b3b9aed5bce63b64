//! Bracket and template nesting.

use crate::error::LexError;

/// Soft limit on open brackets/templates before a scan gives up.
pub const MAX_NESTING_DEPTH: usize = 1024;

/// Soft limit on dynamic imports awaiting their closing paren.
pub const MAX_DYNAMIC_IMPORT_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenTokenKind {
    /// `(`
    AnyParen,
    /// `{`
    AnyBrace,
    /// `{` opening a class body.
    ClassBrace,
    /// `{` opening a function body.
    FunctionBrace,
    /// `` ` ``
    Template,
    /// `${` inside a template.
    TemplateBrace,
    /// `(` of `import(…)`.
    ImportParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenToken {
    pub kind: OpenTokenKind,
    /// Last significant token before the opener, used to classify the
    /// construct once it closes.
    pub anchor: Option<usize>,
}

#[derive(Debug, Default)]
pub(crate) struct NestingStack {
    entries: Vec<OpenToken>,
    /// Most recently popped entry: what a `)` or `}` just closed.
    last_closed: Option<OpenToken>,
}

impl NestingStack {
    pub fn push(&mut self, kind: OpenTokenKind, anchor: Option<usize>, pos: usize) -> Result<(), LexError> {
        if self.entries.len() >= MAX_NESTING_DEPTH {
            return Err(LexError::at(pos));
        }
        self.entries.push(OpenToken { kind, anchor });
        Ok(())
    }

    pub fn pop(&mut self) -> Option<OpenToken> {
        let token = self.entries.pop()?;
        self.last_closed = Some(token);
        Some(token)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn last_closed(&self) -> Option<OpenToken> {
        self.last_closed
    }
}
