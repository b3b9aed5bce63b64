//! The scanning driver.
//!
//! A single forward pass over the buffer, split in two phases. The facade
//! phase accepts only `import`/`export` statements, comments and whitespace;
//! the first other token hands the same position to the main phase, which
//! tracks brackets, strings, templates, comments and regular expressions so
//! that `import`/`export` are only recognized where they are real keywords.
//!
//! The cursor convention throughout: `pos` rests on the last unit consumed by
//! a routine, and the driver loop steps past it.

use crate::arena::{self, Arena};
use crate::error::LexError;
use crate::record::{Export, Import, ImportKind, ParseResult};
use crate::span::Span;
use crate::stack::{NestingStack, OpenTokenKind, MAX_DYNAMIC_IMPORT_DEPTH};
use crate::unit::{
    is_br, is_br_or_ws, is_br_or_ws_or_punctuator_not_dot, is_identifier_char, is_punctuator,
    is_scan_whitespace, is_ws_not_br, CodeUnit,
};

/// The lexer state for one scan.
pub struct Lexer<'a, 's, U: CodeUnit> {
    /// Source units (never mutated).
    pub(crate) source: &'s [U],
    /// Current position.
    pub(crate) pos: usize,
    /// Position of the last significant token, skipping whitespace and
    /// comments. `None` before the first one.
    pub(crate) last_token: Option<usize>,
    pub(crate) last_slash_was_division: bool,
    pub(crate) next_brace_is_class: bool,
    pub(crate) stack: NestingStack,
    /// Indices into `imports` of dynamic imports awaiting their `)`.
    pub(crate) dynamic_imports: Vec<usize>,
    pub(crate) imports: arena::Vec<'a, Import>,
    pub(crate) exports: arena::Vec<'a, Export>,
    pub(crate) facade: bool,
    pub(crate) has_module_syntax: bool,
}

impl<'a, 's, U: CodeUnit> Lexer<'a, 's, U> {
    /// Create a lexer whose records will be allocated in `arena`.
    pub fn new(arena: &'a Arena, source: &'s [U]) -> Self {
        Self {
            source,
            pos: 0,
            last_token: None,
            last_slash_was_division: false,
            next_brace_is_class: false,
            stack: NestingStack::default(),
            dynamic_imports: Vec::new(),
            imports: arena.vec(),
            exports: arena.vec(),
            facade: true,
            has_module_syntax: false,
        }
    }

    /// Run the scan to completion or to the first structural error.
    pub fn scan(mut self) -> ParseResult<'a> {
        let error = self.run().err();
        ParseResult {
            imports: self.imports,
            exports: self.exports,
            facade: self.facade,
            has_module_syntax: self.has_module_syntax,
            error,
        }
    }

    fn run(&mut self) -> Result<(), LexError> {
        if u32::try_from(self.source.len()).is_err() {
            return Err(LexError { offset: u32::MAX });
        }

        self.scan_facade()?;
        self.scan_main()?;

        if !self.stack.is_empty() || !self.dynamic_imports.is_empty() {
            return Err(LexError::at(self.source.len()));
        }
        Ok(())
    }

    /// Module-only phase. Returns with `pos` on the unit the main phase
    /// should look at next.
    fn scan_facade(&mut self) -> Result<(), LexError> {
        while self.pos < self.source.len() {
            let ch = self.current();
            if is_scan_whitespace(ch) {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            match ch {
                b'e' if self.stack.is_empty() && self.at_keyword(b"export") => {
                    self.try_parse_export()?;
                    // `exports`, or `export` at end of input
                    if self.pos < start + 6 {
                        self.leave_facade(start);
                        return Ok(());
                    }
                    // export might have been a non-pure declaration
                    if !self.facade {
                        self.last_token = Some(self.pos);
                        self.pos += 1;
                        return Ok(());
                    }
                }
                b'i' if self.at_keyword(b"import") => {
                    let imports = self.imports.len();
                    self.try_parse_import()?;
                    // `importFoo`, `import.foo`: nothing recorded
                    if self.imports.len() == imports {
                        self.leave_facade(start);
                        return Ok(());
                    }
                }
                b';' => {}
                b'/' if self.peek() == b'/' => {
                    self.line_comment();
                    self.pos += 1;
                    continue;
                }
                b'/' if self.peek() == b'*' => {
                    self.block_comment(true);
                    self.pos += 1;
                    continue;
                }
                // Anything else is not a pure module.
                _ => {
                    self.leave_facade(start);
                    return Ok(());
                }
            }
            self.last_token = Some(self.pos);
            self.pos += 1;
        }
        Ok(())
    }

    /// Demote the facade and rewind so the main phase rescans from `start`.
    fn leave_facade(&mut self, start: usize) {
        self.facade = false;
        self.pos = start;
    }

    fn scan_main(&mut self) -> Result<(), LexError> {
        while self.pos < self.source.len() {
            let ch = self.current();
            if is_scan_whitespace(ch) {
                self.pos += 1;
                continue;
            }

            match ch {
                b'e' => {
                    if self.stack.is_empty() && self.at_keyword(b"export") {
                        self.try_parse_export()?;
                    }
                }
                b'i' => {
                    if self.at_keyword(b"import") {
                        self.try_parse_import()?;
                    }
                }
                b'c' => {
                    if self.at_keyword(b"class") && is_br_or_ws(self.at(self.pos + 5)) {
                        self.next_brace_is_class = true;
                    }
                }
                b'(' => self.stack.push(OpenTokenKind::AnyParen, self.last_token, self.pos)?,
                b')' => self.close_paren()?,
                b'{' => self.open_brace()?,
                b'}' => self.close_brace()?,
                b'\'' | b'"' => self.string_literal(ch)?,
                b'/' => match self.peek() {
                    b'/' => {
                        self.line_comment();
                        self.pos += 1;
                        continue;
                    }
                    b'*' => {
                        self.block_comment(true);
                        self.pos += 1;
                        continue;
                    }
                    _ => self.slash()?,
                },
                b'`' => {
                    self.stack.push(OpenTokenKind::Template, self.last_token, self.pos)?;
                    self.template_string()?;
                }
                _ => {}
            }
            self.last_token = Some(self.pos);
            self.pos += 1;
        }
        Ok(())
    }

    pub(crate) fn close_paren(&mut self) -> Result<(), LexError> {
        let token = self.stack.pop().ok_or_else(|| LexError::at(self.pos))?;
        if token.kind == OpenTokenKind::ImportParen {
            if let Some(index) = self.dynamic_imports.pop() {
                let end = self.last_token.map_or(self.pos, |p| p + 1);
                let import = &mut self.imports[index];
                if import.specifier_end.is_none() {
                    import.specifier_end = Some(offset(end));
                }
                import.statement_end = Some(offset(self.pos + 1));
            }
        }
        Ok(())
    }

    pub(crate) fn open_brace(&mut self) -> Result<(), LexError> {
        // `import (…) {` is a method named `import`, not a dynamic import.
        // Assuming valid source this settles the block/object ambiguity
        // without a parser.
        if let Some(last) = self.last_token.filter(|&p| self.at(p) == b')') {
            let is_method = self.imports.last().is_some_and(|import| {
                import.is_dynamic()
                    && import.statement_end.is_some()
                    && import.specifier_end == Some(offset(last))
            });
            if is_method {
                self.imports.pop();
            }
        }

        let kind = if self.next_brace_is_class {
            OpenTokenKind::ClassBrace
        } else if self.closes_function_parameters() {
            OpenTokenKind::FunctionBrace
        } else {
            OpenTokenKind::AnyBrace
        };
        self.next_brace_is_class = false;
        self.stack.push(kind, self.last_token, self.pos)
    }

    pub(crate) fn close_brace(&mut self) -> Result<(), LexError> {
        let token = self.stack.pop().ok_or_else(|| LexError::at(self.pos))?;
        if token.kind == OpenTokenKind::TemplateBrace {
            self.template_string()?;
        }
        Ok(())
    }

    // === Records ===

    pub(crate) fn add_import(&mut self, import: Import) -> usize {
        // Dynamic imports are legal in scripts too.
        if matches!(import.kind, ImportKind::Static | ImportKind::Meta) {
            self.has_module_syntax = true;
        }
        self.imports.push(import);
        self.imports.len() - 1
    }

    pub(crate) fn add_export(&mut self, name: Span, local: Option<Span>) {
        self.exports.push(Export { name, local });
        self.has_module_syntax = true;
    }

    pub(crate) fn push_dynamic_import(&mut self, index: usize) -> Result<(), LexError> {
        if self.dynamic_imports.len() >= MAX_DYNAMIC_IMPORT_DEPTH {
            return Err(LexError::at(self.pos));
        }
        self.dynamic_imports.push(index);
        Ok(())
    }

    // === Cursor ===

    /// The unit at `i`, or `0` past the end of the buffer.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> u8 {
        self.source.get(i).map_or(0, |u| u.to_ascii())
    }

    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.at(self.pos)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.at(self.pos + 1)
    }

    /// Step forward; false once the cursor has left the buffer.
    #[inline]
    pub(crate) fn advance(&mut self) -> bool {
        self.pos += 1;
        self.pos < self.source.len()
    }

    pub(crate) fn matches_at(&self, i: usize, text: &[u8]) -> bool {
        text.iter()
            .enumerate()
            .all(|(k, &b)| self.at(i + k) == b)
    }

    /// `...` ends at `i`.
    pub(crate) fn is_spread(&self, i: usize) -> bool {
        i >= 2 && self.at(i) == b'.' && self.at(i - 1) == b'.' && self.at(i - 2) == b'.'
    }

    /// A keyword may start right after `i`.
    pub(crate) fn is_keyword_boundary(&self, i: usize) -> bool {
        let c = self.at(i);
        is_br_or_ws(c) || (is_punctuator(c) && (c != b'.' || self.is_spread(i)))
    }

    /// The cursor sits on the first unit of a word, not a property access.
    pub(crate) fn keyword_start(&self) -> bool {
        self.pos == 0 || self.is_keyword_boundary(self.pos - 1)
    }

    pub(crate) fn at_keyword(&self, keyword: &[u8]) -> bool {
        self.keyword_start() && self.matches_at(self.pos, keyword)
    }

    /// `word` starts at the cursor and is not the prefix of a longer
    /// identifier.
    pub(crate) fn at_word(&self, word: &[u8]) -> bool {
        self.matches_at(self.pos, word) && !is_identifier_char(self.at(self.pos + word.len()))
    }

    /// `keyword` ends exactly at `pos` and starts at a keyword boundary.
    pub(crate) fn read_preceding_keyword(&self, pos: usize, keyword: &[u8]) -> bool {
        let Some(start) = (pos + 1).checked_sub(keyword.len()) else {
            return false;
        };
        self.matches_at(start, keyword) && (start == 0 || self.is_keyword_boundary(start - 1))
    }

    /// Skip whitespace and comments, returning the unit the cursor stops on
    /// (`0` at end of input). With `br` false, line terminators are not
    /// crossed.
    pub(crate) fn comment_whitespace(&mut self, br: bool) -> u8 {
        loop {
            let ch = self.current();
            if ch == b'/' {
                match self.peek() {
                    b'/' => self.line_comment(),
                    b'*' => {
                        self.block_comment(br);
                        // Stopped on a line terminator inside the comment.
                        if !br && is_br(self.current()) {
                            return self.current();
                        }
                    }
                    _ => return ch,
                }
            } else if (br && !is_br_or_ws(ch)) || (!br && !is_ws_not_br(ch)) {
                return ch;
            }
            self.pos += 1;
        }
    }

    /// Advance to the first whitespace or punctuator, returning it.
    pub(crate) fn read_to_ws_or_punctuator(&mut self, mut ch: u8) -> u8 {
        while ch != 0 && !is_br_or_ws(ch) && !is_punctuator(ch) {
            self.pos += 1;
            ch = self.current();
        }
        ch
    }

    pub(crate) fn is_br_or_ws_or_punctuator_not_dot_at(&self, i: usize) -> bool {
        is_br_or_ws_or_punctuator_not_dot(self.at(i))
    }
}

/// Buffer offsets fit `u32`; `run` rejects larger sources up front.
#[inline]
pub(crate) fn offset(pos: usize) -> u32 {
    pos as u32
}
