//! `export` statements.
//!
//! Only names are extracted. Declaration bodies and initializers are left to
//! the driver, which is why every declaration form demotes the facade.

use crate::error::LexError;
use crate::lexer::{offset, Lexer};
use crate::span::Span;
use crate::unit::{is_punctuator, is_quote, is_ws_not_br, CodeUnit};

impl<U: CodeUnit> Lexer<'_, '_, U> {
    /// Entered with `pos` on the `e` of a top-level `export`.
    pub(crate) fn try_parse_export(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        let first_export = self.exports.len();
        self.pos += 6;
        let after_keyword = self.pos;
        let mut ch = self.comment_whitespace(true);

        // `exports`, `exported`, …
        if self.pos == after_keyword && !is_punctuator(ch) {
            self.pos -= 1;
            return Ok(());
        }

        match ch {
            b'{' => {
                self.export_braces()?;
                // `export {}` has no records but is still module syntax.
                self.has_module_syntax = true;
                self.pos += 1;
                ch = self.comment_whitespace(true);
            }
            b'*' => {
                self.pos += 1;
                self.comment_whitespace(true);
                self.read_export_as(self.pos, self.pos)?;
                ch = self.comment_whitespace(true);
            }
            _ => {
                self.facade = false;
                return self.export_declaration(ch);
            }
        }

        if ch == b'f' && self.at_word(b"from") {
            self.pos += 4;
            let quote = self.comment_whitespace(true);
            self.read_import_string(start, quote)?;
            // Re-exports have no local bindings.
            for export in &mut self.exports[first_export..] {
                export.local = None;
            }
        } else {
            self.pos -= 1;
        }
        Ok(())
    }

    /// `{ a, b as c, "d" as "e" }`, leaving `pos` on the `}`.
    fn export_braces(&mut self) -> Result<(), LexError> {
        self.pos += 1;
        let mut ch = self.comment_whitespace(true);
        loop {
            let name_start = self.pos;
            if is_quote(ch) {
                self.string_literal(ch)?;
                self.pos += 1;
            } else {
                self.read_to_ws_or_punctuator(ch);
            }
            let name_end = self.pos;
            self.comment_whitespace(true);
            ch = self.read_export_as(name_start, name_end)?;

            if ch == b',' {
                self.pos += 1;
                ch = self.comment_whitespace(true);
            }
            if ch == b'}' {
                return Ok(());
            }
            if self.pos == name_start || self.pos >= self.source.len() {
                return Err(LexError::at(self.pos));
            }
        }
    }

    /// Record the name just read, renamed by an optional `as <name>`.
    /// Returns the unit after the clause.
    fn read_export_as(&mut self, mut start: usize, mut end: usize) -> Result<u8, LexError> {
        let local = (start != end).then(|| Span::new(offset(start), offset(end)));
        let mut ch = self.current();

        if ch == b'a' && self.at_word(b"as") {
            self.pos += 2;
            ch = self.comment_whitespace(true);
            start = self.pos;
            if is_quote(ch) {
                self.string_literal(ch)?;
                self.pos += 1;
            } else {
                self.read_to_ws_or_punctuator(ch);
            }
            end = self.pos;
            ch = self.comment_whitespace(true);
        }

        if self.pos != start {
            self.add_export(Span::new(offset(start), offset(end)), local);
        }
        Ok(ch)
    }

    fn export_declaration(&mut self, ch: u8) -> Result<(), LexError> {
        match ch {
            b'd' if self.at_word(b"default") => {
                self.export_default();
                Ok(())
            }
            b'a' if self.at_word(b"async") => {
                self.pos += 5;
                if self.comment_whitespace(false) == b'f' && self.at_word(b"function") {
                    self.export_function();
                } else {
                    self.pos -= 1;
                }
                Ok(())
            }
            b'f' if self.at_word(b"function") => {
                self.export_function();
                Ok(())
            }
            b'c' if self.at_word(b"class") => {
                self.next_brace_is_class = true;
                self.pos += 5;
                let ch = self.comment_whitespace(true);
                self.export_name(ch);
                Ok(())
            }
            b'c' if self.at_word(b"const") => self.export_bindings(5),
            b'l' if self.at_word(b"let") => self.export_bindings(3),
            b'v' if self.at_word(b"var") => self.export_bindings(3),
            _ => {
                self.pos -= 1;
                Ok(())
            }
        }
    }

    /// `export default …`. Named function and class declarations bind a
    /// local name; anything else is an expression left to the driver.
    fn export_default(&mut self) {
        let start = self.pos;
        let name = Span::new(offset(start), offset(start + 7));
        self.pos += 7;
        let mut ch = self.comment_whitespace(true);
        let mut named = false;

        if ch == b'a' && self.at_word(b"async") && is_ws_not_br(self.at(self.pos + 5)) {
            self.pos += 5;
            ch = self.comment_whitespace(false);
        }
        if ch == b'f' && self.at_word(b"function") {
            self.pos += 8;
            ch = self.comment_whitespace(true);
            if ch == b'*' {
                self.pos += 1;
                ch = self.comment_whitespace(true);
            }
            named = ch != b'(';
        } else if ch == b'c' && self.at_word(b"class") {
            self.next_brace_is_class = true;
            self.pos += 5;
            ch = self.comment_whitespace(true);
            named = ch != b'{';
        }

        if named {
            let local_start = self.pos;
            self.read_to_ws_or_punctuator(ch);
            if self.pos > local_start {
                let local = Span::new(offset(local_start), offset(self.pos));
                self.add_export(name, Some(local));
                self.pos -= 1;
                return;
            }
        }

        self.add_export(name, None);
        // Leave the default expression to the driver, `default` being the
        // last token so that `export default /re/` reads as a regex.
        self.pos = start + 6;
    }

    /// `function name`, `function* name`, with `pos` on `function`.
    fn export_function(&mut self) {
        self.pos += 8;
        let mut ch = self.comment_whitespace(true);
        if ch == b'*' {
            self.pos += 1;
            ch = self.comment_whitespace(true);
        }
        self.export_name(ch);
    }

    /// Record the declared name the cursor sits on as both exported and
    /// local name.
    fn export_name(&mut self, ch: u8) {
        let name_start = self.pos;
        self.read_to_ws_or_punctuator(ch);
        if self.pos > name_start {
            let name = Span::new(offset(name_start), offset(self.pos));
            self.add_export(name, Some(name));
        }
        self.pos -= 1;
    }

    /// `var`/`let`/`const` bindings: `a, b` or one level of `{ a, b }` /
    /// `[a, ...b]`. Initializers are skipped along with every binding after
    /// them.
    fn export_bindings(&mut self, keyword_len: usize) -> Result<(), LexError> {
        let first_export = self.exports.len();
        self.pos += keyword_len;
        let mut ch = self.comment_whitespace(true);
        let mut name_start = self.pos;
        ch = self.read_to_ws_or_punctuator(ch);

        let mut destructuring = ch == b'{' || ch == b'[';
        let pattern_start = self.pos;
        if destructuring {
            self.pos += 1;
            ch = self.comment_whitespace(true);
            name_start = self.binding_name(ch);
        }

        while self.pos != name_start {
            let name = Span::new(offset(name_start), offset(self.pos));
            self.add_export(name, Some(name));

            ch = self.comment_whitespace(true);
            if destructuring && (ch == b'}' || ch == b']') {
                destructuring = false;
                break;
            }
            if ch != b',' {
                self.pos -= 1;
                break;
            }
            self.pos += 1;
            ch = self.comment_whitespace(true);
            // Nested patterns are not decomposed.
            if ch == b'{' || ch == b'[' {
                self.pos -= 1;
                break;
            }
            name_start = if destructuring {
                self.binding_name(ch)
            } else {
                let start = self.pos;
                self.read_to_ws_or_punctuator(ch);
                start
            };
        }

        // Stuck inside a pattern: forget its names and rescan it.
        if destructuring {
            self.exports.truncate(first_export);
            self.pos = pattern_start - 1;
        }
        Ok(())
    }

    /// Read an identifier inside a destructuring pattern, after an optional
    /// rest `...`, returning its start.
    fn binding_name(&mut self, ch: u8) -> usize {
        if ch == b'.' && self.matches_at(self.pos, b"...") {
            self.pos += 3;
        }
        let start = self.pos;
        self.read_to_ws_or_punctuator(self.current());
        start
    }
}
