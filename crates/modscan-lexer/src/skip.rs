//! Atomic spans: comments, strings, templates and regular expressions.
//!
//! Each routine is entered with `pos` on the opening unit and leaves it on
//! the closing unit.

use crate::error::LexError;
use crate::lexer::Lexer;
use crate::stack::OpenTokenKind;
use crate::unit::{is_br, CodeUnit};

impl<U: CodeUnit> Lexer<'_, '_, U> {
    /// `//` up to (not past) the line terminator.
    pub(crate) fn line_comment(&mut self) {
        while self.advance() {
            if is_br(self.current()) {
                return;
            }
        }
    }

    /// `/* … */`. With `br` false, stops on the first line terminator
    /// without consuming the rest of the comment.
    pub(crate) fn block_comment(&mut self, br: bool) {
        self.pos += 1;
        while self.advance() {
            let ch = self.current();
            if !br && is_br(ch) {
                return;
            }
            if ch == b'*' && self.peek() == b'/' {
                self.pos += 1;
                return;
            }
        }
    }

    pub(crate) fn string_literal(&mut self, quote: u8) -> Result<(), LexError> {
        while self.advance() {
            let ch = self.current();
            if ch == quote {
                return Ok(());
            }
            if ch == b'\\' {
                self.pos += 1;
                if self.current() == b'\r' && self.peek() == b'\n' {
                    self.pos += 1;
                }
            } else if is_br(ch) {
                break;
            }
        }
        Err(self.unterminated())
    }

    /// Template body up to its closing backtick (popping the template) or up
    /// to a `${`, which pushes a template brace and returns to the driver.
    pub(crate) fn template_string(&mut self) -> Result<(), LexError> {
        while self.advance() {
            let ch = self.current();
            if ch == b'$' && self.peek() == b'{' {
                self.pos += 1;
                return self
                    .stack
                    .push(OpenTokenKind::TemplateBrace, Some(self.pos), self.pos);
            }
            if ch == b'`' {
                return match self.stack.pop() {
                    Some(token) if token.kind == OpenTokenKind::Template => Ok(()),
                    _ => Err(LexError::at(self.pos)),
                };
            }
            if ch == b'\\' {
                self.pos += 1;
            }
        }
        Err(self.unterminated())
    }

    pub(crate) fn regular_expression(&mut self) -> Result<(), LexError> {
        while self.advance() {
            match self.current() {
                b'/' => return Ok(()),
                b'[' => self.regex_character_class()?,
                b'\\' => self.pos += 1,
                b'\n' | b'\r' => break,
                _ => {}
            }
        }
        Err(self.unterminated())
    }

    /// Error for a literal cut off by a line terminator or the end of input.
    /// An escape on the last unit leaves `pos` past the end; report the end.
    fn unterminated(&self) -> LexError {
        LexError::at(self.pos.min(self.source.len()))
    }

    /// `[…]` inside a regex: `/` does not terminate it.
    fn regex_character_class(&mut self) -> Result<(), LexError> {
        while self.advance() {
            match self.current() {
                b']' => return Ok(()),
                b'\\' => self.pos += 1,
                b'\n' | b'\r' => break,
                _ => {}
            }
        }
        Err(self.unterminated())
    }
}
