//! Regex / division disambiguation.
//!
//! A `/` that does not open a comment is either a division operator or the
//! start of a regular expression literal. Without a grammar the choice is
//! made by looking backwards: at the last significant token, and for `)` and
//! `}` at the token before the matching opener.

use crate::error::LexError;
use crate::lexer::Lexer;
use crate::stack::OpenTokenKind;
use crate::unit::{is_expression_punctuator, is_identifier_char, is_ws_not_br, CodeUnit};

/// Keywords after which an expression, never an operand, follows.
const EXPRESSION_KEYWORDS: &[&[u8]] = &[
    b"await",
    b"break",
    b"case",
    b"continue",
    b"debugger",
    b"delete",
    b"do",
    b"else",
    b"in",
    b"instanceof",
    b"new",
    b"return",
    b"throw",
    b"typeof",
    b"void",
    b"yield",
];

/// Keywords whose parenthesized condition may be followed by a statement.
const PAREN_KEYWORDS: &[&[u8]] = &[b"while", b"for", b"if"];

/// Keywords whose block is a statement block, not an expression.
const BLOCK_KEYWORDS: &[&[u8]] = &[b"catch", b"finally", b"else"];

impl<U: CodeUnit> Lexer<'_, '_, U> {
    /// Handle a `/` that is not a comment opener.
    pub(crate) fn slash(&mut self) -> Result<(), LexError> {
        if self.is_regex_start() || self.follows_break_or_continue() {
            self.regular_expression()?;
            self.last_slash_was_division = false;
        } else {
            self.last_slash_was_division = true;
        }
        Ok(())
    }

    fn is_regex_start(&self) -> bool {
        let Some(last) = self.last_token else {
            return true;
        };
        let token = self.at(last);
        let before = last.checked_sub(1).map_or(0, |p| self.at(p));

        if is_expression_punctuator(token)
            && !(token == b'.' && before.is_ascii_digit())
            && !(token == b'+' && before == b'+')
            && !(token == b'-' && before == b'-')
        {
            return true;
        }

        let closed = self.stack.last_closed();
        if token == b')' && closed.is_some_and(|t| self.is_paren_keyword(t.anchor)) {
            return true;
        }
        if token == b'}'
            && closed.is_some_and(|t| match t.kind {
                OpenTokenKind::ClassBrace => true,
                OpenTokenKind::FunctionBrace => false,
                _ => self.is_expression_terminator(t.anchor),
            })
        {
            return true;
        }
        if self.is_expression_keyword(last) {
            return true;
        }
        if token == b'/' && self.last_slash_was_division {
            return true;
        }

        // export default /some-regexp/
        self.exports.last().is_some_and(|export| {
            export.name.start as usize <= last && last <= export.name.end as usize
        })
    }

    /// `break label` / `continue label` end the statement, so what follows
    /// cannot be an operand.
    fn follows_break_or_continue(&self) -> bool {
        let Some(mut p) = self.last_token else {
            return false;
        };
        while p > 0 {
            p -= 1;
            if self.is_br_or_ws_or_punctuator_not_dot_at(p) {
                break;
            }
        }
        if !is_ws_not_br(self.at(p)) {
            return false;
        }
        while p > 0 {
            p -= 1;
            if !is_ws_not_br(self.at(p)) {
                break;
            }
        }
        self.read_preceding_keyword(p, b"break") || self.read_preceding_keyword(p, b"continue")
    }

    /// The last token is a `)` closing `function (…)`, `function name(…)`
    /// or `function* name(…)`, so a `{` here opens a function body.
    pub(crate) fn closes_function_parameters(&self) -> bool {
        let Some(last) = self.last_token.filter(|&p| self.at(p) == b')') else {
            return false;
        };
        let Some(anchor) = self.stack.last_closed().and_then(|t| t.anchor) else {
            return false;
        };
        if anchor >= last {
            return false;
        }

        let mut p = anchor;
        while p > 0 && is_identifier_char(self.at(p)) && !self.read_preceding_keyword(p, b"function") {
            p -= 1;
        }
        while p > 0 && is_ws_not_br(self.at(p)) {
            p -= 1;
        }
        if self.at(p) == b'*' {
            p = p.saturating_sub(1);
            while p > 0 && is_ws_not_br(self.at(p)) {
                p -= 1;
            }
        }
        self.read_preceding_keyword(p, b"function")
    }

    fn is_expression_keyword(&self, pos: usize) -> bool {
        EXPRESSION_KEYWORDS
            .iter()
            .any(|keyword| self.read_preceding_keyword(pos, keyword))
    }

    fn is_paren_keyword(&self, anchor: Option<usize>) -> bool {
        anchor.is_some_and(|pos| {
            PAREN_KEYWORDS
                .iter()
                .any(|keyword| self.read_preceding_keyword(pos, keyword))
        })
    }

    /// `=> ; ) catch finally else` before a `{` make it a statement block.
    fn is_expression_terminator(&self, anchor: Option<usize>) -> bool {
        let Some(pos) = anchor else {
            return false;
        };
        match self.at(pos) {
            b'>' => pos > 0 && self.at(pos - 1) == b'=',
            b';' | b')' => true,
            _ => BLOCK_KEYWORDS
                .iter()
                .any(|keyword| self.read_preceding_keyword(pos, keyword)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Arena;
    use crate::lexer::Lexer;
    use crate::stack::OpenTokenKind;

    /// Count the `/` classified as division, driving only the bracket and
    /// slash handlers.
    fn divisions(source: &str) -> usize {
        let arena = Arena::new();
        let mut lx = Lexer::new(&arena, source.as_bytes());
        let mut count = 0;
        while lx.pos < source.len() {
            match lx.current() {
                b' ' | b'\n' => {
                    lx.pos += 1;
                    continue;
                }
                b'(' => lx
                    .stack
                    .push(OpenTokenKind::AnyParen, lx.last_token, lx.pos)
                    .unwrap(),
                b')' => lx.close_paren().unwrap(),
                b'{' => lx.open_brace().unwrap(),
                b'}' => lx.close_brace().unwrap(),
                b'/' => {
                    lx.slash().unwrap();
                    if lx.last_slash_was_division {
                        count += 1;
                    }
                }
                _ => {}
            }
            lx.last_token = Some(lx.pos);
            lx.pos += 1;
        }
        count
    }

    #[test]
    fn test_plain_division() {
        assert_eq!(divisions("a / b"), 1);
        assert_eq!(divisions("a / b / c"), 2);
    }

    #[test]
    fn test_regex_after_operator() {
        assert_eq!(divisions("x = /re/"), 0);
        assert_eq!(divisions("f(/re/, /re/)"), 0);
    }

    #[test]
    fn test_regex_after_paren_keyword() {
        assert_eq!(divisions("if (x) /re/"), 0);
        assert_eq!(divisions("while (x) /re/"), 0);
        assert_eq!(divisions("g(x) / 2"), 1);
    }

    #[test]
    fn test_brace_contexts() {
        assert_eq!(divisions("x = () => {} /re/"), 0);
        assert_eq!(divisions("try {} finally {} /re/"), 0);
        // A function body falls through to division.
        assert_eq!(divisions("x = function () {} /re/"), 2);
        assert_eq!(divisions("x = function* gen(a) {} / 2"), 1);
        assert_eq!(divisions("if (x) {} /re/"), 0);
    }

    #[test]
    fn test_expression_keywords() {
        assert_eq!(divisions("return /re/"), 0);
        assert_eq!(divisions("typeof /re/"), 0);
        assert_eq!(divisions("areturn / 2"), 1);
    }

    #[test]
    fn test_increment_is_operand() {
        assert_eq!(divisions("a++ / 2"), 1);
        assert_eq!(divisions("1. / 2"), 1);
    }

    #[test]
    fn test_start_of_input() {
        assert_eq!(divisions("/re/"), 0);
    }

    #[test]
    fn test_break_label() {
        assert_eq!(divisions("break label\n/re/"), 0);
        assert_eq!(divisions("x label / 2"), 1);
    }
}
