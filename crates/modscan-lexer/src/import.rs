//! `import` statements, calls and `import.meta`.

use crate::error::LexError;
use crate::lexer::{offset, Lexer};
use crate::record::{Import, ImportKind};
use crate::stack::OpenTokenKind;
use crate::unit::{is_quote, CodeUnit};

impl<U: CodeUnit> Lexer<'_, '_, U> {
    /// Entered with `pos` on the `i` of a keyword-position `import`.
    pub(crate) fn try_parse_import(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.pos += 6;
        let ch = self.comment_whitespace(true);

        match ch {
            b'(' => self.dynamic_import(start),
            b'.' => {
                self.import_meta(start);
                Ok(())
            }
            b'{' => self.named_import(start),
            b'\'' | b'"' | b'*' => self.static_import(start),
            // `importFoo`, or `import` at end of input
            _ if self.pos == start + 6 => {
                self.pos -= 1;
                Ok(())
            }
            // `import x from "y"`
            _ => self.static_import(start),
        }
    }

    fn dynamic_import(&mut self, start: usize) -> Result<(), LexError> {
        let paren = self.pos;

        // `x. import(…)` is a method call
        if let Some(last) = self.last_token {
            if self.at(last) == b'.' && !self.is_spread(last) {
                return self.stack.push(OpenTokenKind::AnyParen, self.last_token, paren);
            }
        }
        self.stack
            .push(OpenTokenKind::ImportParen, Some(paren), paren)?;

        self.pos += 1;
        let ch = self.comment_whitespace(true);
        let index = self.add_import(Import {
            statement_start: offset(start),
            statement_end: None,
            specifier_start: offset(self.pos),
            specifier_end: None,
            attributes: None,
            kind: ImportKind::Dynamic {
                paren: offset(paren),
            },
            safe: false,
        });
        self.push_dynamic_import(index)?;

        if !is_quote(ch) {
            // Left open until the closing paren.
            self.pos -= 1;
            return Ok(());
        }
        self.string_literal(ch)?;
        self.pos += 1;
        let end = self.pos;

        match self.comment_whitespace(true) {
            b',' => {
                self.pos += 1;
                self.comment_whitespace(true);
                let import = &mut self.imports[index];
                import.specifier_end = Some(offset(end));
                import.attributes = Some(offset(self.pos));
                import.safe = true;
                self.pos -= 1;
            }
            b')' => {
                self.stack.pop();
                self.dynamic_imports.pop();
                let import = &mut self.imports[index];
                import.specifier_end = Some(offset(end));
                import.statement_end = Some(offset(self.pos + 1));
                import.safe = true;
            }
            // `import('a' + b)`: an expression, resolved at the paren
            _ => self.pos -= 1,
        }
        Ok(())
    }

    fn import_meta(&mut self, start: usize) {
        self.pos += 1;
        let ch = self.comment_whitespace(true);
        let property_access = self
            .last_token
            .is_some_and(|last| self.at(last) == b'.' && !self.is_spread(last));

        if ch == b'm' && self.at_word(b"meta") && !property_access {
            let end = offset(self.pos + 4);
            self.add_import(Import {
                statement_start: offset(start),
                statement_end: Some(end),
                specifier_start: offset(start),
                specifier_end: Some(end),
                attributes: None,
                kind: ImportKind::Meta,
                safe: false,
            });
            self.pos += 3;
        } else {
            self.pos -= 1;
        }
    }

    /// `import "x"`, `import * as ns from "x"`, `import d, { a } from "x"`.
    fn static_import(&mut self, start: usize) -> Result<(), LexError> {
        // Only at the top level.
        if !self.stack.is_empty() {
            self.pos -= 1;
            return Ok(());
        }
        while self.pos < self.source.len() {
            let ch = self.current();
            if is_quote(ch) {
                return self.read_import_string(start, ch);
            }
            self.pos += 1;
        }
        Err(LexError::at(self.pos))
    }

    /// `import { a, b as c } from "x"`.
    fn named_import(&mut self, start: usize) -> Result<(), LexError> {
        if !self.stack.is_empty() {
            self.pos -= 1;
            return Ok(());
        }
        while self.pos < self.source.len() {
            let ch = self.comment_whitespace(true);
            if is_quote(ch) {
                self.string_literal(ch)?;
            } else if ch == b'}' {
                self.pos += 1;
                break;
            }
            self.pos += 1;
        }

        self.comment_whitespace(true);
        if !self.at_word(b"from") {
            return Err(LexError::at(self.pos));
        }
        self.pos += 4;
        let ch = self.comment_whitespace(true);
        if !is_quote(ch) {
            return Err(LexError::at(self.pos));
        }
        self.read_import_string(start, ch)
    }

    /// Read the quoted specifier the cursor sits on and an optional
    /// `assert { … }` / `with { … }` clause, recording a static import.
    pub(crate) fn read_import_string(
        &mut self,
        statement_start: usize,
        quote: u8,
    ) -> Result<(), LexError> {
        if !is_quote(quote) {
            return Err(LexError::at(self.pos));
        }
        let specifier_start = self.pos + 1;
        self.string_literal(quote)?;
        let index = self.add_import(Import {
            statement_start: offset(statement_start),
            statement_end: Some(offset(self.pos + 1)),
            specifier_start: offset(specifier_start),
            specifier_end: Some(offset(self.pos)),
            attributes: None,
            kind: ImportKind::Static,
            safe: true,
        });

        self.pos += 1;
        let ch = self.comment_whitespace(false);
        let keyword_len = if ch == b'a' && self.matches_at(self.pos, b"assert") {
            6
        } else if ch == b'w' && self.matches_at(self.pos, b"with") {
            4
        } else {
            self.pos -= 1;
            return Ok(());
        };

        let clause = self.pos;
        self.pos += keyword_len;
        match self.read_attributes()? {
            Some(open) => {
                let import = &mut self.imports[index];
                import.attributes = Some(offset(open));
                import.statement_end = Some(offset(self.pos + 1));
            }
            // Not an attributes clause: rescan from the keyword.
            None => self.pos = clause - 1,
        }
        Ok(())
    }

    /// `{ key: "value", "key": 'value' }`. Returns the offset of the `{`
    /// with `pos` on the `}`, or `None` when the clause has another shape.
    fn read_attributes(&mut self) -> Result<Option<usize>, LexError> {
        if self.comment_whitespace(true) != b'{' {
            return Ok(None);
        }
        let open = self.pos;
        loop {
            self.pos += 1;
            let mut ch = self.comment_whitespace(true);
            if ch == b'}' {
                return Ok(Some(open));
            }

            let key = self.pos;
            if is_quote(ch) {
                self.string_literal(ch)?;
                self.pos += 1;
            } else {
                self.read_to_ws_or_punctuator(ch);
                if self.pos == key {
                    return Ok(None);
                }
            }
            ch = self.comment_whitespace(true);
            if ch != b':' {
                return Ok(None);
            }

            self.pos += 1;
            ch = self.comment_whitespace(true);
            if !is_quote(ch) {
                return Ok(None);
            }
            self.string_literal(ch)?;
            self.pos += 1;

            match self.comment_whitespace(true) {
                b',' => {}
                b'}' => return Ok(Some(open)),
                _ => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Arena;
    use crate::lexer::Lexer;
    use crate::record::{Import, ImportKind};
    use crate::span::Span;

    fn imports(source: &str) -> Vec<Import> {
        let arena = Arena::new();
        let result = Lexer::new(&arena, source.as_bytes()).scan();
        assert!(result.error.is_none(), "{source}: {:?}", result.error);
        result.imports.iter().copied().collect()
    }

    fn specifier<'s>(source: &'s str, import: &Import) -> &'s str {
        let span = import.specifier().unwrap();
        &source[span.start as usize..span.end as usize]
    }

    #[test]
    fn test_static_forms() {
        let source = r#"import a from "a";
import * as b from 'b';
import c, { d } from "c";
import "side-effect";
import { e as f, "g h" as i } from "e";"#;
        let found = imports(source);
        let specs: Vec<_> = found.iter().map(|i| specifier(source, i)).collect();
        assert_eq!(specs, ["a", "b", "c", "side-effect", "e"]);
        assert!(found
            .iter()
            .all(|i| i.kind == ImportKind::Static && i.safe && i.attributes.is_none()));
    }

    #[test]
    fn test_static_statement_span() {
        let source = "  import x from './x.js';";
        let import = imports(source)[0];
        assert_eq!(import.statement(), Some(Span::new(2, 24)));
        assert_eq!(import.specifier(), Some(Span::new(17, 23)));
    }

    #[test]
    fn test_attributes_clause() {
        let source = r#"import j from "./data.json" with { type: "json" };"#;
        let import = imports(source)[0];
        assert_eq!(import.attributes, Some(33));
        assert_eq!(import.statement_end, Some(source.len() as u32 - 1));

        let source = r#"import j from './a.json' assert { 'type': 'json', };"#;
        let import = imports(source)[0];
        assert_eq!(import.attributes, Some(32));
    }

    #[test]
    fn test_malformed_attributes_are_ignored() {
        let source = "import j from './a' with { type: json }\n";
        let import = imports(source)[0];
        assert_eq!(import.attributes, None);
        assert_eq!(import.statement_end, Some(19));
    }

    #[test]
    fn test_dynamic_string() {
        let source = "const m = import('./m.js');";
        let import = imports(source)[0];
        assert!(import.safe);
        assert_eq!(import.kind, ImportKind::Dynamic { paren: 16 });
        assert_eq!(specifier(source, &import), "'./m.js'");
        assert_eq!(import.statement(), Some(Span::new(10, 26)));
    }

    #[test]
    fn test_dynamic_expression() {
        let source = "import(`./locale/${lang}.js`).then(f);";
        let import = imports(source)[0];
        assert!(!import.safe);
        assert_eq!(specifier(source, &import), "`./locale/${lang}.js`");
        assert_eq!(import.statement_end, Some(29));
    }

    #[test]
    fn test_dynamic_with_options() {
        let source = r#"import("./a.json", { with: { type: "json" } })"#;
        let import = imports(source)[0];
        assert!(import.safe);
        assert_eq!(specifier(source, &import), r#""./a.json""#);
        assert_eq!(import.attributes, Some(19));
        assert_eq!(import.statement_end, Some(source.len() as u32));
    }

    #[test]
    fn test_dynamic_imports_nest() {
        let source = "import(import('a') + b)";
        let found = imports(source);
        assert_eq!(found.len(), 2);
        assert_eq!(specifier(source, &found[0]), "import('a') + b");
        assert_eq!(specifier(source, &found[1]), "'a'");
    }

    #[test]
    fn test_meta() {
        let source = "const u = import.meta.url;";
        let import = imports(source)[0];
        assert_eq!(import.kind, ImportKind::Meta);
        assert_eq!(specifier(source, &import), "import.meta");
        assert!(imports("import.metadata").is_empty());
    }

    #[test]
    fn test_property_access_is_not_import() {
        assert!(imports("foo.import('x')").is_empty());
        assert!(imports("foo. import('x')").is_empty());
        assert!(imports("importFoo('x')").is_empty());
        assert_eq!(imports("f(...import('x'))").len(), 1);
    }

    #[test]
    fn test_method_named_import_is_withdrawn() {
        let source = "class A { import(a) { return a } }";
        assert!(imports(source).is_empty());
    }

    #[test]
    fn test_static_import_inside_block_is_ignored() {
        assert!(imports("{ import 'x' }").is_empty());
    }

    #[test]
    fn test_named_import_requires_from() {
        let arena = Arena::new();
        let result = Lexer::new(&arena, b"import { a } 'x';".as_slice()).scan();
        assert_eq!(result.error.map(|e| e.offset), Some(13));
    }
}
