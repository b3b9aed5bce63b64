//! End-to-end scans of realistic module sources.

use modscan_lexer::{parse, parse_utf16, scan, Arena, ImportKind, LexError, Module, Span};

fn text(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}

fn specifiers(source: &str, module: &Module) -> Vec<String> {
    module
        .imports
        .iter()
        .filter_map(|i| i.decode_specifier(source.as_bytes()))
        .collect()
}

fn error_offset(source: &str) -> Option<u32> {
    parse(source).err().map(|e| e.offset)
}

// ============================================================================
// Facade and module syntax
// ============================================================================

#[test]
fn test_facade_module() {
    let source = r#"
// Barrel file
import './polyfills.js';
export { default as Button } from "./button.js";
export * from './icons.js';
/* legacy */ export { Link } from './link.js'
"#;
    let module = parse(source).unwrap();
    assert!(module.facade);
    assert!(module.has_module_syntax);
    assert_eq!(
        specifiers(source, &module),
        ["./polyfills.js", "./button.js", "./icons.js", "./link.js"]
    );
    assert_eq!(module.exports.len(), 2);
}

#[test]
fn test_comments_only() {
    let module = parse("// import 'x'\n/* export { a } */\n").unwrap();
    assert!(module.facade);
    assert!(!module.has_module_syntax);
    assert!(module.imports.is_empty());
    assert!(module.exports.is_empty());
}

#[test]
fn test_side_effect_leaves_facade() {
    let module = parse("import './a.js';\nconsole.log('side effect');\nexport { b } from './b.js';").unwrap();
    assert!(!module.facade);
    assert!(module.has_module_syntax);
    assert_eq!(module.imports.len(), 2);
}

#[test]
fn test_short_statements_leave_facade() {
    for source in ["i;", "e;", "ie;\nexport { a };", "ei();"] {
        let module = parse(source).unwrap();
        assert!(!module.facade, "{source:?} should not be a facade");
    }
    let module = parse("ie;\nexport { a };").unwrap();
    assert_eq!(module.exports.len(), 1);
}

#[test]
fn test_keyword_lookalikes_leave_facade() {
    assert!(!parse("importFoo();").unwrap().facade);
    assert!(!parse("exports.a = 1;").unwrap().facade);
    assert!(!parse("import.foo;").unwrap().facade);
    assert!(parse("import.meta;\nexport { a };").unwrap().facade);
}

#[test]
fn test_hidden_keywords() {
    let source = r#"
const s = "import 'x'";
const t = `export ${"{ a }"}`;
const r = /import 'x'/g;
// export default 1
"#;
    let module = parse(source).unwrap();
    assert!(module.imports.is_empty());
    assert!(module.exports.is_empty());
    assert!(!module.has_module_syntax);
}

// ============================================================================
// Imports
// ============================================================================

#[test]
fn test_static_specifier_bounds() {
    let source = "import x from \"y\";\nimport \"z\";";
    let module = parse(source).unwrap();
    let spans: Vec<_> = module
        .imports
        .iter()
        .map(|i| text(source, i.specifier().unwrap()))
        .collect();
    assert_eq!(spans, ["y", "z"]);
    assert_eq!(
        text(source, module.imports[1].statement().unwrap()),
        "import \"z\""
    );
}

#[test]
fn test_dynamic_safe_and_unsafe() {
    let source = "const a = import('./a.js');\nconst b = import(name);";
    let module = parse(source).unwrap();
    let [a, b] = module.imports.as_slice() else {
        panic!("expected two imports");
    };

    assert!(a.safe);
    assert_eq!(text(source, a.specifier().unwrap()), "'./a.js'");
    assert_eq!(text(source, a.statement().unwrap()), "import('./a.js')");

    assert!(!b.safe);
    assert_eq!(b.decode_specifier(source.as_bytes()), None);
    assert_eq!(text(source, b.statement().unwrap()), "import(name)");
    assert!(matches!(b.kind, ImportKind::Dynamic { .. }));
}

#[test]
fn test_dynamic_inside_template_interpolation() {
    let source = "const html = `<div>${await import('./view.js')}</div>`;";
    let module = parse(source).unwrap();
    assert_eq!(specifiers(source, &module), ["./view.js"]);
}

#[test]
fn test_escaped_specifier_is_decoded() {
    let source = r"import '\x2e/a.js';";
    let module = parse(source).unwrap();
    assert_eq!(specifiers(source, &module), ["./a.js"]);
}

#[test]
fn test_import_meta() {
    let source = "const here = new URL('.', import.meta.url);";
    let module = parse(source).unwrap();
    assert_eq!(module.imports.len(), 1);
    assert_eq!(module.imports[0].kind, ImportKind::Meta);
    assert!(module.has_module_syntax);
}

// ============================================================================
// Exports
// ============================================================================

#[test]
fn test_export_as_bounds() {
    let source = "export { a as b };";
    let module = parse(source).unwrap();
    let export = module.exports[0];
    assert_eq!(text(source, export.name), "b");
    assert_eq!(text(source, export.local.unwrap()), "a");

    let source = "export { a as b } from \"m\";";
    let module = parse(source).unwrap();
    let export = module.exports[0];
    assert_eq!(text(source, export.name), "b");
    assert_eq!(export.local, None);
}

#[test]
fn test_mixed_module() {
    let source = r#"import { h } from 'preact';
import * as hooks from 'preact/hooks';

const cache = new Map();

export function render(node) {
    return h('div', null, node);
}

export const VERSION = '1.0.0', BUILD = 42;
export default class App {}
export { cache as store };
"#;
    let module = parse(source).unwrap();
    assert!(!module.facade);
    assert_eq!(specifiers(source, &module), ["preact", "preact/hooks"]);

    let names: Vec<_> = module
        .exports
        .iter()
        .map(|e| e.decode_name(source.as_bytes()).unwrap())
        .collect();
    assert_eq!(names, ["render", "VERSION", "default", "store"]);
}

// ============================================================================
// Regex / division
// ============================================================================

// Each source scans cleanly only if every `/` is classified as expected: a
// misread regex runs into a line break, a misread division into a quote.

#[test]
fn test_division() {
    assert_eq!(error_offset("a / b\n/ c"), None);
}

#[test]
fn test_regex_after_if() {
    assert_eq!(error_offset("if (x) /'/.test(y)"), None);
}

#[test]
fn test_function_body_then_division() {
    assert_eq!(error_offset("x = function () {} / 1\n/ 2"), None);
}

#[test]
fn test_export_default_regex() {
    let module = parse("export default /'/").unwrap();
    assert_eq!(module.exports.len(), 1);
}

#[test]
fn test_break_label_regex() {
    assert_eq!(error_offset("break label\n/'/.test(x)"), None);
}

#[test]
fn test_regex_after_arrow_body() {
    assert_eq!(error_offset("const f = () => {}\n/'/.test(s)"), None);
}

#[test]
fn test_division_after_call() {
    assert_eq!(error_offset("total(items) / count(items) / 2\n/ 3"), None);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_template() {
    let source = "`abc${1";
    assert_eq!(error_offset(source), Some(source.len() as u32));
}

#[test]
fn test_unterminated_string() {
    assert_eq!(error_offset("const s = 'abc\n';"), Some(14));
}

#[test]
fn test_trailing_escape_reports_buffer_end() {
    assert_eq!(error_offset("'abc\\"), Some(5));
    assert_eq!(error_offset("`abc\\"), Some(5));
    assert_eq!(error_offset("x = /ab\\"), Some(8));
    assert_eq!(error_offset("x = /[a\\"), Some(8));
}

#[test]
fn test_export_braces_need_closing_brace() {
    assert_eq!(error_offset("export { a: b }"), Some(9));
    assert_eq!(error_offset("export { a"), Some(10));
}

#[test]
fn test_unmatched_closer() {
    assert_eq!(error_offset("f())"), Some(3));
    assert_eq!(error_offset("}"), Some(0));
}

#[test]
fn test_unclosed_brace() {
    assert_eq!(error_offset("function f() {"), Some(14));
}

#[test]
fn test_nesting_limit() {
    let source = "(".repeat(modscan_lexer::MAX_NESTING_DEPTH + 1);
    assert_eq!(
        parse(&source).unwrap_err(),
        LexError {
            offset: modscan_lexer::MAX_NESTING_DEPTH as u32
        }
    );
}

#[test]
fn test_dynamic_import_limit() {
    let source = "import(".repeat(modscan_lexer::MAX_DYNAMIC_IMPORT_DEPTH + 1);
    assert!(parse(&source).is_err());
}

#[test]
fn test_partial_records_survive_error() {
    let arena = Arena::new();
    let source = "import 'a';\nexport { b };\nconst c = (";
    let result = scan(&arena, source.as_bytes());
    assert!(!result.is_ok());
    assert_eq!(result.imports.len(), 1);
    assert_eq!(result.exports.len(), 1);
}

// ============================================================================
// Stability
// ============================================================================

#[test]
fn test_scan_is_idempotent() {
    let source = "import a from 'a';\nexport const b = import('b'), c = /re/g;\nexport { a };";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
}

#[test]
fn test_utf8_and_utf16_agree_on_ascii() {
    let source = "import { x } from './x.js';\nexport default x / 2;\nimport('./y.js');";
    let units: Vec<u16> = source.encode_utf16().collect();
    assert_eq!(parse(source).unwrap(), parse_utf16(&units).unwrap());
}
