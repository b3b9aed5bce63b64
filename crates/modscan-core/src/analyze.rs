//! Turning lexer records into module reports.
//!
//! `analyze_source` is pure; `analyze_file` and `analyze_paths` add file
//! reading, discovery and fan-out across the rayon pool.

use crate::config::Config;
use crate::error::Error;
use crate::report::{
    codes, kinds, ErrorOutput, ExportOutput, FileError, FileReport, ImportOutput, ModuleReport,
    ScanReport, REPORT_SCHEMA_VERSION,
};
use modscan_lexer::{scan, Arena, Export, Import, ImportKind, LineIndex, Span};
use modscan_util::discover::find_sources;
use modscan_util::fs::read_source;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scan UTF-8 source into a report. Scan failures are reported in
/// [`ModuleReport::error`] alongside the records found before them.
#[must_use]
pub fn analyze_source(source: &str) -> ModuleReport {
    let arena = Arena::for_source_len(source.len());
    let result = scan(&arena, source.as_bytes());
    let index = LineIndex::new(source);
    let bytes = source.as_bytes();

    ModuleReport {
        facade: result.facade,
        has_module_syntax: result.has_module_syntax,
        imports: result
            .imports
            .iter()
            .map(|import| import_output(import, bytes, &index))
            .collect(),
        exports: result
            .exports
            .iter()
            .map(|export| export_output(export, bytes, &index))
            .collect(),
        error: result.error.map(|err| {
            let at = index.location(err.offset);
            ErrorOutput {
                offset: err.offset,
                line: at.line,
                column: at.column,
            }
        }),
    }
}

fn import_output(import: &Import, source: &[u8], index: &LineIndex) -> ImportOutput {
    let kind = match import.kind {
        ImportKind::Static => kinds::STATIC,
        ImportKind::Dynamic { .. } => kinds::DYNAMIC,
        ImportKind::Meta => kinds::META,
    };
    ImportOutput {
        kind: kind.to_string(),
        specifier: import.decode_specifier(source),
        raw: import.specifier().and_then(|span| text(span, source)),
        safe: import.safe,
        start: import.specifier_start,
        end: import.specifier_end,
        statement_start: import.statement_start,
        statement_end: import.statement_end,
        attributes: import.attributes,
        line: index.location(import.statement_start).line,
    }
}

fn export_output(export: &Export, source: &[u8], index: &LineIndex) -> ExportOutput {
    ExportOutput {
        name: export.decode_name(source).unwrap_or_default(),
        local: export.decode_local(source),
        start: export.name.start,
        end: export.name.end,
        line: index.location(export.name.start).line,
    }
}

fn text(span: Span, source: &[u8]) -> Option<String> {
    span.slice(source)
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
}

/// Read and scan one file.
///
/// A scan failure is not an `Err`: it lands in [`FileReport::error`] with
/// code [`codes::LEX_FAILED`] and the partial module is kept.
pub fn analyze_file(path: &Path) -> Result<FileReport, Error> {
    let source = read_source(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if source.lossy {
        debug!(path = %path.display(), "replaced invalid UTF-8 before scanning");
    }

    let module = analyze_source(&source.text);
    debug!(
        path = %path.display(),
        imports = module.imports.len(),
        exports = module.exports.len(),
        facade = module.facade,
        "scanned module"
    );

    let error = module.error.map(|err| {
        let lex = Error::Lex {
            path: path.to_path_buf(),
            offset: err.offset,
            line: err.line,
            column: err.column,
        };
        warn!(error = %lex, "scan stopped early");
        FileError::new(codes::LEX_FAILED, lex.to_string())
    });

    Ok(FileReport {
        path: path.display().to_string(),
        hash: Some(source.hash),
        lossy: source.lossy,
        module: Some(module),
        error,
    })
}

/// Discover and scan every source file under `paths`.
///
/// Directories are walked with the config's extension and skip filters;
/// files are scanned whatever their extension. Unreadable files are
/// reported per file with [`codes::READ_FAILED`].
pub fn analyze_paths(paths: &[PathBuf], config: &Config) -> Result<ScanReport, Error> {
    if paths.is_empty() {
        return Err(Error::other("no input paths given"));
    }

    let options = config.discover_options();
    let mut files = Vec::new();
    for path in paths {
        let root = config.resolve(path);
        let found = find_sources(&root, &options).map_err(|e| Error::Walk {
            path: root.clone(),
            message: e.to_string(),
        })?;
        debug!(root = %root.display(), count = found.len(), "discovered sources");
        files.extend(found);
    }
    files.sort();
    files.dedup();

    let scan_one = |path: &PathBuf| {
        let mut report = analyze_file(path).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "failed to read source");
            FileReport {
                path: String::new(),
                hash: None,
                lossy: false,
                module: None,
                error: Some(FileError::new(codes::READ_FAILED, err.to_string())),
            }
        });
        report.path = display_path(path, &config.cwd);
        report
    };

    let reports: Vec<FileReport> = if config.parallel {
        files.par_iter().map(scan_one).collect()
    } else {
        files.iter().map(scan_one).collect()
    };

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    let dependencies = collect_dependencies(&reports);
    debug!(files = reports.len(), failed, dependencies = dependencies.len(), "scan complete");

    Ok(ScanReport {
        schema_version: REPORT_SCHEMA_VERSION,
        files: reports,
        failed,
        dependencies,
    })
}

fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn collect_dependencies(reports: &[FileReport]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    let imports = reports
        .iter()
        .filter_map(|r| r.module.as_ref())
        .flat_map(|m| m.imports.iter())
        .filter(|i| i.kind == kinds::STATIC);
    for import in imports {
        if let Some(specifier) = &import.specifier {
            if seen.insert(specifier.as_str()) {
                out.push(specifier.clone());
            }
        }
    }
    out
}
