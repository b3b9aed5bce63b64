//! Serializable scan reports.
//!
//! These are the owned, stable shapes printed by `modscan scan --json` and
//! written by `--output`. Lexer records only carry offsets; the report adds
//! decoded text and line numbers.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema version for `ScanReport`. Bump when changing the format.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Stable error codes for per-file failures.
pub mod codes {
    pub const READ_FAILED: &str = "READ_FAILED";
    pub const LEX_FAILED: &str = "LEX_FAILED";
}

/// Import kind names used in reports.
pub mod kinds {
    pub const STATIC: &str = "static";
    pub const DYNAMIC: &str = "dynamic";
    pub const META: &str = "meta";
}

/// One import occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportOutput {
    /// One of the [`kinds`] constants.
    pub kind: String,
    /// Decoded specifier, for imports whose specifier is a string literal.
    pub specifier: Option<String>,
    /// Source text of the specifier span as written (dynamic: the argument
    /// expression).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// The specifier is a plain string literal.
    pub safe: bool,
    pub start: u32,
    pub end: Option<u32>,
    pub statement_start: u32,
    pub statement_end: Option<u32>,
    /// Offset of the attributes `{` or of the second dynamic argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<u32>,
    /// Line of the statement start (1-indexed).
    pub line: u32,
}

/// One exported binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportOutput {
    /// Exported name, unquoted.
    pub name: String,
    /// Local binding, absent for re-exports and anonymous defaults.
    pub local: Option<String>,
    pub start: u32,
    pub end: u32,
    /// Line of the exported name (1-indexed).
    pub line: u32,
}

/// Where a scan stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorOutput {
    pub offset: u32,
    /// 1-indexed.
    pub line: u32,
    /// 1-indexed, in bytes.
    pub column: u32,
}

/// Module structure of one source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleReport {
    pub facade: bool,
    pub has_module_syntax: bool,
    pub imports: Vec<ImportOutput>,
    pub exports: Vec<ExportOutput>,
    /// Set when scanning failed. Records before the error are kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

impl ModuleReport {
    /// Decoded specifiers of all safe imports, in source order.
    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().filter_map(|i| i.specifier.as_deref())
    }
}

/// Per-file failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileError {
    /// One of the [`codes`] constants.
    pub code: String,
    pub message: String,
}

impl FileError {
    #[must_use]
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Scan result for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    /// Path as given or discovered, relative to `cwd` when possible.
    pub path: String,
    /// BLAKE3 hex digest of the file contents.
    pub hash: Option<String>,
    /// Invalid UTF-8 was replaced before scanning.
    #[serde(default)]
    pub lossy: bool,
    pub module: Option<ModuleReport>,
    pub error: Option<FileError>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of scanning a set of paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanReport {
    pub schema_version: u32,
    /// Files in path order.
    pub files: Vec<FileReport>,
    /// Number of files with an error.
    pub failed: usize,
    /// Distinct static specifiers across all files, in first-seen order.
    pub dependencies: Vec<String>,
}

/// Write `report` as pretty JSON to `path`, replacing it atomically.
pub fn write_json(path: &Path, report: &ScanReport) -> Result<(), Error> {
    let mut bytes = serde_json::to_vec_pretty(report)?;
    bytes.push(b'\n');
    modscan_util::fs::write_atomic(path, &bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScanReport {
        ScanReport {
            schema_version: REPORT_SCHEMA_VERSION,
            files: vec![FileReport {
                path: "a.js".to_string(),
                hash: Some("abc".to_string()),
                lossy: false,
                module: Some(ModuleReport {
                    facade: true,
                    has_module_syntax: true,
                    imports: vec![ImportOutput {
                        kind: kinds::STATIC.to_string(),
                        specifier: Some("./b.js".to_string()),
                        raw: Some("./b.js".to_string()),
                        safe: true,
                        start: 8,
                        end: Some(14),
                        statement_start: 0,
                        statement_end: Some(15),
                        attributes: None,
                        line: 1,
                    }],
                    exports: Vec::new(),
                    error: None,
                }),
                error: None,
            }],
            failed: 0,
            dependencies: vec!["./b.js".to_string()],
        }
    }

    #[test]
    fn test_report_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["schema_version"], REPORT_SCHEMA_VERSION);
        let import = &value["files"][0]["module"]["imports"][0];
        assert_eq!(import["kind"], "static");
        assert_eq!(import["specifier"], "./b.js");
        assert!(import.get("attributes").is_none());
        assert!(value["files"][0]["module"].get("error").is_none());
        assert!(value["files"][0]["error"].is_null());
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json(&path, &sample()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: ScanReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_specifiers() {
        let report = sample();
        let module = report.files[0].module.as_ref().unwrap();
        assert_eq!(module.specifiers().collect::<Vec<_>>(), ["./b.js"]);
    }
}
