#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]

//! Core of modscan: configuration, errors, and the analysis layer that turns
//! raw lexer records into owned, serializable module reports.

pub mod analyze;
pub mod config;
pub mod error;
pub mod report;

pub use analyze::{analyze_file, analyze_paths, analyze_source};
pub use config::Config;
pub use error::Error;
pub use report::{
    codes, kinds, write_json, ErrorOutput, ExportOutput, FileError, FileReport, ImportOutput,
    ModuleReport, ScanReport, REPORT_SCHEMA_VERSION,
};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
