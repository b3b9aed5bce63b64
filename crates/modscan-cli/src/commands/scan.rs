use miette::{IntoDiagnostic, Result};
use modscan_core::{analyze_paths, write_json, Config, FileReport, ScanReport};
use modscan_util::hash::short_hash;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Exit code when at least one file failed to read or scan.
pub const EXIT_FILE_FAILED: i32 = 1;

/// Run the scan command.
///
/// When `json` is true, outputs a single JSON object to stdout. With
/// `output`, the JSON report is also written to that file.
pub fn run(config: &Config, paths: &[PathBuf], output: Option<&Path>, json: bool) -> Result<()> {
    let report = analyze_paths(paths, config).into_diagnostic()?;
    info!(
        files = report.files.len(),
        failed = report.failed,
        "scanned sources"
    );

    if let Some(output) = output {
        write_json(&config.resolve(output), &report).into_diagnostic()?;
    }

    if json {
        print_json(&report)?;
    } else {
        print_human(&report)?;
    }

    if report.failed > 0 {
        std::process::exit(EXIT_FILE_FAILED);
    }
    Ok(())
}

fn print_json(report: &ScanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

fn print_human(report: &ScanReport) -> Result<()> {
    let mut out = io::stdout().lock();

    for file in &report.files {
        print_file(&mut out, file)?;
    }

    w(
        &mut out,
        &format!(
            "{} file(s), {} failed, {} dependencies\n",
            report.files.len(),
            report.failed,
            report.dependencies.len()
        ),
    )?;
    for dep in &report.dependencies {
        w(&mut out, &format!("  {dep}\n"))?;
    }
    Ok(())
}

fn print_file(out: &mut impl Write, file: &FileReport) -> Result<()> {
    let hash = file.hash.as_deref().map(short_hash).unwrap_or("-");
    let mut flags = Vec::new();
    if let Some(module) = &file.module {
        if module.facade {
            flags.push("facade");
        }
        if !module.has_module_syntax {
            flags.push("script");
        }
    }
    if file.lossy {
        flags.push("lossy");
    }

    w(out, &format!("\x1b[1m{}\x1b[0m  {hash}", file.path))?;
    if !flags.is_empty() {
        w(out, &format!("  ({})", flags.join(", ")))?;
    }
    w(out, "\n")?;

    if let Some(module) = &file.module {
        for import in &module.imports {
            let target = import
                .specifier
                .as_deref()
                .or(import.raw.as_deref())
                .unwrap_or("?");
            w(
                out,
                &format!("  import {:<7} {target}  :{}\n", import.kind, import.line),
            )?;
        }
        for export in &module.exports {
            match &export.local {
                Some(local) if *local != export.name => w(
                    out,
                    &format!("  export {} as {}  :{}\n", local, export.name, export.line),
                )?,
                _ => w(out, &format!("  export {}  :{}\n", export.name, export.line))?,
            }
        }
    }

    if let Some(error) = &file.error {
        w(
            out,
            &format!("  \x1b[31merror\x1b[0m [{}] {}\n", error.code, error.message),
        )?;
    }
    Ok(())
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}
