#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use modscan_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modscan")]
#[command(author, version, about = "List the imports and exports of ES modules", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Scan files and directories for import/export structure
    Scan {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// File extensions collected from directories (comma-separated)
        #[arg(long, value_delimiter = ',', env = "MODSCAN_EXTENSIONS")]
        ext: Vec<String>,

        /// Scan hidden files and directories
        #[arg(long)]
        hidden: bool,

        /// Scan files one at a time
        #[arg(long)]
        no_parallel: bool,

        /// Also write the JSON report to this file
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs)?;

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(cli.json),
        Some(Commands::Scan {
            paths,
            ext,
            hidden,
            no_parallel,
            output,
        }) => {
            let config = config
                .with_extensions(ext)
                .with_include_hidden(hidden)
                .with_parallel(!no_parallel);
            let span = tracing::info_span!("scan", cmd = "scan", cwd = %cwd.display());
            let _guard = span.enter();
            commands::scan::run(&config, &paths, output.as_deref(), cli.json)
        }
    }
}
