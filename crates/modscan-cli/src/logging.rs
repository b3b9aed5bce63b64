//! Logging setup for the `modscan` binary.
//!
//! Library crates only emit `tracing` events; the subscriber is installed
//! here. Everything goes to stderr so stdout carries nothing but reports.

use miette::{IntoDiagnostic, Result};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding extra filter directives, in `RUST_LOG`
/// syntax.
pub const LOG_ENV: &str = "MODSCAN_LOG";

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
///
/// `verbosity` 0 logs INFO, 1 DEBUG, 2+ TRACE. With `json`, each event is
/// one JSON object per line carrying the current span's fields:
/// ```json
/// {"timestamp":"...","level":"WARN","fields":{...},"span":{"cmd":"scan","cwd":"/path","name":"scan"}}
/// ```
pub fn init(verbosity: u8, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(level_for(verbosity).into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .into_diagnostic()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .into_diagnostic()
    }
}
