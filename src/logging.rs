//! Structured logging initialization.
//!
//! Logs go to stderr so command output on stdout stays parseable. Robot
//! mode switches to JSON lines; otherwise the format follows whether
//! stderr is a terminal.

use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber.
///
/// `verbose` raises the default level (0 = info, 1 = debug, 2+ = trace);
/// `quiet` drops it to errors only. `RUST_LOG` overrides both.
pub fn init(robot_mode: bool, verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "cardpad=error"
    } else {
        match verbose {
            0 => "cardpad=info",
            1 => "cardpad=debug",
            _ => "cardpad=trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let base = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr);

    if robot_mode {
        // JSON lines for scripts and agents
        tracing_subscriber::registry().with(filter).with(base.json().with_target(true)).init();
    } else if io::stderr().is_terminal() {
        tracing_subscriber::registry().with(filter).with(base.with_target(false)).init();
    } else {
        // Piped or redirected: compact, no ANSI
        tracing_subscriber::registry()
            .with(filter)
            .with(base.with_target(false).with_ansi(false).compact())
            .init();
    }
}
