//! Diagnostics go to stderr through `tracing`.
//!
//! Verbosity flags pick the level for this crate; everything else stays at
//! `warn`. `RUST_LOG`, when set, replaces the whole filter.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level selected by `-q` / `-v` / `-vv`.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,pitchdeck={level}")))
}

pub fn init(verbose: u8, quiet: bool, ansi: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level_for(verbose, quiet)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(ansi)
        .try_init();
    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {e}");
    }
}
