//! tracing subscriber setup for the command line tool

use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
    util::TryInitError,
};

/// Level for a `-v` count, or nothing at all with `-q`
#[must_use]
pub const fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber: compact lines on stderr
///
/// `RUST_LOG`, when set and valid, replaces the level chosen by the flags.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn setup_logging(verbosity: u8, quiet: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level = env_filter
        .is_none()
        .then_some(level_filter(verbosity, quiet));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(level)
        .with(stderr_layer)
        .try_init()
}
