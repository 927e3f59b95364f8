//! Logging initialization

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::args::Args;

/// Initialize logging based on CLI arguments. Logs go to stderr so that
/// stdout carries only results.
pub fn init(args: &Args) {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(args.verbose >= 2),
        )
        .init();
}
