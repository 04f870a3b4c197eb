//! Logging setup for the `envgen` binary.
//!
//! Logs go to stderr so `--stdout` output stays clean. `RUST_LOG`, when set,
//! takes over filtering entirely.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Args;

pub const LOG_LEVEL_ENV_VAR: &str = "ENVGEN_LOG_LEVEL";

static INIT: Once = Once::new();

/// Pick the level from flags, then `ENVGEN_LOG_LEVEL`, then INFO.
pub fn level_from_args(args: &Args) -> Level {
    if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    }
}

/// Parses a log level, case-insensitive. Unknown values fall back to INFO.
pub fn parse_level(level_str: &str) -> Level {
    level_str.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(level: Level) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("envgen={level}"))
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}
