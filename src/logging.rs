// src/logging.rs
// =============================================================================
// Logger setup.
//
// Logs go to stderr through env_logger, so stdout stays clean for --json.
// RUST_LOG is read first; --log-level then sets the level for this crate.
// =============================================================================

use clap::ValueEnum;
use log::{LevelFilter, SetLoggerError};

/// Verbosity for the --log-level flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

pub fn init_logger(level: LogLevel) -> Result<(), SetLoggerError> {
    let level = LevelFilter::from(level);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("waa", level);
    // HTTP stack internals are rarely useful here
    builder.filter_module("reqwest", level.min(LevelFilter::Info));
    builder.filter_module("hyper", level.min(LevelFilter::Info));
    builder.format_timestamp_secs();
    builder.try_init()
}
