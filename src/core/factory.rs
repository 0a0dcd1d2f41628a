//! Logger construction from options
//!
//! [`new_logger`] is the single entry point application code uses to obtain
//! a [`Logger`]. It selects an implementation by [`LoggerInstance`] and builds
//! the sinks an [`LoggerOptions`] record enables.

use super::{
    error::{LoggerError, Result},
    logger::{CompositeLogger, Logger},
    options::LoggerOptions,
    sink::Sink,
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use std::fmt;
use std::str::FromStr;

/// Logger implementations the factory can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoggerInstance {
    /// Fan-out over the console and file sinks
    #[default]
    Composite,
}

impl LoggerInstance {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerInstance::Composite => "composite",
        }
    }
}

impl fmt::Display for LoggerInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerInstance {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "composite" => Ok(LoggerInstance::Composite),
            _ => Err(LoggerError::unsupported_instance(s)),
        }
    }
}

/// Build a logger of the given kind.
///
/// With every sink disabled the result is a valid logger that discards
/// all entries.
///
/// # Errors
///
/// Returns [`LoggerError::FileAppenderError`] when the file sink is enabled
/// and its file cannot be opened.
///
/// # Example
///
/// ```
/// use rust_log_facade::prelude::*;
///
/// let options = LoggerOptions::new().with_console(LogLevel::Warn, true);
/// let logger = new_logger(LoggerInstance::Composite, &options).unwrap();
/// logger.warn("disk almost full", Fields::from([("free_mb", 512)]));
/// ```
pub fn new_logger(instance: LoggerInstance, options: &LoggerOptions) -> Result<Box<dyn Logger>> {
    match instance {
        LoggerInstance::Composite => Ok(Box::new(CompositeLogger::from_options(options)?)),
    }
}

/// Build a logger by implementation name.
///
/// # Errors
///
/// Returns [`LoggerError::UnsupportedInstance`] for an unknown name, and
/// otherwise fails like [`new_logger`].
pub fn new_logger_by_name(name: &str, options: &LoggerOptions) -> Result<Box<dyn Logger>> {
    new_logger(name.parse()?, options)
}

/// Sinks enabled by `options`, console first
///
/// # Errors
///
/// Fails when the file sink is enabled and its file cannot be opened.
pub fn build_sinks(options: &LoggerOptions) -> Result<Vec<Sink>> {
    build_sinks_with_console(options, ConsoleAppender::new())
}

/// Like [`build_sinks`], writing console output through `console`
pub fn build_sinks_with_console(
    options: &LoggerOptions,
    console: ConsoleAppender,
) -> Result<Vec<Sink>> {
    let mut sinks = Vec::with_capacity(2);

    if options.enable_console {
        sinks.push(Sink::new(
            console,
            options.console_encoder(),
            options.console_level,
        ));
    }

    if options.enable_file {
        let path = options.file_path();
        let appender = RotatingFileAppender::with_policy(&path, options.rotation_policy())
            .map_err(|e| match e {
                LoggerError::FileAppenderError { .. } => e,
                other => LoggerError::file_appender(path.display().to_string(), other.to_string()),
            })?;
        sinks.push(Sink::new(
            appender,
            options.file_encoder(),
            options.file_level,
        ));
    }

    Ok(sinks)
}
