//! # Rust Log Facade
//!
//! A structured logging facade: application code logs through the
//! [`Logger`] trait while the configured sinks decide where entries go.
//!
//! ## Features
//!
//! - **Leveled, structured entries**: debug through fatal, each with key/value fields
//! - **Fan-out**: console and rotating file sinks, each with its own level and encoding
//! - **Immutable derivation**: `with` and `for_context` return child loggers
//! - **Trace correlation**: `trace.id` and `span.id` from an OpenTelemetry context
//! - **Thread safe**: one logger can be shared by any number of threads
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let options = LoggerOptions::new().with_console(LogLevel::Info, false);
//! let logger = new_logger(LoggerInstance::Composite, &options).unwrap();
//!
//! let request_logger = logger.with(Fields::from([("request_id", "r-17")]));
//! request_logger.info("request accepted", Fields::from([("bytes", 512)]));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        new_logger, new_logger_by_name, Appender, CompositeLogger, Encoder, FieldValue, Fields,
        LogLevel, Logger, LoggerBuilder, LoggerError, LoggerInstance, LoggerOptions, Result,
        Sink,
    };
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use core::{
    build_sinks, new_logger, new_logger_by_name, trace_fields, Appender, CompositeLogger,
    Encoder, EncoderConfig, FatalHook, FieldValue, Fields, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerInstance, LoggerMetrics, LoggerOptions, Result, Sink, Tee,
    TracingContext, SPAN_ID_KEY, TRACE_ID_KEY,
};
