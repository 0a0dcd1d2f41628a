//! Core logger types and traits

pub mod appender;
pub mod encoder;
pub mod error;
pub mod factory;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod sink;
pub mod trace_context;

pub use appender::Appender;
pub use encoder::{Encoder, EncoderConfig, RESERVED_FIELD_PREFIX};
pub use error::{LoggerError, Result};
pub use factory::{
    build_sinks, build_sinks_with_console, new_logger, new_logger_by_name, LoggerInstance,
};
pub use log_context::{FieldValue, Fields};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{CompositeLogger, FatalHook, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use options::LoggerOptions;
pub use sink::{Sink, Tee};
pub use trace_context::{trace_fields, TracingContext, SPAN_ID_KEY, TRACE_ID_KEY};
