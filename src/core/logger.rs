//! Logger facade and its composite implementation

use super::{
    error::Result,
    factory::{build_sinks, build_sinks_with_console},
    log_context::{FieldValue, Fields},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    options::LoggerOptions,
    sink::{Sink, Tee},
    trace_context::trace_fields,
};
use crate::appenders::ConsoleAppender;
use opentelemetry::Context;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Step run after a fatal entry has been written and flushed
pub type FatalHook = Arc<dyn Fn() + Send + Sync>;

/// Exit status used by the default fatal hook
pub const FATAL_EXIT_CODE: i32 = 1;

/// The logging contract application code depends on.
///
/// No method returns an error: a logging call can never fail the caller.
/// Deriving a logger with [`with`](Logger::with) or
/// [`for_context`](Logger::for_context) yields a new handle and leaves the
/// receiver untouched.
pub trait Logger: Send + Sync {
    /// Emit an entry; call-site fields override accumulated ones on collision.
    ///
    /// Fields named like an entry key (`message`, `level`, `timestamp`,
    /// `caller`, `error.stack_trace`) appear as `fields.<key>` in JSON output.
    #[track_caller]
    fn log(&self, level: LogLevel, message: &str, fields: Fields);

    #[track_caller]
    fn debug(&self, message: &str, fields: Fields) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[track_caller]
    fn info(&self, message: &str, fields: Fields) {
        self.log(LogLevel::Info, message, fields);
    }

    #[track_caller]
    fn warn(&self, message: &str, fields: Fields) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[track_caller]
    fn error(&self, message: &str, fields: Fields) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Emit a fatal entry, flush every sink, then terminate.
    #[track_caller]
    fn fatal(&self, message: &str, fields: Fields);

    /// A child logger carrying `fields` on every entry
    fn with(&self, fields: Fields) -> Box<dyn Logger>;

    /// A child logger carrying the trace fields of `cx`, if it has any
    fn for_context(&self, cx: &Context) -> Box<dyn Logger>;

    fn flush(&self);
}

/// Logger that fans every entry out to a set of sinks.
///
/// Cloning is cheap: clones share the sinks and the accumulated fields.
///
/// # Example
///
/// ```
/// use rust_log_facade::prelude::*;
///
/// let logger = CompositeLogger::builder()
///     .sink(Sink::new(ConsoleAppender::new(), Encoder::select(false), LogLevel::Info))
///     .field("service", "billing")
///     .build();
///
/// logger.info("invoice sent", Fields::from([("invoice", 42)]));
/// ```
#[derive(Clone)]
pub struct CompositeLogger {
    tee: Arc<Tee>,
    fields: Arc<Fields>,
    stacktrace_level: Option<LogLevel>,
    on_fatal: FatalHook,
}

impl CompositeLogger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build the sinks described by `options` and compose them.
    ///
    /// # Errors
    ///
    /// Fails when an enabled sink's destination cannot be opened.
    pub fn from_options(options: &LoggerOptions) -> Result<Self> {
        Ok(LoggerBuilder::new().options(options)?.build())
    }

    /// A logger without sinks; every entry is discarded
    #[must_use]
    pub fn discard() -> Self {
        LoggerBuilder::new().build()
    }

    /// Derive a logger whose fields are the receiver's overlaid with `fields`
    #[must_use]
    pub fn child(&self, fields: &Fields) -> Self {
        Self {
            tee: Arc::clone(&self.tee),
            fields: Arc::new(self.fields.merged(fields)),
            stacktrace_level: self.stacktrace_level,
            on_fatal: Arc::clone(&self.on_fatal),
        }
    }

    /// Derive a logger enriched with the trace fields of `cx`.
    ///
    /// Without a valid span in `cx` this is a plain clone.
    #[must_use]
    pub fn with_trace(&self, cx: &Context) -> Self {
        match trace_fields(cx) {
            Some(fields) => self.child(&fields),
            None => self.clone(),
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn sink_count(&self) -> usize {
        self.tee.len()
    }

    /// Whether any sink would accept an entry at `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.tee.enabled(level)
    }

    /// Delivery counters shared by this logger and all loggers derived from it
    pub fn metrics(&self) -> &LoggerMetrics {
        self.tee.metrics()
    }

    fn emit(&self, level: LogLevel, message: &str, fields: Fields, caller: &Location<'_>) {
        if !self.tee.enabled(level) {
            return;
        }

        let mut entry = LogEntry::new(level, message)
            .with_caller(caller)
            .with_fields(self.fields.merged(&fields));

        if self.stacktrace_level.is_some_and(|threshold| level >= threshold) {
            entry = entry.with_stack_trace(Backtrace::force_capture().to_string());
        }

        self.tee.write(&entry);
    }
}

impl Logger for CompositeLogger {
    fn log(&self, level: LogLevel, message: &str, fields: Fields) {
        self.emit(level, message, fields, Location::caller());
    }

    fn fatal(&self, message: &str, fields: Fields) {
        self.emit(LogLevel::Fatal, message, fields, Location::caller());
        self.tee.flush();
        (self.on_fatal)();
    }

    fn with(&self, fields: Fields) -> Box<dyn Logger> {
        Box::new(self.child(&fields))
    }

    fn for_context(&self, cx: &Context) -> Box<dyn Logger> {
        Box::new(self.with_trace(cx))
    }

    fn flush(&self) {
        self.tee.flush();
    }
}

impl fmt::Debug for CompositeLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeLogger")
            .field("sinks", &self.tee.sinks())
            .field("fields", &self.fields)
            .field("stacktrace_level", &self.stacktrace_level)
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a [`CompositeLogger`] with a fluent API
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
/// use std::sync::Arc;
///
/// let logger = CompositeLogger::builder()
///     .sink(Sink::new(ConsoleAppender::new(), Encoder::select(true), LogLevel::Debug))
///     .stacktrace_level(LogLevel::Error)
///     .on_fatal(Arc::new(|| eprintln!("fatal entry written")))
///     .build();
/// ```
pub struct LoggerBuilder {
    sinks: Vec<Sink>,
    fields: Fields,
    stacktrace_level: Option<LogLevel>,
    on_fatal: Option<FatalHook>,
}

impl LoggerBuilder {
    /// Create a new builder with no sinks
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            fields: Fields::new(),
            stacktrace_level: None,
            on_fatal: None,
        }
    }

    /// Add the sinks described by `options` and adopt its stack trace level
    ///
    /// # Errors
    ///
    /// Fails when an enabled sink's destination cannot be opened.
    pub fn options(mut self, options: &LoggerOptions) -> Result<Self> {
        self.sinks.extend(build_sinks(options)?);
        if options.stacktrace_level.is_some() {
            self.stacktrace_level = options.stacktrace_level;
        }
        Ok(self)
    }

    /// Like [`options`](Self::options), writing console output through `console`
    ///
    /// # Errors
    ///
    /// Fails when an enabled sink's destination cannot be opened.
    pub fn options_with_console(
        mut self,
        options: &LoggerOptions,
        console: ConsoleAppender,
    ) -> Result<Self> {
        self.sinks.extend(build_sinks_with_console(options, console)?);
        if options.stacktrace_level.is_some() {
            self.stacktrace_level = options.stacktrace_level;
        }
        Ok(self)
    }

    /// Add a sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Add a field carried by every entry
    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.add_field(key, value);
        self
    }

    /// Add fields carried by every entry
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields.extend_from(&fields);
        self
    }

    /// Capture a stack trace for entries at or above `level`
    #[must_use = "builder methods return a new value"]
    pub fn stacktrace_level(mut self, level: LogLevel) -> Self {
        self.stacktrace_level = Some(level);
        self
    }

    /// Replace the step that runs after a fatal entry is flushed.
    ///
    /// The default exits the process with [`FATAL_EXIT_CODE`].
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, hook: FatalHook) -> Self {
        self.on_fatal = Some(hook);
        self
    }

    /// Build the logger
    pub fn build(self) -> CompositeLogger {
        CompositeLogger {
            tee: Arc::new(Tee::new(self.sinks)),
            fields: Arc::new(self.fields),
            stacktrace_level: self.stacktrace_level,
            on_fatal: self
                .on_fatal
                .unwrap_or_else(|| Arc::new(|| std::process::exit(FATAL_EXIT_CODE))),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
