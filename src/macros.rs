//! Logging macros for ergonomic log message formatting.
//!
//! The leveled macros accept `format!` style arguments, optionally followed
//! by `;` and `key => value` fields.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::{fields, info};
//!
//! let logger = CompositeLogger::discard();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! info!(logger, "User logged in"; "user_id" => 42, "method" => "password");
//!
//! // Building a field set directly
//! let request = logger.with(fields! { "request_id" => "r-17" });
//! ```

/// Build a [`Fields`](crate::Fields) set from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_log_facade::fields;
///
/// let fields = fields! { "user" => "alice", "attempts" => 3, "admin" => false };
/// assert_eq!(fields.len(), 3);
/// assert!(fields! {}.is_empty());
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $( fields.add_field($key, $value); )+
        fields
    }};
}

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CompositeLogger::discard();
/// use rust_log_facade::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, "Slow query"; "elapsed_ms" => 1200);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),* $(,)?) => {{
        use $crate::Logger as _;
        $logger.log($level, &format!($fmt $(, $arg)*), $crate::fields! { $($key => $value),* })
    }};
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use $crate::Logger as _;
        $logger.log($level, &format!($fmt $(, $arg)*), $crate::Fields::new())
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CompositeLogger::discard();
/// use rust_log_facade::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CompositeLogger::discard();
/// use rust_log_facade::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100; "batch" => 7);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CompositeLogger::discard();
/// use rust_log_facade::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = CompositeLogger::discard();
/// use rust_log_facade::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}", 500; "retryable" => true);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, flush, and run the logger's fatal hook.
///
/// The default hook exits the process.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # use std::sync::Arc;
/// # let logger = CompositeLogger::builder().on_fatal(Arc::new(|| {})).build();
/// use rust_log_facade::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full"; "mount" => "/data");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),* $(,)?) => {{
        use $crate::Logger as _;
        $logger.fatal(&format!($fmt $(, $arg)*), $crate::fields! { $($key => $value),* })
    }};
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use $crate::Logger as _;
        $logger.fatal(&format!($fmt $(, $arg)*), $crate::Fields::new())
    }};
}
