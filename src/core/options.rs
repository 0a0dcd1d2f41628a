//! Logger configuration record
//!
//! `LoggerOptions` describes which sinks to enable and how each one encodes
//! and filters. It deserializes from JSON using the conventional option names:
//!
//! ```
//! use rust_log_facade::{LoggerOptions, LogLevel};
//!
//! let options = LoggerOptions::from_json_str(r#"{
//!     "EnableConsole": true,
//!     "ConsoleLevel": "warn",
//!     "EnableFile": true,
//!     "Filename": "/var/log/app.log",
//!     "FileJSONFormat": true,
//!     "FileMaxSize": 50
//! }"#).unwrap();
//!
//! assert_eq!(options.console_level, LogLevel::Warn);
//! assert_eq!(options.file_max_size, 50);
//! ```

use super::encoder::Encoder;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use crate::appenders::RotationPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    #[serde(rename = "EnableConsole")]
    pub enable_console: bool,
    #[serde(rename = "ConsoleJSONFormat")]
    pub console_json_format: bool,
    #[serde(rename = "ConsoleLevel")]
    pub console_level: LogLevel,
    /// Color level names in plain console output
    #[serde(rename = "ConsoleColors")]
    pub console_colors: bool,

    #[serde(rename = "EnableFile")]
    pub enable_file: bool,
    /// File to write logs to; empty selects `<temp dir>/<process>-rotating.log`
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "FileJSONFormat")]
    pub file_json_format: bool,
    /// Rotation threshold in megabytes; 0 selects 100
    #[serde(rename = "FileMaxSize")]
    pub file_max_size: u64,
    /// Rotated files to keep; 0 keeps all
    #[serde(rename = "FileMaxBackups")]
    pub file_max_backups: usize,
    /// Days to keep rotated files; 0 keeps them regardless of age
    #[serde(rename = "FileMaxAge")]
    pub file_max_age: u64,
    #[serde(rename = "FileCompress")]
    pub file_compress: bool,
    #[serde(rename = "FileLevel")]
    pub file_level: LogLevel,

    /// Attach a stack trace to entries at or above this level
    #[serde(rename = "StacktraceLevel", skip_serializing_if = "Option::is_none")]
    pub stacktrace_level: Option<LogLevel>,
}

impl LoggerOptions {
    /// All sinks disabled
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LoggerError::config("LoggerOptions", format!("Invalid JSON: {}", e)))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "read logger configuration",
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&content)
    }

    /// Enable the console sink
    #[must_use = "builder methods return a new value"]
    pub fn with_console(mut self, level: LogLevel, json: bool) -> Self {
        self.enable_console = true;
        self.console_level = level;
        self.console_json_format = json;
        self
    }

    /// Enable the file sink
    #[must_use = "builder methods return a new value"]
    pub fn with_file(mut self, filename: impl Into<String>, level: LogLevel, json: bool) -> Self {
        self.enable_file = true;
        self.filename = filename.into();
        self.file_level = level;
        self.file_json_format = json;
        self
    }

    /// Set file rotation parameters (megabytes, backups, days)
    #[must_use = "builder methods return a new value"]
    pub fn with_rotation(mut self, max_size: u64, max_backups: usize, max_age: u64) -> Self {
        self.file_max_size = max_size;
        self.file_max_backups = max_backups;
        self.file_max_age = max_age;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.file_compress = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_stacktrace_level(mut self, level: LogLevel) -> Self {
        self.stacktrace_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console_colors(mut self, enabled: bool) -> Self {
        self.console_colors = enabled;
        self
    }

    pub fn console_encoder(&self) -> Encoder {
        Encoder::select(self.console_json_format).with_colors(self.console_colors)
    }

    pub fn file_encoder(&self) -> Encoder {
        Encoder::select(self.file_json_format)
    }

    /// Resolved file path, substituting the default for an empty name
    pub fn file_path(&self) -> PathBuf {
        if self.filename.is_empty() {
            let process = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .unwrap_or_else(|| "app".to_string());
            std::env::temp_dir().join(format!("{}-rotating.log", process))
        } else {
            PathBuf::from(&self.filename)
        }
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new()
            .with_max_size_mb(self.file_max_size)
            .with_max_backups(self.file_max_backups)
            .with_max_age_days(self.file_max_age)
            .with_compression(self.file_compress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::rotating_file::MEGABYTE;
    use std::time::Duration;

    #[test]
    fn test_default_disables_everything() {
        let options = LoggerOptions::new();
        assert!(!options.enable_console);
        assert!(!options.enable_file);
        assert_eq!(options.console_level, LogLevel::Info);
        assert_eq!(options.file_level, LogLevel::Info);
        assert_eq!(options.stacktrace_level, None);
    }

    #[test]
    fn test_from_json_with_unknown_level() {
        let options = LoggerOptions::from_json_str(
            r#"{"EnableConsole": true, "ConsoleLevel": "chatty", "FileLevel": "ERROR"}"#,
        )
        .unwrap();

        assert!(options.enable_console);
        assert_eq!(options.console_level, LogLevel::Info);
        assert_eq!(options.file_level, LogLevel::Error);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = LoggerOptions::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rotation_policy_mapping() {
        let options = LoggerOptions::new()
            .with_file("app.log", LogLevel::Debug, true)
            .with_rotation(5, 3, 7)
            .with_compression(true);

        let policy = options.rotation_policy();
        assert_eq!(policy.max_bytes, 5 * MEGABYTE);
        assert_eq!(policy.max_backups, 3);
        assert_eq!(policy.max_age, Some(Duration::from_secs(7 * 24 * 3600)));
        assert!(policy.compress);
    }

    #[test]
    fn test_default_file_path() {
        let options = LoggerOptions::new();
        let path = options.file_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.to_string_lossy().ends_with("-rotating.log"));

        let named = LoggerOptions::new().with_file("/tmp/x.log", LogLevel::Info, false);
        assert_eq!(named.file_path(), PathBuf::from("/tmp/x.log"));
    }

    #[test]
    fn test_encoder_selection() {
        let options = LoggerOptions::new()
            .with_console(LogLevel::Info, false)
            .with_file("app.log", LogLevel::Error, true);

        assert!(!options.console_encoder().is_json());
        assert!(options.file_encoder().is_json());
    }
}
