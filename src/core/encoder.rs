//! Entry encoders
//!
//! Two encodings share one fixed field mapping:
//! - Json: one machine-parseable object per line
//! - Console: a tab-separated, human-readable line
//!
//! The mapping follows the Elastic Common Schema names used by log shippers:
//! the message lives under `message`, stack traces under `error.stack_trace`
//! and the ISO-8601 timestamp under `timestamp`.

use super::log_context::FieldValue;
use super::log_entry::LogEntry;
use chrono::{DateTime, Utc};

/// Prefix given to JSON fields whose key collides with a reserved key
pub const RESERVED_FIELD_PREFIX: &str = "fields.";

/// Field names and time layout shared by every encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub message_key: &'static str,
    pub level_key: &'static str,
    pub time_key: &'static str,
    pub caller_key: &'static str,
    pub stacktrace_key: &'static str,
    /// strftime layout for timestamps (ISO-8601, UTC, milliseconds)
    pub time_format: &'static str,
}

impl EncoderConfig {
    pub const fn standard() -> Self {
        Self {
            message_key: "message",
            level_key: "level",
            time_key: "timestamp",
            caller_key: "caller",
            stacktrace_key: "error.stack_trace",
            time_format: "%Y-%m-%dT%H:%M:%S%.3fZ",
        }
    }

    /// Whether `key` names one of the entry's own fields
    pub fn is_reserved(&self, key: &str) -> bool {
        [
            self.message_key,
            self.level_key,
            self.time_key,
            self.caller_key,
            self.stacktrace_key,
        ]
        .iter()
        .any(|reserved| *reserved == key)
    }

    #[must_use]
    pub fn format_time(&self, datetime: &DateTime<Utc>) -> String {
        datetime.format(self.time_format).to_string()
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Output encoding for one sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoder {
    /// Structured key-value object per line
    ///
    /// Example: `{"caller":"src/main.rs:10","level":"info","message":"started","port":8080,"timestamp":"2025-01-08T10:30:45.123Z"}`
    Json(EncoderConfig),

    /// Human-readable line
    ///
    /// Example: `2025-01-08T10:30:45.123Z	info	src/main.rs:10	started	port=8080`
    Console { config: EncoderConfig, colored: bool },
}

impl Encoder {
    /// Select the encoder for a sink: structured when `json` is set, plain otherwise.
    #[must_use]
    pub fn select(json: bool) -> Self {
        if json {
            Encoder::Json(EncoderConfig::standard())
        } else {
            Encoder::Console {
                config: EncoderConfig::standard(),
                colored: false,
            }
        }
    }

    /// Enable colored level names (console encoding only)
    #[must_use]
    pub fn with_colors(self, enabled: bool) -> Self {
        match self {
            Encoder::Console { config, .. } => Encoder::Console {
                config,
                colored: enabled,
            },
            json => json,
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        match self {
            Encoder::Json(config) => config,
            Encoder::Console { config, .. } => config,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Encoder::Json(_))
    }

    /// Encode an entry as a single record, without trailing newline
    pub fn encode(&self, entry: &LogEntry) -> String {
        match self {
            Encoder::Json(config) => self.encode_json(entry, config),
            Encoder::Console { config, colored } => self.encode_console(entry, config, *colored),
        }
    }

    fn encode_json(&self, entry: &LogEntry, config: &EncoderConfig) -> String {
        let mut json_obj = serde_json::Map::new();

        // A field named like a reserved key moves under `fields.<key>`
        for (key, value) in entry.fields.iter() {
            let key = if config.is_reserved(key) {
                format!("{}{}", RESERVED_FIELD_PREFIX, key)
            } else {
                key.clone()
            };
            json_obj.insert(key, value.to_json_value());
        }

        json_obj.insert(
            config.time_key.to_string(),
            serde_json::Value::String(config.format_time(&entry.timestamp)),
        );
        json_obj.insert(
            config.level_key.to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        if let Some(ref caller) = entry.caller {
            json_obj.insert(
                config.caller_key.to_string(),
                serde_json::Value::String(caller.clone()),
            );
        }
        json_obj.insert(
            config.message_key.to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        if let Some(ref stack) = entry.stack_trace {
            json_obj.insert(
                config.stacktrace_key.to_string(),
                serde_json::Value::String(stack.clone()),
            );
        }

        serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
    }

    fn encode_console(&self, entry: &LogEntry, config: &EncoderConfig, colored: bool) -> String {
        let mut parts = vec![
            config.format_time(&entry.timestamp),
            Self::level_label(entry, colored),
        ];
        if let Some(ref caller) = entry.caller {
            parts.push(caller.clone());
        }
        parts.push(entry.message.clone());

        if !entry.fields.is_empty() {
            let rendered = entry
                .fields
                .iter()
                .map(|(key, value)| {
                    format!("{}={}", Self::quote(key), Self::console_value(value))
                })
                .collect::<Vec<_>>()
                .join(" ");
            parts.push(rendered);
        }

        let mut line = parts.join("\t");
        if let Some(ref stack) = entry.stack_trace {
            line.push('\n');
            line.push_str(stack.trim_end());
        }
        line
    }

    #[cfg(feature = "console")]
    fn level_label(entry: &LogEntry, colored: bool) -> String {
        use colored::Colorize;
        if colored {
            entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string()
        } else {
            entry.level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_label(entry: &LogEntry, _colored: bool) -> String {
        entry.level.to_str().to_string()
    }

    fn console_value(value: &FieldValue) -> String {
        match value {
            FieldValue::String(s) => Self::quote(s),
            other => other.to_string(),
        }
    }

    /// Quote text that would otherwise break key=value parsing or the line
    fn quote(s: &str) -> String {
        if !s.is_empty() && !s.contains(|c: char| c.is_whitespace() || c == '"' || c == '=') {
            return s.to_string();
        }
        let escaped = s
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t");
        format!("\"{}\"", escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Fields, LogLevel};
    use chrono::TimeZone;

    fn fixed_entry(level: LogLevel, message: &str) -> LogEntry {
        let mut entry = LogEntry::new(level, message);
        entry.timestamp = Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(123);
        entry
    }

    #[test]
    fn test_standard_field_names() {
        let config = EncoderConfig::standard();
        assert_eq!(config.message_key, "message");
        assert_eq!(config.stacktrace_key, "error.stack_trace");
        assert_eq!(config.time_key, "timestamp");
    }

    #[test]
    fn test_select() {
        assert!(Encoder::select(true).is_json());
        assert!(!Encoder::select(false).is_json());
    }

    #[test]
    fn test_json_encoding() {
        let entry = fixed_entry(LogLevel::Error, "Error occurred")
            .with_fields(Fields::new().with_field("request_id", "abc-123").with_field("latency_ms", 42));

        let result = Encoder::select(true).encode(&entry);
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["timestamp"], "2025-01-08T10:30:45.123Z");
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
        assert!(parsed.get("error.stack_trace").is_none());
    }

    #[test]
    fn test_json_reserved_keys_not_shadowed() {
        let entry = fixed_entry(LogLevel::Info, "real message").with_fields(
            Fields::new()
                .with_field("message", "spoofed")
                .with_field("level", "fatal")
                .with_field("error.stack_trace", "fake frames"),
        );

        let parsed: serde_json::Value =
            serde_json::from_str(&Encoder::select(true).encode(&entry)).unwrap();
        assert_eq!(parsed["message"], "real message");
        assert_eq!(parsed["level"], "info");
        assert!(parsed.get("error.stack_trace").is_none());
        assert_eq!(parsed["fields.message"], "spoofed");
        assert_eq!(parsed["fields.level"], "fatal");
        assert_eq!(parsed["fields.error.stack_trace"], "fake frames");
    }

    #[test]
    fn test_console_key_cannot_forge_entry() {
        let entry = fixed_entry(LogLevel::Info, "login").with_fields(Fields::new().with_field(
            "user\n2025-01-01T00:00:00.000Z\terror\tFAKE ENTRY x",
            "alice",
        ));

        let result = Encoder::select(false).encode(&entry);
        assert_eq!(result.lines().count(), 1);
        assert!(result.ends_with(
            "\"user\\n2025-01-01T00:00:00.000Z\\terror\\tFAKE ENTRY x\"=alice"
        ));
    }

    #[test]
    fn test_console_key_with_equals_is_quoted() {
        let entry = fixed_entry(LogLevel::Info, "m")
            .with_fields(Fields::new().with_field("a=b", 1));

        let result = Encoder::select(false).encode(&entry);
        assert!(result.ends_with("\tm\t\"a=b\"=1"));
    }

    #[test]
    fn test_json_stack_trace_key() {
        let entry = fixed_entry(LogLevel::Fatal, "boom").with_stack_trace("frame 0\nframe 1");

        let parsed: serde_json::Value =
            serde_json::from_str(&Encoder::select(true).encode(&entry)).unwrap();
        assert_eq!(parsed["error.stack_trace"], "frame 0\nframe 1");
    }

    #[test]
    fn test_console_encoding() {
        let entry = fixed_entry(LogLevel::Info, "User logged in").with_fields(
            Fields::new()
                .with_field("user_id", 123)
                .with_field("action", "log in"),
        );

        let result = Encoder::select(false).encode(&entry);

        assert_eq!(
            result,
            "2025-01-08T10:30:45.123Z\tinfo\tUser logged in\taction=\"log in\" user_id=123"
        );
    }

    #[test]
    fn test_console_encoding_without_fields() {
        let entry = fixed_entry(LogLevel::Warn, "Low disk space");
        let result = Encoder::select(false).encode(&entry);
        assert_eq!(result, "2025-01-08T10:30:45.123Z\twarn\tLow disk space");
    }

    #[test]
    fn test_console_field_line_breaks_escaped() {
        let entry = fixed_entry(LogLevel::Info, "upload")
            .with_fields(Fields::new().with_field("name", "a\nb"));

        let result = Encoder::select(false).encode(&entry);
        assert_eq!(result.lines().count(), 1);
        assert!(result.ends_with("name=\"a\\nb\""));
    }

    #[test]
    fn test_colors_ignored_for_json() {
        let encoder = Encoder::select(true).with_colors(true);
        assert!(encoder.is_json());
    }
}
