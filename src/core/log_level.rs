//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry, ordered from most to least verbose.
///
/// Configuration treats level names leniently: anything that is not a
/// recognized name resolves to [`LogLevel::Info`] (see [`LogLevel::resolve`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Map a configured level name to a level, never failing.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unknown and empty names map to `Info`.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name.parse() {
            Ok(level) => level,
            Err(_) => LogLevel::Info,
        }
    }

    /// Filtering rank; an entry passes a threshold when its rank is >= the threshold's.
    #[must_use]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl From<String> for LogLevel {
    fn from(name: String) -> Self {
        LogLevel::resolve(&name)
    }
}

impl From<&str> for LogLevel {
    fn from(name: &str) -> Self {
        LogLevel::resolve(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_names() {
        assert_eq!(LogLevel::resolve("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::resolve("info"), LogLevel::Info);
        assert_eq!(LogLevel::resolve("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::resolve("error"), LogLevel::Error);
        assert_eq!(LogLevel::resolve("fatal"), LogLevel::Fatal);
        assert_eq!(LogLevel::resolve("WARNING"), LogLevel::Warn);
    }

    #[test]
    fn test_resolve_falls_back_to_info() {
        assert_eq!(LogLevel::resolve(""), LogLevel::Info);
        assert_eq!(LogLevel::resolve("trace"), LogLevel::Info);
        assert_eq!(LogLevel::resolve("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_rank_ordering() {
        assert!(LogLevel::Debug.rank() < LogLevel::Info.rank());
        assert!(LogLevel::Info.rank() < LogLevel::Warn.rank());
        assert!(LogLevel::Warn.rank() < LogLevel::Error.rank());
        assert!(LogLevel::Error.rank() < LogLevel::Fatal.rank());
    }

    #[test]
    fn test_lenient_deserialize() {
        let level: LogLevel = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(level, LogLevel::Error);

        let level: LogLevel = serde_json::from_str("\"loud\"").unwrap();
        assert_eq!(level, LogLevel::Info);

        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
    }
}
