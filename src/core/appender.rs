//! Appender trait for log output destinations

use super::error::Result;

/// A destination for encoded log records.
///
/// Appenders receive records that were already filtered and encoded by
/// their owning [`Sink`](super::sink::Sink); they only move bytes. Calls
/// are serialized by the sink, so implementations need not lock.
pub trait Appender: Send {
    /// Write one encoded record; the appender terminates it with a newline.
    fn append(&mut self, record: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
