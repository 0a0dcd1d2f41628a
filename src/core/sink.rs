//! Sinks and their fan-out composition
//!
//! A [`Sink`] pairs an encoder, a destination appender and a minimum level.
//! A [`Tee`] offers every entry to each of its sinks, which filter and
//! encode independently. An empty tee discards everything.

use super::{
    appender::Appender, encoder::Encoder, log_entry::LogEntry, log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::fmt;

pub struct Sink {
    level: LogLevel,
    encoder: Encoder,
    appender: Mutex<Box<dyn Appender>>,
}

impl Sink {
    pub fn new<A: Appender + 'static>(appender: A, encoder: Encoder, level: LogLevel) -> Self {
        Self::from_boxed(Box::new(appender), encoder, level)
    }

    pub fn from_boxed(appender: Box<dyn Appender>, encoder: Encoder, level: LogLevel) -> Self {
        Self {
            level,
            encoder,
            appender: Mutex::new(appender),
        }
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[must_use]
    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Encode and write an entry if it passes this sink's level.
    ///
    /// Returns `Ok(false)` when the entry was filtered out.
    pub fn write(&self, entry: &LogEntry) -> super::Result<bool> {
        if !self.enabled(entry.level) {
            return Ok(false);
        }
        let record = self.encoder.encode(entry);
        self.appender.lock().append(&record)?;
        Ok(true)
    }

    pub fn flush(&self) -> super::Result<()> {
        self.appender.lock().flush()
    }

    pub fn name(&self) -> String {
        self.appender.lock().name().to_string()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("level", &self.level)
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

/// Fan-out over an ordered collection of sinks
#[derive(Debug, Default)]
pub struct Tee {
    sinks: Vec<Sink>,
    metrics: LoggerMetrics,
}

impl Tee {
    pub fn new(sinks: Vec<Sink>) -> Self {
        Self {
            sinks,
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Lowest level any sink accepts; `None` when there are no sinks
    pub fn min_level(&self) -> Option<LogLevel> {
        self.sinks.iter().map(Sink::level).min()
    }

    /// Whether at least one sink would accept an entry at `level`
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.sinks.iter().any(|sink| sink.enabled(level))
    }

    /// Offer an entry to every sink.
    ///
    /// **Per-sink panic isolation**: each sink is wrapped in catch_unwind so
    /// that one failing destination never keeps the others from receiving
    /// the entry. Failures are reported on stderr and counted as drops.
    pub fn write(&self, entry: &LogEntry) {
        let mut has_error = false;
        let mut accepted = false;

        for (idx, sink) in self.sinks.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(entry)));

            match result {
                Ok(Ok(written)) => accepted |= written,
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} ({}) failed: {}", idx, sink.name(), e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        panic_message(&*panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.metrics.record_dropped();
        } else if accepted {
            self.metrics.record_logged();
        }
    }

    /// Flush every sink, reporting failures on stderr
    pub fn flush(&self) {
        for (idx, sink) in self.sinks.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.flush()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => eprintln!("[LOGGER ERROR] Sink #{} flush failed: {}", idx, e),
                Err(panic_info) => eprintln!(
                    "[LOGGER CRITICAL] Sink #{} panicked during flush: {}",
                    idx,
                    panic_message(&*panic_info)
                ),
            }
        }
    }
}

impl Drop for Tee {
    fn drop(&mut self) {
        self.flush();
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoggerError, Result};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<String>>>);

    impl Appender for Recorder {
        fn append(&mut self, record: &str) -> Result<()> {
            self.0.lock().push(record.to_string());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn append(&mut self, _record: &str) -> Result<()> {
            Err(LoggerError::writer("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn append(&mut self, _record: &str) -> Result<()> {
            panic!("appender exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_sink_filters_below_level() {
        let recorder = Recorder::default();
        let sink = Sink::new(recorder.clone(), Encoder::select(false), LogLevel::Warn);

        assert!(!sink.write(&LogEntry::new(LogLevel::Info, "quiet")).unwrap());
        assert!(sink.write(&LogEntry::new(LogLevel::Error, "loud")).unwrap());

        let records = recorder.0.lock();
        assert_eq!(records.len(), 1);
        assert!(records[0].contains("loud"));
    }

    #[test]
    fn test_tee_fans_out_with_independent_levels() {
        let debug_rec = Recorder::default();
        let error_rec = Recorder::default();
        let tee = Tee::new(vec![
            Sink::new(debug_rec.clone(), Encoder::select(false), LogLevel::Debug),
            Sink::new(error_rec.clone(), Encoder::select(true), LogLevel::Error),
        ]);

        tee.write(&LogEntry::new(LogLevel::Info, "info entry"));
        tee.write(&LogEntry::new(LogLevel::Error, "error entry"));

        assert_eq!(debug_rec.0.lock().len(), 2);
        assert_eq!(error_rec.0.lock().len(), 1);
        assert!(error_rec.0.lock()[0].starts_with('{'));
        assert_eq!(tee.min_level(), Some(LogLevel::Debug));
        assert_eq!(tee.metrics().total_logged(), 2);
    }

    #[test]
    fn test_empty_tee_discards() {
        let tee = Tee::new(Vec::new());
        assert!(tee.is_empty());
        assert!(!tee.enabled(LogLevel::Fatal));
        assert_eq!(tee.min_level(), None);

        tee.write(&LogEntry::new(LogLevel::Fatal, "nowhere"));
        tee.flush();
        assert_eq!(tee.metrics().total_logged(), 0);
        assert_eq!(tee.metrics().dropped_count(), 0);
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let recorder = Recorder::default();
        let tee = Tee::new(vec![
            Sink::new(Failing, Encoder::select(false), LogLevel::Debug),
            Sink::new(Panicking, Encoder::select(false), LogLevel::Debug),
            Sink::new(recorder.clone(), Encoder::select(false), LogLevel::Debug),
        ]);

        for _ in 0..3 {
            tee.write(&LogEntry::new(LogLevel::Info, "still delivered"));
        }

        assert_eq!(recorder.0.lock().len(), 3);
        assert_eq!(tee.metrics().dropped_count(), 3);
    }
}
