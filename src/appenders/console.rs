//! Console appender implementation

use crate::core::{Appender, Result};
use std::io::{self, Write};

/// Writes records to the process's standard output.
///
/// Each record and its newline go out in a single `write_all`, and the
/// owning sink holds its lock for the duration, so concurrent loggers never
/// interleave within a line.
pub struct ConsoleAppender {
    out: Box<dyn Write + Send>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
        }
    }

    /// Direct console output to another writer, e.g. an in-memory buffer.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_log_facade::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::with_writer(Vec::new());
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Box::new(writer),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &str) -> Result<()> {
        let mut line = String::with_capacity(record.len() + 1);
        line.push_str(record);
        line.push('\n');
        self.out.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_appends_lines() {
        let capture = Capture::default();
        let mut appender = ConsoleAppender::with_writer(capture.clone());

        appender.append("first").unwrap();
        appender.append("second").unwrap();
        appender.flush().unwrap();

        let written = String::from_utf8(capture.0.lock().clone()).unwrap();
        assert_eq!(written, "first\nsecond\n");
        assert_eq!(appender.name(), "console");
    }
}
