//! Rotating file appender with size-triggered rotation
//!
//! When the active file would grow past the configured size it is renamed to
//! a timestamped backup (`app.log` -> `app-2025-01-08T10-30-45.123456.log`),
//! optionally gzip-compressed, and a fresh file is opened in its place.
//! Backups beyond the retained count or older than the retained age are
//! deleted after every rotation.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MEGABYTE: u64 = 1024 * 1024;

/// Size used when a policy is configured with a zero size
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

/// Layout of the timestamp embedded in backup file names (UTC)
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.6f";

const COMPRESSED_SUFFIX: &str = ".gz";

/// Configuration for rotating file appender
///
/// # Examples
///
/// ```
/// use rust_log_facade::appenders::RotationPolicy;
///
/// // Rotate at 50 MB, keep a week of at most 7 compressed backups
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(50)
///     .with_max_backups(7)
///     .with_max_age_days(7)
///     .with_compression(true);
/// assert_eq!(policy.max_bytes, 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size in bytes at which the active file is rotated
    pub max_bytes: u64,
    /// Maximum number of backups to keep; 0 keeps all
    pub max_backups: usize,
    /// Maximum age of a backup; `None` keeps backups regardless of age
    pub max_age: Option<Duration>,
    /// Whether to gzip rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SIZE_MB * MEGABYTE,
            max_backups: 0,
            max_age: None,
            compress: false,
        }
    }
}

impl RotationPolicy {
    /// Create a new rotation policy with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rotation threshold in megabytes; 0 selects [`DEFAULT_MAX_SIZE_MB`]
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size_mb(mut self, megabytes: u64) -> Self {
        let megabytes = if megabytes == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            megabytes
        };
        self.max_bytes = megabytes.saturating_mul(MEGABYTE);
        self
    }

    /// Set the rotation threshold in bytes
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    /// Set maximum backup files; 0 keeps all
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// Set maximum backup age in days; 0 disables age-based removal
    ///
    /// A day is 24 hours.
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = if days == 0 {
            None
        } else {
            Some(Duration::from_secs(days.saturating_mul(24 * 3600)))
        };
        self
    }

    /// Set maximum backup age
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Enable compression
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// A backup file found next to the active log file
#[derive(Debug)]
struct Backup {
    path: PathBuf,
    rotated_at: DateTime<Utc>,
}

/// File appender that rotates by size and prunes old backups
///
/// # Examples
///
/// ```no_run
/// use rust_log_facade::appenders::{RotatingFileAppender, RotationPolicy};
///
/// let policy = RotationPolicy::new()
///     .with_max_size_mb(10)
///     .with_max_backups(5)
///     .with_compression(true);
/// let appender = RotatingFileAppender::with_policy("/var/log/app.log", policy).unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    file: Option<File>,
    current_size: u64,
}

impl RotatingFileAppender {
    /// Create a new rotating file appender with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a new rotating file appender with custom policy
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory or the file cannot be created
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open_file(&base_path)?;

        Ok(Self {
            base_path,
            policy,
            file: Some(file),
            current_size,
        })
    }

    fn open_file(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    fn should_rotate(&self, incoming: u64) -> bool {
        self.current_size > 0 && self.current_size + incoming > self.policy.max_bytes
    }

    /// Perform log rotation
    fn rotate(&mut self) -> Result<()> {
        // Release the handle before renaming
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let backup_path = self.next_backup_path(Utc::now());
        if self.base_path.exists() {
            fs::rename(&self.base_path, &backup_path).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }

        let (file, size) = Self::open_file(&self.base_path).map_err(|e| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        self.file = Some(file);
        self.current_size = size;

        if self.policy.compress && backup_path.exists() {
            if let Err(e) = compress_file(&backup_path) {
                eprintln!(
                    "[WARN] Failed to compress rotated log {}: {}. Keeping it uncompressed.",
                    backup_path.display(),
                    e
                );
            }
        }

        self.prune_backups();
        Ok(())
    }

    fn directory(&self) -> PathBuf {
        match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// (`stem-`, `.ext`) pair that brackets the timestamp in backup names
    fn backup_affixes(&self) -> (String, String) {
        let stem = self
            .base_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app");
        let ext = self
            .base_path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (format!("{}-", stem), ext)
    }

    fn backup_path(&self, rotated_at: DateTime<Utc>) -> PathBuf {
        let (prefix, ext) = self.backup_affixes();
        self.directory().join(format!(
            "{}{}{}",
            prefix,
            rotated_at.format(BACKUP_TIME_FORMAT),
            ext
        ))
    }

    /// Backup path for `now`, bumped by a microsecond until no file claims it
    fn next_backup_path(&self, now: DateTime<Utc>) -> PathBuf {
        let mut rotated_at = now;
        loop {
            let candidate = self.backup_path(rotated_at);
            if !candidate.exists() && !with_suffix(&candidate, COMPRESSED_SUFFIX).exists() {
                return candidate;
            }
            rotated_at += chrono::Duration::microseconds(1);
        }
    }

    /// Parse the rotation time out of a backup file name
    fn parse_backup_time(&self, file_name: &str) -> Option<DateTime<Utc>> {
        let (prefix, ext) = self.backup_affixes();
        let name = file_name.strip_suffix(COMPRESSED_SUFFIX).unwrap_or(file_name);
        let stamp = name.strip_prefix(&prefix)?.strip_suffix(ext.as_str())?;
        NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Backups of this log, newest first
    fn list_backups(&self) -> Vec<Backup> {
        let entries = match fs::read_dir(self.directory()) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!(
                    "[WARN] Cannot list log directory {}: {}",
                    self.directory().display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut backups: Vec<Backup> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name();
                let rotated_at = self.parse_backup_time(name.to_str()?)?;
                Some(Backup {
                    path: entry.path(),
                    rotated_at,
                })
            })
            .collect();

        backups.sort_by(|a, b| b.rotated_at.cmp(&a.rotated_at));
        backups
    }

    /// Delete backups beyond the retained count or older than the retained age
    fn prune_backups(&self) {
        let cutoff = self
            .policy
            .max_age
            .and_then(|age| chrono::Duration::from_std(age).ok())
            .and_then(|age| Utc::now().checked_sub_signed(age));

        for (index, backup) in self.list_backups().into_iter().enumerate() {
            let over_count = self.policy.max_backups > 0 && index >= self.policy.max_backups;
            let too_old = cutoff.is_some_and(|cutoff| backup.rotated_at < cutoff);
            if !(over_count || too_old) {
                continue;
            }
            if let Err(e) = fs::remove_file(&backup.path) {
                eprintln!(
                    "[WARN] Failed to remove old backup {}: {}",
                    backup.path.display(),
                    e
                );
            }
        }
    }

    /// Get current file size
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    /// Get base path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Get rotation policy
    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Compress a log file with transactional safety using streaming I/O
///
/// The original is only deleted once the `.gz` file has been fully written
/// and moved into place.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, BufWriter};

    let gz_path = with_suffix(path, COMPRESSED_SUFFIX);
    let temp_gz_path = with_suffix(path, ".gz.tmp");

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!(
                "Failed to create temporary compressed file: {}",
                temp_gz_path.display()
            ),
            e,
        )
    })?;
    let buffered_output = BufWriter::with_capacity(64 * 1024, output);
    let mut encoder =
        flate2::write::GzEncoder::new(buffered_output, flate2::Compression::default());

    let streamed = std::io::copy(&mut reader, &mut encoder)
        .and_then(|_| encoder.finish())
        .and_then(|mut out| out.flush());
    if let Err(e) = streamed {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compression succeeded but failed to remove original file {}: {}. \
            Both compressed and uncompressed versions exist.",
            path.display(),
            e
        );
    }

    Ok(())
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, record: &str) -> Result<()> {
        let mut line = String::with_capacity(record.len() + 1);
        line.push_str(record);
        line.push('\n');
        let bytes_written = line.len() as u64;

        if self.should_rotate(bytes_written) {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.file.is_none() {
                    let (file, size) = Self::open_file(&self.base_path)?;
                    self.file = Some(file);
                    self.current_size = size;
                }

                // Let the file outgrow the limit rather than retry on every write
                self.current_size = 0;
            }
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Writer not initialized"))?;
        file.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += bytes_written;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }
    }
}
