//! Append-only log of executed `exchange` commands.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::ChatError;

/// Writes one line per executed `exchange` command to a text file.
///
/// Appends are serialized so concurrent connections never interleave
/// partial lines.
#[derive(Debug)]
pub struct ExchangeLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ExchangeLog {
    /// Creates a log writing to `path`. The file is created on first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the file this log appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an entry stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Io`] if the file cannot be opened or written.
    pub async fn record(&self) -> Result<(), ChatError> {
        self.record_at(Local::now()).await
    }

    /// Appends an entry stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Io`] if the file cannot be opened or written.
    pub async fn record_at<Tz: TimeZone>(&self, at: DateTime<Tz>) -> Result<(), ChatError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let line = entry_line(&at);
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Formats one log line: `"{YYYY-mm-dd HH:MM:SS}: 'exchange' command executed\n"`.
#[must_use]
pub fn entry_line<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}: 'exchange' command executed\n",
        at.format("%Y-%m-%d %H:%M:%S")
    )
}
