use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use feed_core::DownloadHistory;
use feed_logging::{feed_info, feed_warn};

use crate::persist::{AtomicFileWriter, PersistError};

/// Newline-delimited history file, e.g. `UserData/MapperFeedHistory.txt`.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the history. A missing file yields an empty history.
    ///
    /// Bytes that are not valid UTF-8 only cost the line they sit on; the
    /// rest of the file is kept. Any other read failure is returned so the
    /// caller can avoid overwriting a file it never saw.
    pub fn load(&self) -> Result<DownloadHistory, PersistError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(DownloadHistory::new());
            }
            Err(err) => return Err(PersistError::Io(err)),
        };

        let content = String::from_utf8_lossy(&bytes);
        let mut dropped = 0usize;
        let readable: Vec<&str> = content
            .lines()
            .filter(|line| {
                let garbled = line.contains(char::REPLACEMENT_CHARACTER);
                dropped += usize::from(garbled);
                !garbled
            })
            .collect();
        if dropped > 0 {
            feed_warn!(
                "Ignored {} undecodable line(s) in download history {:?}",
                dropped,
                self.path
            );
        }

        let history = DownloadHistory::from_text(&readable.join("\n"));
        feed_info!(
            "Loaded {} history entries from {:?}",
            history.len(),
            self.path
        );
        Ok(history)
    }

    /// Replace the history file with the sorted contents of `history`.
    pub fn save(&self, history: &DownloadHistory) -> Result<(), PersistError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::Dir(format!("invalid history path {:?}", self.path)))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        AtomicFileWriter::new(dir).write(filename, &history.to_text())?;
        feed_info!("Saved {} history entries to {:?}", history.len(), self.path);
        Ok(())
    }
}
