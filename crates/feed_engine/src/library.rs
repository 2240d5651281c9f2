use std::fs;
use std::path::{Path, PathBuf};

use feed_core::{stale_entries, WorkId};
use feed_logging::{feed_info, feed_warn};

use crate::persist::ensure_dir;
use crate::{FailureKind, FeedError};

/// The content library: one directory per installed work.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> Result<(), FeedError> {
        ensure_dir(&self.root).map_err(|err| FeedError::new(FailureKind::Filesystem, err.to_string()))
    }

    pub fn entry_path(&self, work: &WorkId) -> PathBuf {
        self.root.join(work.canonical_name())
    }

    pub fn has_entry(&self, work: &WorkId) -> bool {
        self.entry_path(work).is_dir()
    }

    /// Names of the top-level directories, sorted. Loose files are ignored.
    pub fn entry_names(&self) -> Result<Vec<String>, FeedError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|err| FeedError::filesystem(self.root.display(), err))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| FeedError::filesystem(self.root.display(), err))?;
            let is_dir = entry.file_type().map(|ty| ty.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete every other version of `current`'s work. Returns the removed names.
    ///
    /// Failures are logged and skipped; they never abort the caller.
    pub fn reconcile(&self, current: &WorkId) -> Vec<String> {
        let names = match self.entry_names() {
            Ok(names) => names,
            Err(err) => {
                feed_warn!("Cannot scan library for duplicates of {}: {}", current, err);
                return Vec::new();
            }
        };

        let mut removed = Vec::new();
        for name in stale_entries(current, names.iter().map(String::as_str)) {
            let path = self.root.join(&name);
            match fs::remove_dir_all(&path) {
                Ok(()) => {
                    feed_info!(
                        "Deleting duplicate song with identifier \"{}\" (current version: {})",
                        name,
                        current
                    );
                    removed.push(name);
                }
                Err(err) => {
                    feed_warn!("{}", FeedError::filesystem(path.display(), err));
                }
            }
        }
        removed
    }
}
