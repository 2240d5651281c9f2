use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use feed_core::{DownloadHistory, WorkId};
use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::{Catalog, FailureKind, FeedError, InstallOutcome, Library, SkipReason};

/// Working directory for the one download currently in flight.
#[derive(Debug, Clone)]
pub struct ScratchCache {
    dir: PathBuf,
}

impl ScratchCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn archive_path(&self, work: &WorkId) -> PathBuf {
        self.dir.join(format!("{}.zip", work.canonical_name()))
    }

    /// Create the directory if needed and delete everything inside it.
    pub fn clear(&self) -> Result<(), FeedError> {
        fs::create_dir_all(&self.dir).map_err(|err| FeedError::filesystem(self.dir.display(), err))?;
        empty_dir(&self.dir).map_err(|err| FeedError::filesystem(self.dir.display(), err))
    }

    /// Remove the directory and its contents. Missing is fine.
    pub fn remove(&self) -> Result<(), FeedError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(FeedError::filesystem(self.dir.display(), err)),
        }
    }
}

/// Downloads a work's archive and installs it into the library.
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    scratch: ScratchCache,
}

impl ArchiveFetcher {
    pub fn new(scratch: ScratchCache) -> Self {
        Self { scratch }
    }

    pub fn scratch(&self) -> &ScratchCache {
        &self.scratch
    }

    /// Install `work` unless it is already known. Never returns an error:
    /// failures are logged and reported as [`InstallOutcome::Failed`].
    pub async fn install(
        &self,
        catalog: &dyn Catalog,
        history: &DownloadHistory,
        library: &Library,
        work: &WorkId,
    ) -> InstallOutcome {
        let reason = if history.contains(work) {
            Some(SkipReason::InHistory)
        } else if library.has_entry(work) {
            Some(SkipReason::AlreadyInstalled)
        } else {
            None
        };
        if let Some(reason) = reason {
            feed_debug!("Skipping {} ({:?})", work, reason);
            return InstallOutcome::Skipped {
                work: work.clone(),
                reason,
            };
        }

        match self.download_and_install(catalog, library, work).await {
            Ok(()) => {
                feed_info!("Installed {} into {:?}", work, library.entry_path(work));
                InstallOutcome::Installed { work: work.clone() }
            }
            Err(error) => {
                feed_warn!("Failed to install {}: {}", work, error);
                InstallOutcome::Failed {
                    work: work.clone(),
                    error,
                }
            }
        }
    }

    async fn download_and_install(
        &self,
        catalog: &dyn Catalog,
        library: &Library,
        work: &WorkId,
    ) -> Result<(), FeedError> {
        // Leftovers of an earlier failed attempt must not mix with this payload.
        self.scratch.clear()?;

        let bytes = catalog.download_archive(work).await?;
        let archive = self.scratch.archive_path(work);
        fs::write(&archive, &bytes).map_err(|err| FeedError::filesystem(archive.display(), err))?;

        let scratch = self.scratch.dir().to_path_buf();
        let target = library.entry_path(work);
        tokio::task::spawn_blocking(move || unpack_into_library(&archive, &scratch, &target))
            .await
            .map_err(|err| FeedError::new(FailureKind::Filesystem, err.to_string()))?
    }
}

fn unpack_into_library(archive: &Path, scratch: &Path, target: &Path) -> Result<(), FeedError> {
    let extracted = extract_archive(archive, scratch);
    if let Err(err) = fs::remove_file(archive) {
        feed_warn!("{}", FeedError::filesystem(archive.display(), err));
    }
    extracted?;
    install_payload(scratch, target)
}

/// Extract a zip archive into `dest`.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<(), FeedError> {
    let file = fs::File::open(archive).map_err(|err| FeedError::filesystem(archive.display(), err))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|err| FeedError::new(FailureKind::ArchiveCorrupt, err.to_string()))?;
    zip.extract(dest)
        .map_err(|err| FeedError::new(FailureKind::ArchiveCorrupt, err.to_string()))
}

/// Move the extracted payload from `scratch` to `target`.
///
/// A single top-level directory becomes `target` itself. Any other layout
/// (loose files, several directories) is moved inside a new `target`.
pub fn install_payload(scratch: &Path, target: &Path) -> Result<(), FeedError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(scratch).map_err(|err| FeedError::filesystem(scratch.display(), err))? {
        let entry = entry.map_err(|err| FeedError::filesystem(scratch.display(), err))?;
        entries.push(entry.path());
    }
    entries.sort();

    match entries.as_slice() {
        [] => Err(FeedError::new(FailureKind::ArchiveCorrupt, "archive is empty")),
        [single] if single.is_dir() => move_path(single, target),
        _ => {
            let dirs = entries.iter().filter(|path| path.is_dir()).count();
            if dirs > 1 {
                feed_warn!(
                    "Archive for {:?} holds {} top-level directories; installing all of them inside it",
                    target,
                    dirs
                );
            }
            fs::create_dir_all(target).map_err(|err| FeedError::filesystem(target.display(), err))?;
            for path in &entries {
                let Some(name) = path.file_name() else {
                    continue;
                };
                move_path(path, &target.join(name))?;
            }
            Ok(())
        }
    }
}

/// Rename, falling back to copy-and-delete when crossing filesystems.
fn move_path(from: &Path, to: &Path) -> Result<(), FeedError> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    let copied = if from.is_dir() {
        copy_dir_all(from, to).and_then(|()| fs::remove_dir_all(from))
    } else {
        fs::copy(from, to).and_then(|_| fs::remove_file(from))
    };
    copied.map_err(|err| FeedError::filesystem(to.display(), err))
}

fn copy_dir_all(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let dest = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), dest)?;
        }
    }
    Ok(())
}

fn empty_dir(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
