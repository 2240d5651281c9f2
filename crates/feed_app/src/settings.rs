use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_core::PAGE_STRIDE;
use feed_engine::FetchSettings;
use feed_logging::feed_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SETTINGS_FILENAME: &str = "mapper_feed.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings from {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Optional `mapper_feed.ron` file. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog_url: String,
    pub library_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub history_file: PathBuf,
    pub favorites_file: PathBuf,
    pub page_stride: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_archive_bytes: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            catalog_url: "https://beatsaver.com".to_string(),
            library_dir: PathBuf::from("CustomSongs"),
            scratch_dir: PathBuf::from(".songcache"),
            history_file: Path::new("UserData").join("MapperFeedHistory.txt"),
            favorites_file: Path::new("UserData").join("FavoriteMappers.ini"),
            page_stride: PAGE_STRIDE,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_archive_bytes: fetch.max_bytes,
        }
    }
}

/// Settings paths made absolute against the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub library_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub history_file: PathBuf,
    pub favorites_file: PathBuf,
}

impl Settings {
    /// Read settings from `path`; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let settings = ron::from_str(&content).map_err(|err| SettingsError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        feed_info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn resolve(&self, base_dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            library_dir: base_dir.join(&self.library_dir),
            scratch_dir: base_dir.join(&self.scratch_dir),
            history_file: base_dir.join(&self.history_file),
            favorites_file: base_dir.join(&self.favorites_file),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_archive_bytes,
            ..FetchSettings::default()
        }
    }
}
