use std::path::PathBuf;

use feed_engine::LibraryRefresh;
use feed_logging::feed_info;

/// Announces that the library changed. The game rescans on its next start.
pub struct LoggingRefresh {
    library_dir: PathBuf,
}

impl LoggingRefresh {
    pub fn new(library_dir: PathBuf) -> Self {
        Self { library_dir }
    }
}

impl LibraryRefresh for LoggingRefresh {
    fn refresh(&self) {
        feed_info!("Library refresh requested for {:?}", self.library_dir);
    }
}
