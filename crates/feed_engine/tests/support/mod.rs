#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use feed_core::{AuthorId, AuthorName, WorkId};
use feed_engine::{Catalog, FailureKind, FeedError};
use zip::write::SimpleFileOptions;

pub fn init_logging() {
    feed_logging::initialize_for_tests();
}

/// Build an in-memory zip holding `(path, content)` entries.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (path, content) in entries {
        writer.start_file(*path, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Archive with a single top-level directory, as the catalog serves them.
pub fn song_zip(dir: &str) -> Vec<u8> {
    zip_bytes(&[
        (&format!("{dir}/info.dat"), "{\"songName\":\"test\"}"),
        (&format!("{dir}/Expert.dat"), "{}"),
    ])
}

/// In-memory catalog that records what was asked of it.
#[derive(Default)]
pub struct FakeCatalog {
    pub authors: HashMap<String, String>,
    pub pages: HashMap<u32, Result<Vec<WorkId>, FeedError>>,
    pub archives: HashMap<String, Vec<u8>>,
    pub page_requests: Arc<Mutex<Vec<u32>>>,
    pub downloads: Arc<Mutex<Vec<WorkId>>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, offset: u32, works: &[&str]) -> Self {
        self.pages
            .insert(offset, Ok(works.iter().copied().map(WorkId::from).collect()));
        self
    }

    pub fn with_failing_page(mut self, offset: u32) -> Self {
        self.pages.insert(
            offset,
            Err(FeedError::new(FailureKind::HttpStatus(500), "boom")),
        );
        self
    }

    pub fn with_archive(mut self, work: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(work.to_string(), bytes);
        self
    }

    pub fn page_requests(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<WorkId> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Catalog for FakeCatalog {
    async fn resolve_author(&self, author: &AuthorName) -> Result<Option<AuthorId>, FeedError> {
        Ok(self.authors.get(author.as_str()).map(AuthorId::new))
    }

    async fn list_page(&self, _author: &AuthorId, offset: u32) -> Result<Vec<WorkId>, FeedError> {
        self.page_requests.lock().unwrap().push(offset);
        self.pages.get(&offset).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn download_archive(&self, work: &WorkId) -> Result<Vec<u8>, FeedError> {
        self.downloads.lock().unwrap().push(work.clone());
        self.archives
            .get(work.as_str())
            .cloned()
            .ok_or_else(|| FeedError::new(FailureKind::HttpStatus(404), "not found"))
    }
}
