use feed_core::{find_author_id, scan_work_ids, AuthorId, AuthorName, WorkId};
use feed_logging::{feed_debug, feed_warn};
use url::Url;

use crate::decode::decode_page_lossy;
use crate::{FailureKind, FeedError, Fetcher};

/// The remote catalog, as seen by the pipeline.
///
/// Everything that knows how the catalog's pages look lives behind this
/// trait, so a structured API client can replace the scraper.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Find the catalog id for a display name. `Ok(None)` means the catalog
    /// answered but the author was not on the page.
    async fn resolve_author(&self, author: &AuthorName) -> Result<Option<AuthorId>, FeedError>;

    /// Work identifiers on the listing page starting at `offset`.
    async fn list_page(&self, author: &AuthorId, offset: u32) -> Result<Vec<WorkId>, FeedError>;

    /// Raw archive bytes for one work.
    async fn download_archive(&self, work: &WorkId) -> Result<Vec<u8>, FeedError>;
}

/// Catalog backed by the website's HTML pages.
pub struct WebCatalog<F> {
    fetcher: F,
    base: Url,
}

impl<F: Fetcher> WebCatalog<F> {
    pub fn new(fetcher: F, base_url: &str) -> Result<Self, FeedError> {
        let base = Url::parse(base_url)
            .map_err(|err| FeedError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FeedError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a catalog base"),
            ));
        }
        Ok(Self { fetcher, base })
    }

    pub fn search_url(&self, author: &AuthorName) -> Url {
        self.endpoint(&["search", "all", author.as_str()])
    }

    pub fn listing_url(&self, author: &AuthorId, offset: u32) -> Url {
        self.endpoint(&["browse", "byuser", author.as_str(), &offset.to_string()])
    }

    pub fn download_url(&self, work: &WorkId) -> Url {
        self.endpoint(&["download", work.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, FeedError> {
        let output = self.fetcher.fetch(url.as_str()).await?;
        let page = decode_page_lossy(&output.bytes, output.metadata.content_type.as_deref());
        feed_debug!(
            "Fetched {} ({} bytes, {} redirects, {})",
            output.metadata.final_url,
            output.metadata.byte_len,
            output.metadata.redirect_count,
            page.encoding_label
        );
        Ok(page.text)
    }
}

#[async_trait::async_trait]
impl<F: Fetcher> Catalog for WebCatalog<F> {
    async fn resolve_author(&self, author: &AuthorName) -> Result<Option<AuthorId>, FeedError> {
        let body = self.fetch_text(&self.search_url(author)).await?;
        let found = find_author_id(&body, author);
        if found.is_none() {
            feed_warn!(
                "{}",
                FeedError::new(
                    FailureKind::ParseMiss,
                    format!("no profile link for {author} on the search page"),
                )
            );
        }
        Ok(found)
    }

    async fn list_page(&self, author: &AuthorId, offset: u32) -> Result<Vec<WorkId>, FeedError> {
        let body = self.fetch_text(&self.listing_url(author, offset)).await?;
        Ok(scan_work_ids(&body))
    }

    async fn download_archive(&self, work: &WorkId) -> Result<Vec<u8>, FeedError> {
        let output = self.fetcher.fetch(self.download_url(work).as_str()).await?;
        Ok(output.bytes)
    }
}
