use std::fmt;
use std::time::Duration;

use crate::AuthorName;

/// Per-author counters collected while walking the author's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub author: AuthorName,
    pub elapsed: Duration,
    /// Identifiers yielded by the listing.
    pub total: usize,
    /// Identifiers that were downloaded and installed in this run.
    pub downloaded: usize,
}

impl AuthorSummary {
    pub fn new(author: AuthorName) -> Self {
        Self {
            author,
            elapsed: Duration::ZERO,
            total: 0,
            downloaded: 0,
        }
    }

    pub fn skipped(&self) -> usize {
        self.total.saturating_sub(self.downloaded)
    }
}

impl fmt::Display for AuthorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Downloaded {} songs from {} in {} seconds. Skipped {} songs.",
            self.downloaded,
            self.author,
            self.elapsed.as_secs(),
            self.skipped()
        )
    }
}

/// Outcome of a whole run across every queued author.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunReport {
    pub authors: Vec<AuthorSummary>,
    /// Authors whose catalog id could not be resolved.
    pub unresolved: Vec<AuthorName>,
    /// False when the history file could not be written.
    pub history_saved: bool,
}

impl RunReport {
    pub fn downloaded(&self) -> usize {
        self.authors.iter().map(|summary| summary.downloaded).sum()
    }

    pub fn skipped(&self) -> usize {
        self.authors.iter().map(AuthorSummary::skipped).sum()
    }
}
