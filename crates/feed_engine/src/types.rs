use std::fmt;

use feed_core::WorkId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// A unit of work that did not succeed. Never fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FeedError {
    pub kind: FailureKind,
    pub message: String,
}

impl FeedError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn filesystem(context: impl fmt::Display, err: std::io::Error) -> Self {
        Self::new(FailureKind::Filesystem, format!("{context}: {err}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    ParseMiss,
    ArchiveCorrupt,
    Filesystem,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::ParseMiss => write!(f, "expected marker missing"),
            FailureKind::ArchiveCorrupt => write!(f, "archive could not be extracted"),
            FailureKind::Filesystem => write!(f, "filesystem error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Processed in an earlier run, even if the user has since deleted it.
    InHistory,
    /// A library directory with the canonical name already exists.
    AlreadyInstalled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { work: WorkId },
    Skipped { work: WorkId, reason: SkipReason },
    Failed { work: WorkId, error: FeedError },
}

impl InstallOutcome {
    pub fn work(&self) -> &WorkId {
        match self {
            InstallOutcome::Installed { work }
            | InstallOutcome::Skipped { work, .. }
            | InstallOutcome::Failed { work, .. } => work,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }
}
