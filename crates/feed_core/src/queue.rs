use std::collections::VecDeque;

use crate::AuthorName;

/// Authors written to a freshly created favorites file.
pub const DEFAULT_AUTHORS: [&str; 3] = ["freeek", "purphoros", "bennydabeast"];

/// Parse the favorites file: one author per line, trimmed.
///
/// Blank lines and lines starting with `#` or `;` are ignored.
pub fn parse_authors(raw: &str) -> Vec<AuthorName> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .map(AuthorName::from)
        .collect()
}

/// Authors still waiting to be processed in this run, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorQueue {
    pending: VecDeque<AuthorName>,
}

impl AuthorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(raw: &str) -> Self {
        parse_authors(raw).into_iter().collect()
    }

    pub fn push(&mut self, author: AuthorName) {
        self.pending.push_back(author);
    }

    /// Next author, taken from the front: the favorites file runs top to bottom.
    pub fn pop(&mut self) -> Option<AuthorName> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FromIterator<AuthorName> for AuthorQueue {
    fn from_iter<T: IntoIterator<Item = AuthorName>>(iter: T) -> Self {
        Self {
            pending: iter.into_iter().collect(),
        }
    }
}
