use std::collections::BTreeSet;

use crate::WorkId;

/// Every work identifier that has been processed, in any run.
///
/// The set only grows. Iteration order is lexicographic, which is also the
/// order used when it is written back to disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadHistory {
    entries: BTreeSet<WorkId>,
}

impl DownloadHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the newline-delimited history format. Blank lines are skipped.
    pub fn from_text(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(WorkId::from)
            .collect()
    }

    /// Render one identifier per line, sorted, with a trailing newline.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for work in &self.entries {
            out.push_str(work.as_str());
            out.push('\n');
        }
        out
    }

    pub fn contains(&self, work: &WorkId) -> bool {
        self.entries.contains(work)
    }

    /// Returns `true` if the identifier was not already recorded.
    pub fn record(&mut self, work: WorkId) -> bool {
        self.entries.insert(work)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkId> {
        self.entries.iter()
    }
}

impl FromIterator<WorkId> for DownloadHistory {
    fn from_iter<T: IntoIterator<Item = WorkId>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
