use std::fmt;

const VERSION_SEPARATOR: char = '-';

/// Catalog identifier of one version of one work, e.g. `1a2b-3`.
///
/// The part before the first `-` is the base id shared by every version of
/// the work. Identifiers without a dash are their own base id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkId(String);

impl WorkId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn base_id(&self) -> &str {
        self.split().0
    }

    pub fn version(&self) -> &str {
        self.split().1
    }

    /// Directory name the work occupies in the library.
    pub fn canonical_name(&self) -> &str {
        &self.0
    }

    /// True when the identifier can be used as a single path component.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty()
            && self.0 != "."
            && self.0 != ".."
            && !self
                .0
                .chars()
                .any(|c| matches!(c, '/' | '\\' | ':' | '\0'..='\u{1F}'))
    }

    fn split(&self) -> (&str, &str) {
        self.0
            .split_once(VERSION_SEPARATOR)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for WorkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
