use std::fmt;

/// Display name of an author as written in the favorites file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AuthorName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque catalog identifier of an author profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorId(String);

impl AuthorId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Locate the author's profile link in a search results page.
///
/// Looks (ASCII case-insensitively) for the first `>{name}<` and returns the
/// path segment that ends one character before it, e.g.
/// `<a href="/browse/byuser/42">alice</a>` yields `42`.
///
/// Only ASCII letters are case-folded: a name such as `Émile` must match the
/// page's spelling of its non-ASCII characters exactly.
pub fn find_author_id(body: &str, author: &AuthorName) -> Option<AuthorId> {
    if author.as_str().is_empty() {
        return None;
    }
    let marker = format!(">{}<", author.as_str()).to_ascii_lowercase();
    // ASCII lowercasing keeps byte offsets, so `index` is valid in `body` too.
    let index = body.to_ascii_lowercase().find(&marker)?;

    let (quote_start, _) = body[..index].char_indices().next_back()?;
    let prefix = &body[..quote_start];
    let start = prefix.rfind('/').map_or(0, |slash| slash + 1);
    let id = &prefix[start..];
    if id.is_empty() {
        None
    } else {
        Some(AuthorId::new(id))
    }
}
