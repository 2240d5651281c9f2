use std::fs;
use std::io;
use std::path::Path;

use feed_core::{AuthorQueue, DEFAULT_AUTHORS};
use feed_logging::feed_info;

/// Read the favorites file, creating it with the default authors if absent.
pub fn load_or_create(path: &Path) -> io::Result<AuthorQueue> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut content = DEFAULT_AUTHORS.join("\n");
        content.push('\n');
        fs::write(path, content)?;
        feed_info!("Created {:?} with the default mappers", path);
    }

    let queue = AuthorQueue::from_text(&fs::read_to_string(path)?);
    feed_info!("{} mappers queued from {:?}", queue.len(), path);
    Ok(queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::AuthorName;
    use tempfile::TempDir;

    #[test]
    fn creates_default_list_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("UserData").join("FavoriteMappers.ini");

        let mut queue = load_or_create(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(AuthorName::from("freeek")));
    }

    #[test]
    fn existing_file_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("FavoriteMappers.ini");
        fs::write(&path, "alice\n\nbob\n").unwrap();

        let queue = load_or_create(&path).unwrap();
        assert_eq!(queue.len(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "alice\n\nbob\n");
    }
}
