use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::WatcherResult;
use crate::storage::traits::FeedStore;

/// Writes `<dir>/<name>.xml`, overwriting on every run.
#[derive(Debug, Clone)]
pub struct FsFeedStore {
    dir: PathBuf,
}

impl FsFeedStore {
    /// Create the output directory if needed. Must succeed before any source
    /// is processed.
    pub fn init<P: AsRef<Path>>(dir: P) -> WatcherResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Output directory ready");

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.xml", name))
    }
}

impl FeedStore for FsFeedStore {
    fn write(&self, name: &str, xml: &str) -> WatcherResult<PathBuf> {
        let path = self.path_for(name);
        fs::write(&path, xml)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("public").join("feeds");

        let store = FsFeedStore::init(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[test]
    fn test_write_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FsFeedStore::init(temp_dir.path()).unwrap();

        store.write("casc-zzfb", "<rss>old</rss>").unwrap();
        let path = store.write("casc-zzfb", "<rss>new</rss>").unwrap();

        assert_eq!(path, temp_dir.path().join("casc-zzfb.xml"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<rss>new</rss>");
    }

    #[test]
    fn test_init_fails_when_path_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("feeds");
        fs::write(&file, "not a dir").unwrap();

        assert!(FsFeedStore::init(&file).is_err());
    }
}
