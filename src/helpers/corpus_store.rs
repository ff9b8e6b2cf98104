use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

fn file_stem(name: &str) -> String {
    name.chars()
        .enumerate()
        .map(|(i, c)| match c {
            '/' | '\\' => '_',
            '.' if i == 0 => '_',
            _ => c,
        })
        .collect()
}

/// Flat text files holding finished corpora, one `<name>Text.txt` per corpus
#[derive(Debug, Clone)]
pub struct CorpusStore {
    dir: PathBuf,
}

impl CorpusStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a corpus with this name is stored in
    ///
    /// Path separators and a leading dot in the name become `_`, so every
    /// name maps to a file directly inside the store directory.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}Text.txt", file_stem(name)))
    }

    /// Write a corpus, replacing any earlier one with the same name
    pub fn save(&self, name: &str, text: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        fs::write(&path, text)?;
        info!("Saved corpus '{}' ({} bytes) to {}", name, text.len(), path.display());
        Ok(path)
    }

    /// Read a stored corpus back
    pub fn retrieve(&self, name: &str) -> io::Result<String> {
        let path = self.path_for(name);
        debug!("Reading corpus '{}' from {}", name, path.display());
        fs::read_to_string(path)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_retrieve() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());
        let path = store.save("Drake", "first\nsecond ünïcode").unwrap();
        assert_eq!(path, dir.path().join("DrakeText.txt"));
        assert!(store.exists("Drake"));
        assert_eq!(store.retrieve("Drake").unwrap(), "first\nsecond ünïcode");
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path().join("corpora").join("rock"));
        store.save("rock", "words").unwrap();
        assert_eq!(store.retrieve("rock").unwrap(), "words");
    }

    #[test]
    fn test_name_with_slash_stays_in_directory() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());
        let path = store.save("AC/DC", "Highway to hell").unwrap();
        assert_eq!(path, dir.path().join("AC_DCText.txt"));
        assert!(store.exists("AC/DC"));
        assert_eq!(store.retrieve("AC/DC").unwrap(), "Highway to hell");
    }

    #[test]
    fn test_relative_name_cannot_leave_directory() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path().join("corpora"));
        let path = store.save("../x", "words").unwrap();
        assert_eq!(path.parent(), Some(store.dir()));
        assert_eq!(path.file_name().unwrap(), "_._xText.txt");
        assert!(!dir.path().join("xText.txt").exists());
        assert_eq!(store.path_for("Dr.Dre"), store.dir().join("Dr.DreText.txt"));
        assert_eq!(store.path_for(r"a\b"), store.dir().join("a_bText.txt"));
    }

    #[test]
    fn test_missing_corpus_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = CorpusStore::new(dir.path());
        assert!(!store.exists("Nobody"));
        let err = store.retrieve("Nobody").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
