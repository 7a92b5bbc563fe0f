//! Lookup manifest: entry → clip filename.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The durable mapping from every known entry to its clip filename. Written
/// after every run, including runs with per-entry failures, so it may name
/// files that do not exist yet; those entries are expected to be retried on
/// a later run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: String, filename: String) {
        self.entries.insert(entry, filename);
    }

    pub fn get(&self, entry: &str) -> Option<&str> {
        self.entries.get(entry).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.entries.iter()
    }

    /// Serialize as pretty-printed UTF-8 JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.entries)?;
        out.push('\n');
        Ok(out)
    }

    /// Write the manifest to disk. Filesystem errors here are fatal to the
    /// run.
    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Sum of on-disk sizes of every clip the manifest names; files that do
    /// not exist (failed entries) contribute nothing.
    pub fn total_audio_bytes(&self, audio_dir: &Path) -> u64 {
        self.entries
            .values()
            .filter_map(|f| std::fs::metadata(audio_dir.join(f)).ok())
            .map(|m| m.len())
            .sum()
    }
}

impl FromIterator<(String, String)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_is_indented_with_trailing_newline() {
        let mut manifest = Manifest::new();
        manifest.insert("一".to_string(), "e4b880.mp3".to_string());
        let json = manifest.to_json().unwrap();
        assert!(json.ends_with('\n'));
        assert!(json.contains("  \"一\": \"e4b880.mp3\""));
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let mut manifest = Manifest::new();
        manifest.insert("一".to_string(), "e4b880.mp3".to_string());
        manifest.insert("你好".to_string(), "e4bda0e5a5bd.mp3".to_string());
        manifest.write(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn test_one_key_per_entry() {
        let mut manifest = Manifest::new();
        manifest.insert("一".to_string(), "e4b880.mp3".to_string());
        manifest.insert("一".to_string(), "e4b880.mp3".to_string());
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_total_audio_bytes_ignores_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("e4b880.mp3"), b"12345").unwrap();
        let mut manifest = Manifest::new();
        manifest.insert("一".to_string(), "e4b880.mp3".to_string());
        manifest.insert("二".to_string(), "e4ba8c.mp3".to_string());
        assert_eq!(manifest.total_audio_bytes(dir.path()), 5);
    }
}
