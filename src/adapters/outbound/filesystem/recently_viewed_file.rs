use crate::inspection::domain::{Gav, RecentlyViewed};
use crate::ports::outbound::RecentlyViewedStore;
use crate::shared::error::JarHellError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "jar-hell";
const STATE_FILE: &str = "state.json";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    #[serde(default)]
    recently_viewed: Vec<Gav>,
}

/// JsonFileRecentlyViewedStore adapter persisting the log as JSON
///
/// The file looks like `{"recentlyViewed": [{"groupId": ..., ...}]}`.
/// A missing file is an empty log; parent directories are created on save.
pub struct JsonFileRecentlyViewedStore {
    path: PathBuf,
}

impl JsonFileRecentlyViewedStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store in the platform data directory, e.g. `~/.local/share/jar-hell/state.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR).join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, details: impl Into<String>) -> anyhow::Error {
        JarHellError::FileReadError {
            path: self.path.clone(),
            details: details.into(),
        }
        .into()
    }

    fn write_error(&self, details: impl Into<String>) -> anyhow::Error {
        JarHellError::FileWriteError {
            path: self.path.clone(),
            details: details.into(),
        }
        .into()
    }
}

impl RecentlyViewedStore for JsonFileRecentlyViewedStore {
    fn load(&self) -> Result<RecentlyViewed> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RecentlyViewed::default()),
            Err(e) => return Err(self.read_error(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(RecentlyViewed::default());
        }
        let state: StateFile = serde_json::from_str(&content)
            .map_err(|e| self.read_error(format!("Invalid state file: {}", e)))?;
        Ok(RecentlyViewed::from_entries(state.recently_viewed))
    }

    fn save(&self, log: &RecentlyViewed) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if parent != Path::new("") {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e.to_string()))?;
            }
        }
        let state = StateFile {
            recently_viewed: log.entries().to_vec(),
        };
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| self.write_error(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| self.write_error(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), entries = log.entries().len(), "saved recently viewed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileRecentlyViewedStore::new(temp_dir.path().join("state.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("state.json");
        let store = JsonFileRecentlyViewedStore::new(path.clone());

        let mut log = RecentlyViewed::default();
        log.record(Gav::new("org.slf4j", "slf4j-api", "2.0.9"));
        log.record(Gav::new("junit", "junit", "4.13.2"));
        store.save(&log).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["recentlyViewed"][0]["artifactId"], "junit");

        assert_eq!(store.load().unwrap(), log);
    }

    #[test]
    fn test_load_reapplies_rules() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"recentlyViewed": [
                {"groupId": "g", "artifactId": "a", "version": "2"},
                {"groupId": "g", "artifactId": "a", "version": "1"}
            ]}"#,
        )
        .unwrap();

        let log = JsonFileRecentlyViewedStore::new(path).load().unwrap();
        assert_eq!(log.entries(), &[Gav::new("g", "a", "2")]);
    }

    #[test]
    fn test_corrupt_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileRecentlyViewedStore::new(path).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JarHellError>(),
            Some(JarHellError::FileReadError { .. })
        ));
    }
}
