use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{Mode, SessionConfig, TIME_LIMITS, WORD_COUNTS};

/// Settings that survive between runs. Session history does not; only the
/// practice configuration is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub seconds: u64,
    pub words: usize,
    pub word_list: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::TimeLimited,
            seconds: 60,
            words: 25,
            word_list: "mixed".to_string(),
        }
    }
}

impl Config {
    /// Snap hand-edited or stale values back onto the fixed selectable
    /// sets.
    pub fn sanitized(mut self) -> Self {
        if !TIME_LIMITS.contains(&self.seconds) {
            self.seconds = Config::default().seconds;
        }
        if !WORD_COUNTS.contains(&self.words) {
            self.words = Config::default().words;
        }
        self
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            seconds: self.seconds,
            words: self.words,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "neotype") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("neotype_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            mode: Mode::WordLimited,
            seconds: 120,
            words: 50,
            word_list: "cyber".into(),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_corrupt_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn sanitize_snaps_values_onto_the_fixed_sets() {
        let cfg = Config {
            mode: Mode::TimeLimited,
            seconds: 45,
            words: 33,
            word_list: "mixed".into(),
        }
        .sanitized();

        assert_eq!(cfg.seconds, 60);
        assert_eq!(cfg.words, 25);

        let untouched = Config {
            mode: Mode::WordLimited,
            seconds: 15,
            words: 100,
            word_list: "common".into(),
        }
        .sanitized();

        assert_eq!(untouched.seconds, 15);
        assert_eq!(untouched.words, 100);
    }

    #[test]
    fn mode_is_stored_under_its_config_name() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"mode\":\"time\""));
    }
}
