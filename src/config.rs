use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::app_dirs::AppDirs;
use crate::ui::{BarLayout, DEFAULT_BAR_MARGIN, DEFAULT_MAX_BAR_WIDTH};

pub const DEFAULT_TICK_RATE_MS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub tick_rate_ms: u64,
    pub max_bar_width: u16,
    pub bar_margin: u16,
    pub notifications: bool,
    /// A failed notification ends the program when set, otherwise it is only logged
    pub abort_on_notify_error: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            max_bar_width: DEFAULT_MAX_BAR_WIDTH,
            bar_margin: DEFAULT_BAR_MARGIN,
            notifications: true,
            abort_on_notify_error: true,
        }
    }
}

impl Settings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn bar_layout(&self) -> BarLayout {
        BarLayout::new(self.max_bar_width, self.bar_margin)
    }
}

pub trait SettingsStore {
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like `load`, but writes the defaults out on first run so there is a file to edit
    pub fn load_or_create(&self) -> Settings {
        if self.path.exists() {
            return self.load();
        }

        let settings = Settings::default();
        match self.save(&settings) {
            Ok(()) => info!(path = %self.path.display(), "wrote default settings"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not write default settings"),
        }
        settings
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Settings {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Settings::default(),
        };

        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed settings file");
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(settings).map_err(std::io::Error::from)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_settings() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("settings.json"));
        let settings = Settings::default();
        store.save(&settings).unwrap();
        assert_eq!(settings, store.load());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileSettingsStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(FileSettingsStore::with_path(&path).load(), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, br#"{ "abort_on_notify_error": false, "max_bar_width": 40 }"#).unwrap();

        let loaded = FileSettingsStore::with_path(&path).load();
        assert!(!loaded.abort_on_notify_error);
        assert_eq!(loaded.max_bar_width, 40);
        assert_eq!(loaded.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert!(loaded.notifications);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("settings.json");
        let store = FileSettingsStore::with_path(&path);
        store.save(&Settings::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn first_run_writes_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("moveit").join("settings.json");
        let store = FileSettingsStore::with_path(&path);

        assert_eq!(store.load_or_create(), Settings::default());
        assert!(path.exists());
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, br#"{ "notifications": false }"#).unwrap();

        let loaded = FileSettingsStore::with_path(&path).load_or_create();
        assert!(!loaded.notifications);
        assert_eq!(fs::read(&path).unwrap(), br#"{ "notifications": false }"#);
    }

    #[test]
    fn tick_interval_never_zero() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
        assert_eq!(
            Settings::default().bar_layout(),
            BarLayout::new(DEFAULT_MAX_BAR_WIDTH, DEFAULT_BAR_MARGIN)
        );
    }
}
