use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::filter::View;

/// Application settings.
/// NOTE: TypeScript mirror types are in ui/types.ts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Simulated round-trip for mock login/register
    #[serde(default = "default_auth_latency_ms")]
    pub auth_latency_ms: u64,
    /// Load the demo notifications and templates on startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    /// View shown after startup
    #[serde(default)]
    pub startup_view: View,
}

fn default_auth_latency_ms() -> u64 {
    1000
}

fn default_seed_demo_data() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_latency_ms: default_auth_latency_ms(),
            seed_demo_data: default_seed_demo_data(),
            startup_view: View::Dashboard,
        }
    }
}

impl Settings {
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(app_config_dir: PathBuf) -> Self {
        Self {
            config_path: app_config_dir.join("settings.json"),
        }
    }

    pub fn load(&self) -> Settings {
        if self.config_path.exists() {
            if let Ok(content) = fs::read_to_string(&self.config_path) {
                match serde_json::from_str(&content) {
                    Ok(settings) => return settings,
                    Err(e) => log::warn!("Invalid settings file {:?}: {}", self.config_path, e),
                }
            }
        }
        Settings::default()
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.config_path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().to_path_buf());

        let default = manager.load();
        assert_eq!(default.auth_latency_ms, 1000);
        assert!(default.seed_demo_data);

        let new_settings = Settings {
            auth_latency_ms: 0,
            seed_demo_data: false,
            startup_view: View::Unread,
        };

        manager.save(&new_settings).unwrap();
        let loaded = manager.load();

        assert_eq!(loaded, new_settings);
        assert_eq!(loaded.auth_latency(), Duration::ZERO);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().to_path_buf());
        fs::write(dir.path().join("settings.json"), r#"{"startup_view": "all"}"#).unwrap();

        let loaded = manager.load();
        assert_eq!(loaded.startup_view, View::All);
        assert_eq!(loaded.auth_latency_ms, 1000);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::new(dir.path().to_path_buf());
        fs::write(dir.path().join("settings.json"), "][").unwrap();
        assert_eq!(manager.load(), Settings::default());
    }
}
