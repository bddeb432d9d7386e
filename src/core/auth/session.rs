//! Persistent storage for the signed-in user.
//!
//! A single JSON record in the app data directory plays the role of the
//! browser's local storage entry.

use std::fs;
use std::path::PathBuf;

use super::user::User;
use crate::core::error::Result;

/// Storage key of the session record
pub const SESSION_KEY: &str = "user";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// # Arguments
    /// * `data_dir` - The app data directory (from Tauri's app_data_dir)
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", SESSION_KEY)),
        }
    }

    /// Read the persisted user. A missing or unreadable record yields `None`.
    pub fn load(&self) -> Option<User> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring corrupt session record {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
