//! JSON export/import of notifications and templates.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::model::{Notification, NotificationTemplate};
use super::store::NotificationStore;

pub const BACKUP_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub format_version: u32,
    pub exported_at: DateTime<Utc>,
    pub notifications: Vec<Notification>,
    pub templates: Vec<NotificationTemplate>,
}

impl Backup {
    /// Snapshot of every notification (bin included) and template.
    pub fn from_store(store: &NotificationStore) -> Self {
        Self {
            format_version: BACKUP_FORMAT_VERSION,
            exported_at: Utc::now(),
            notifications: store.notifications().to_vec(),
            templates: store.templates().to_vec(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::info!(
            "Exported {} notifications and {} templates to {:?}",
            self.notifications.len(),
            self.templates.len(),
            path
        );
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let backup: Self = serde_json::from_str(&content)?;
        if backup.format_version != BACKUP_FORMAT_VERSION {
            return Err(Error::UnsupportedBackup(backup.format_version));
        }
        Ok(backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exports/backup.json");
        let store = NotificationStore::with_seed_data(Utc::now());

        Backup::from_store(&store).write_to(&path).unwrap();
        let loaded = Backup::read_from(&path).unwrap();

        assert_eq!(loaded.notifications, store.notifications());
        assert_eq!(loaded.templates, store.templates());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let mut backup = Backup::from_store(&NotificationStore::new());
        backup.format_version = 99;
        backup.write_to(&path).unwrap();

        match Backup::read_from(&path) {
            Err(Error::UnsupportedBackup(99)) => {}
            other => panic!("expected unsupported version, got {:?}", other.map(|b| b.format_version)),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = Backup::read_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_garbage_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Backup::read_from(&path), Err(Error::Json(_))));
    }
}
