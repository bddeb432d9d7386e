//! User record and display preferences.
//!
//! NOTE: TypeScript mirror types are in ui/types.ts

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::model::{Category, Priority};

/// Avatar assigned to every mock account
pub const DEFAULT_AVATAR: &str = "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg";

/// Id given to every mock account
pub const MOCK_USER_ID: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub email_notifications: bool,
    pub push_notifications: bool,
    /// Visibility per category
    pub categories: BTreeMap<Category, bool>,
    /// Visibility per priority
    pub priorities: BTreeMap<Priority, bool>,
    #[serde(default)]
    pub auto_archive: bool,
    #[serde(default)]
    pub sound_enabled: bool,
    #[serde(default)]
    pub compact_view: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        let categories = Category::all()
            .iter()
            .map(|c| (*c, !matches!(c, Category::Social | Category::Marketing)))
            .collect();
        let priorities = Priority::all().iter().map(|p| (*p, true)).collect();

        Self {
            theme: Theme::System,
            email_notifications: true,
            push_notifications: true,
            categories,
            priorities,
            auto_archive: false,
            sound_enabled: false,
            compact_view: false,
        }
    }
}

impl UserPreferences {
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(value) = patch.email_notifications {
            self.email_notifications = value;
        }
        if let Some(value) = patch.push_notifications {
            self.push_notifications = value;
        }
        if let Some(categories) = patch.categories {
            self.categories.extend(categories);
        }
        if let Some(priorities) = patch.priorities {
            self.priorities.extend(priorities);
        }
        if let Some(value) = patch.auto_archive {
            self.auto_archive = value;
        }
        if let Some(value) = patch.sound_enabled {
            self.sound_enabled = value;
        }
        if let Some(value) = patch.compact_view {
            self.compact_view = value;
        }
    }
}

/// Partial preference update from the settings screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub categories: Option<BTreeMap<Category, bool>>,
    pub priorities: Option<BTreeMap<Priority, bool>>,
    pub auto_archive: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub compact_view: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub preferences: UserPreferences,
}

impl User {
    /// Account synthesized by the mock login/register flow.
    pub fn mock(email: &str, name: &str) -> Self {
        Self {
            id: MOCK_USER_ID.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
            preferences: UserPreferences::default(),
        }
    }
}

/// Display name derived from an email: the part before `@`.
pub fn name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
