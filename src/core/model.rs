//! Notification and template records.
//!
//! NOTE: TypeScript mirror types are in ui/types.ts
//! Keep both files in sync when modifying data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::template;

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    System,
    Security,
    Updates,
    Social,
    Marketing,
    Alerts,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Self::System,
            Self::Security,
            Self::Updates,
            Self::Social,
            Self::Marketing,
            Self::Alerts,
        ]
    }
}

/// Notification priority, ordered low < medium < high < critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

/// Lifecycle status of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unread,
    Read,
    Archived,
    Deleted,
}

impl Status {
    /// Every status except `Deleted`.
    pub fn live() -> &'static [Status] {
        &[Self::Unread, Self::Read, Self::Archived]
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    /// Template this notification was instantiated from
    #[serde(default, rename = "template", skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Build a notification from creation input.
    pub fn new(id: String, input: NewNotification, now: DateTime<Utc>) -> Self {
        let mut notification = Self {
            id,
            title: input.title,
            message: input.message,
            category: input.category,
            priority: input.priority,
            status: Status::Unread,
            created_at: now,
            updated_at: now,
            user_id: input.user_id,
            action_url: input.action_url,
            template_id: input.template_id,
            deleted_at: None,
        };
        notification.set_status(input.status, now);
        notification
    }

    /// Change status, keeping `deleted_at` set exactly while deleted.
    pub fn set_status(&mut self, status: Status, now: DateTime<Utc>) {
        self.status = status;
        if status.is_deleted() {
            if self.deleted_at.is_none() {
                self.deleted_at = Some(now);
            }
        } else {
            self.deleted_at = None;
        }
    }

    /// Merge a partial update and refresh `updated_at`.
    pub fn apply(&mut self, patch: NotificationPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(action_url) = patch.action_url {
            self.action_url = Some(action_url).filter(|url| !url.is_empty());
        }
        if let Some(status) = patch.status {
            self.set_status(status, now);
        }
        self.updated_at = now;
    }

    /// Repair records whose `deleted_at` disagrees with their status.
    pub fn normalize(&mut self) {
        let stamp = self.updated_at;
        self.set_status(self.status, stamp);
    }

    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }
}

/// Input for creating a notification; id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: Status,
    pub user_id: String,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default, rename = "template")]
    pub template_id: Option<String>,
}

fn default_status() -> Status {
    Status::Unread
}

/// Partial update for a notification. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    /// An empty string clears the action URL
    pub action_url: Option<String>,
}

impl NotificationPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplate {
    pub id: String,
    pub name: String,
    pub title: String,
    pub message: String,
    pub category: Category,
    pub priority: Priority,
    /// Derived from title and message; never edited directly
    pub variables: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationTemplate {
    pub fn new(id: String, input: NewTemplate, now: DateTime<Utc>) -> Self {
        let variables = template::template_variables(&input.title, &input.message);
        Self {
            id,
            name: input.name,
            title: input.title,
            message: input.message,
            category: input.category,
            priority: input.priority,
            variables,
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update; variables follow title and message edits.
    pub fn apply(&mut self, patch: TemplatePatch, now: DateTime<Utc>) {
        let text_changed = patch.title.is_some() || patch.message.is_some();
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if text_changed {
            self.normalize();
        }
        self.updated_at = now;
    }

    /// Re-derive `variables` from the title and message.
    pub fn normalize(&mut self) {
        self.variables = template::template_variables(&self.title, &self.message);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub title: String,
    pub message: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_input() -> NewNotification {
        NewNotification {
            title: "Disk almost full".to_string(),
            message: "Volume /data is at 92%".to_string(),
            category: Category::System,
            priority: Priority::High,
            status: Status::Unread,
            user_id: "1".to_string(),
            action_url: None,
            template_id: None,
        }
    }

    #[test]
    fn test_status_change_tracks_deleted_at() {
        let now = Utc::now();
        let mut n = Notification::new("1".to_string(), sample_input(), now);
        assert!(n.deleted_at.is_none());

        n.set_status(Status::Deleted, now);
        assert_eq!(n.deleted_at, Some(now));

        // Re-deleting keeps the first stamp
        n.set_status(Status::Deleted, now + Duration::hours(1));
        assert_eq!(n.deleted_at, Some(now));

        n.set_status(Status::Read, now);
        assert!(n.deleted_at.is_none());
    }

    #[test]
    fn test_created_deleted_gets_stamp() {
        let now = Utc::now();
        let mut input = sample_input();
        input.status = Status::Deleted;
        let n = Notification::new("1".to_string(), input, now);
        assert_eq!(n.deleted_at, Some(now));
    }

    #[test]
    fn test_patch_merges_fields() {
        let created = Utc::now() - Duration::hours(2);
        let mut n = Notification::new("1".to_string(), sample_input(), created);
        let now = Utc::now();

        n.apply(
            NotificationPatch {
                title: Some("Disk full".to_string()),
                priority: Some(Priority::Critical),
                action_url: Some("/storage".to_string()),
                ..NotificationPatch::default()
            },
            now,
        );

        assert_eq!(n.title, "Disk full");
        assert_eq!(n.message, "Volume /data is at 92%");
        assert_eq!(n.priority, Priority::Critical);
        assert_eq!(n.action_url.as_deref(), Some("/storage"));
        assert_eq!(n.updated_at, now);
        assert_eq!(n.created_at, created);

        n.apply(
            NotificationPatch {
                action_url: Some(String::new()),
                ..NotificationPatch::default()
            },
            now,
        );
        assert!(n.action_url.is_none());
    }

    #[test]
    fn test_normalize_repairs_invariant() {
        let now = Utc::now();
        let mut n = Notification::new("1".to_string(), sample_input(), now);
        n.deleted_at = Some(now);
        n.normalize();
        assert!(n.deleted_at.is_none());

        n.status = Status::Deleted;
        n.normalize();
        assert_eq!(n.deleted_at, Some(n.updated_at));
    }

    #[test]
    fn test_template_patch_recomputes_variables() {
        let now = Utc::now();
        let mut t = NotificationTemplate::new(
            "1".to_string(),
            NewTemplate {
                name: "Greeting".to_string(),
                title: "Hi {{name}}".to_string(),
                message: "Welcome".to_string(),
                category: Category::Social,
                priority: Priority::Low,
                is_active: true,
            },
            now,
        );
        assert_eq!(t.variables, vec!["name"]);

        t.apply(
            TemplatePatch {
                is_active: Some(false),
                ..TemplatePatch::default()
            },
            now,
        );
        assert_eq!(t.variables, vec!["name"]);
        assert!(!t.is_active);

        t.apply(
            TemplatePatch {
                message: Some("Welcome to {{place}}".to_string()),
                ..TemplatePatch::default()
            },
            now,
        );
        assert_eq!(t.variables, vec!["name", "place"]);

        t.variables = vec!["stale".to_string()];
        t.normalize();
        assert_eq!(t.variables, vec!["name", "place"]);
    }

    #[test]
    fn test_wire_shape() {
        let now = Utc::now();
        let mut input = sample_input();
        input.template_id = Some("4".to_string());
        let n = Notification::new("42".to_string(), input, now);
        let value = serde_json::to_value(&n).unwrap();

        assert_eq!(value["category"], "system");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["status"], "unread");
        assert_eq!(value["userId"], "1");
        assert_eq!(value["template"], "4");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("deletedAt").is_none());
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::Critical);
    }
}
