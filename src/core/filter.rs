//! View and filter handling for the notification list.
//!
//! The active view and the explicit filter are folded into a single
//! effective [`NotificationFilter`]: the view only contributes a status set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{Category, Notification, Priority, Status};

/// Coarse navigation selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    All,
    Unread,
    Read,
    Archived,
    Deleted,
    Templates,
    Settings,
}

impl View {
    /// Statuses a notification may have to appear under this view.
    pub fn statuses(&self) -> &'static [Status] {
        match self {
            Self::Unread => &[Status::Unread],
            Self::Read => &[Status::Read],
            Self::Archived => &[Status::Archived],
            Self::Deleted => &[Status::Deleted],
            Self::Dashboard | Self::All | Self::Templates | Self::Settings => Status::live(),
        }
    }
}

/// Inclusive creation-time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Explicit list filter. Every present field must match; absent fields
/// do not constrain. A present but empty list matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<Status>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Vec<Priority>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl NotificationFilter {
    pub fn search(query: &str) -> Self {
        Self {
            search: Some(query.to_string()),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_some()
            || self.category.is_some()
            || self.priority.is_some()
            || self.search.as_deref().is_some_and(|s| !s.is_empty())
            || self.date_range.is_some()
    }

    /// Fold the view's status set into this filter.
    pub fn scoped_to(&self, view: View) -> Self {
        let allowed = view.statuses();
        let status = match &self.status {
            Some(wanted) => wanted.iter().copied().filter(|s| allowed.contains(s)).collect(),
            None => allowed.to_vec(),
        };
        Self {
            status: Some(status),
            ..self.clone()
        }
    }

    pub fn matches(&self, notification: &Notification) -> bool {
        if let Some(status) = &self.status {
            if !status.contains(&notification.status) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !category.contains(&notification.category) {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if !priority.contains(&notification.priority) {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            if !notification.title.to_lowercase().contains(&needle)
                && !notification.message.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(range) = &self.date_range {
            if !range.contains(notification.created_at) {
                return false;
            }
        }
        true
    }
}

/// Notifications visible under `view` and `filter`, in collection order.
pub fn apply<'a>(
    notifications: &'a [Notification],
    view: View,
    filter: &NotificationFilter,
) -> Vec<&'a Notification> {
    let effective = filter.scoped_to(view);
    notifications
        .iter()
        .filter(|n| effective.matches(n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::NewNotification;
    use chrono::Duration;

    fn make(id: &str, title: &str, status: Status, category: Category, age_hours: i64) -> Notification {
        let created = Utc::now() - Duration::hours(age_hours);
        Notification::new(
            id.to_string(),
            NewNotification {
                title: title.to_string(),
                message: format!("Body of {}", title),
                category,
                priority: Priority::Medium,
                status,
                user_id: "1".to_string(),
                action_url: None,
                template_id: None,
            },
            created,
        )
    }

    fn fixture() -> Vec<Notification> {
        vec![
            make("1", "Login detected", Status::Unread, Category::Security, 1),
            make("2", "Maintenance", Status::Read, Category::System, 5),
            make("3", "Backup failed", Status::Archived, Category::System, 30),
            make("4", "Old news", Status::Deleted, Category::Updates, 60),
        ]
    }

    fn ids(list: &[&Notification]) -> Vec<String> {
        list.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_all_view_excludes_deleted() {
        let items = fixture();
        let result = apply(&items, View::All, &NotificationFilter::default());
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_status_views() {
        let items = fixture();
        let none = NotificationFilter::default();
        assert_eq!(ids(&apply(&items, View::Unread, &none)), vec!["1"]);
        assert_eq!(ids(&apply(&items, View::Read, &none)), vec!["2"]);
        assert_eq!(ids(&apply(&items, View::Archived, &none)), vec!["3"]);
        assert_eq!(ids(&apply(&items, View::Deleted, &none)), vec!["4"]);
        assert_eq!(ids(&apply(&items, View::Dashboard, &none)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_view_intersects_filter_status() {
        let items = fixture();
        let filter = NotificationFilter {
            status: Some(vec![Status::Read, Status::Deleted]),
            ..NotificationFilter::default()
        };
        assert_eq!(ids(&apply(&items, View::All, &filter)), vec!["2"]);
        assert!(apply(&items, View::Unread, &filter).is_empty());
        assert_eq!(ids(&apply(&items, View::Deleted, &filter)), vec!["4"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_message() {
        let items = fixture();
        assert_eq!(
            ids(&apply(&items, View::All, &NotificationFilter::search("BACKUP"))),
            vec!["3"]
        );
        assert_eq!(
            ids(&apply(&items, View::All, &NotificationFilter::search("body of login"))),
            vec!["1"]
        );
        assert_eq!(apply(&items, View::All, &NotificationFilter::search("")).len(), 3);
    }

    #[test]
    fn test_category_and_empty_list() {
        let items = fixture();
        let filter = NotificationFilter {
            category: Some(vec![Category::System]),
            ..NotificationFilter::default()
        };
        assert_eq!(ids(&apply(&items, View::All, &filter)), vec!["2", "3"]);

        let empty = NotificationFilter {
            category: Some(Vec::new()),
            ..NotificationFilter::default()
        };
        assert!(apply(&items, View::All, &empty).is_empty());
    }

    #[test]
    fn test_date_range_inclusive() {
        let items = fixture();
        let range = DateRange {
            start: items[2].created_at,
            end: items[1].created_at,
        };
        let filter = NotificationFilter {
            date_range: Some(range),
            ..NotificationFilter::default()
        };
        assert_eq!(ids(&apply(&items, View::All, &filter)), vec!["2", "3"]);
    }

    #[test]
    fn test_filtering_is_repeatable() {
        let items = fixture();
        let filter = NotificationFilter::search("a");
        let first = ids(&apply(&items, View::All, &filter));
        let second = ids(&apply(&items, View::All, &filter));
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_active() {
        assert!(!NotificationFilter::default().is_active());
        assert!(!NotificationFilter::search("").is_active());
        assert!(NotificationFilter::search("x").is_active());
    }
}
