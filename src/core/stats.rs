use std::collections::BTreeMap;

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::{Category, Notification, Priority, Status};

/// Number of daily buckets in the activity series.
pub const ACTIVITY_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// Local calendar day, `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
}

/// Aggregate counts for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    /// All non-deleted notifications
    pub total: usize,
    pub unread: usize,
    pub read: usize,
    pub archived: usize,
    pub deleted: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
    /// Oldest day first, ending today
    pub recent_activity: Vec<DailyActivity>,
}

impl NotificationStats {
    pub fn compute(notifications: &[Notification]) -> Self {
        Self::compute_at(notifications, Local::now())
    }

    pub fn compute_at(notifications: &[Notification], now: DateTime<Local>) -> Self {
        let mut by_category: BTreeMap<Category, usize> =
            Category::all().iter().map(|c| (*c, 0)).collect();
        let mut by_priority: BTreeMap<Priority, usize> =
            Priority::all().iter().map(|p| (*p, 0)).collect();
        let (mut unread, mut read, mut archived, mut deleted) = (0, 0, 0, 0);

        for n in notifications {
            match n.status {
                Status::Unread => unread += 1,
                Status::Read => read += 1,
                Status::Archived => archived += 1,
                Status::Deleted => deleted += 1,
            }
            if n.is_deleted() {
                continue;
            }
            *by_category.entry(n.category).or_default() += 1;
            *by_priority.entry(n.priority).or_default() += 1;
        }

        Self {
            total: notifications.len() - deleted,
            unread,
            read,
            archived,
            deleted,
            by_category,
            by_priority,
            recent_activity: recent_activity(notifications, now.date_naive()),
        }
    }

    /// Percentage of `total` represented by `count`.
    pub fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 / self.total as f64 * 100.0
    }

    /// Share of each priority, as shown in the dashboard distribution.
    pub fn priority_shares(&self) -> BTreeMap<Priority, f64> {
        self.by_priority
            .iter()
            .map(|(priority, count)| (*priority, self.share(*count)))
            .collect()
    }
}

fn recent_activity(notifications: &[Notification], today: NaiveDate) -> Vec<DailyActivity> {
    (0..ACTIVITY_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| DailyActivity {
            date: day.format("%Y-%m-%d").to_string(),
            count: notifications
                .iter()
                .filter(|n| !n.is_deleted())
                .filter(|n| n.created_at.with_timezone(&Local).date_naive() == day)
                .count(),
        })
        .collect()
}
