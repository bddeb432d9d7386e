//! Demo notifications and templates loaded on startup.

use chrono::{DateTime, Duration, Utc};

use super::model::{Category, Notification, NotificationTemplate, Priority, Status};
use super::template::template_variables;

/// Owner of every seeded notification; matches the mock session user.
pub const DEMO_USER_ID: &str = "1";

struct SeedNotification {
    id: &'static str,
    title: &'static str,
    message: &'static str,
    category: Category,
    priority: Priority,
    status: Status,
    created_ago: Duration,
    updated_ago: Duration,
    action_url: Option<&'static str>,
}

struct SeedTemplate {
    id: &'static str,
    name: &'static str,
    title: &'static str,
    message: &'static str,
    category: Category,
    priority: Priority,
    created_ago: Duration,
}

fn notification_rows() -> Vec<SeedNotification> {
    vec![
        SeedNotification {
            id: "1",
            title: "Security Alert: New Login Detected",
            message: "A new login was detected from Chrome on Windows in New York, USA. If this wasn't you, please secure your account immediately.",
            category: Category::Security,
            priority: Priority::High,
            status: Status::Unread,
            created_ago: Duration::minutes(30),
            updated_ago: Duration::minutes(30),
            action_url: Some("/security/sessions"),
        },
        SeedNotification {
            id: "2",
            title: "System Maintenance Scheduled",
            message: "We have scheduled system maintenance for this weekend. Services may be temporarily unavailable between 2 AM - 4 AM EST.",
            category: Category::System,
            priority: Priority::Medium,
            status: Status::Unread,
            created_ago: Duration::hours(2),
            updated_ago: Duration::hours(2),
            action_url: None,
        },
        SeedNotification {
            id: "3",
            title: "New Feature: Dark Mode Available",
            message: "We've added a new dark mode feature! You can toggle between light and dark themes in your preferences.",
            category: Category::Updates,
            priority: Priority::Low,
            status: Status::Read,
            created_ago: Duration::hours(6),
            updated_ago: Duration::hours(4),
            action_url: Some("/preferences"),
        },
        SeedNotification {
            id: "4",
            title: "Payment Method Expiring Soon",
            message: "Your primary payment method ending in ****4532 will expire next month. Please update your billing information.",
            category: Category::Alerts,
            priority: Priority::High,
            status: Status::Unread,
            created_ago: Duration::hours(12),
            updated_ago: Duration::hours(12),
            action_url: Some("/billing"),
        },
        SeedNotification {
            id: "5",
            title: "Welcome to Our Platform!",
            message: "Thank you for joining us! Here are some quick tips to get you started with our notification management system.",
            category: Category::Social,
            priority: Priority::Low,
            status: Status::Read,
            created_ago: Duration::days(1),
            updated_ago: Duration::hours(23),
            action_url: None,
        },
        SeedNotification {
            id: "6",
            title: "Critical: Database Backup Failed",
            message: "The automated database backup process failed at 3:00 AM. Immediate attention required to ensure data integrity.",
            category: Category::System,
            priority: Priority::Critical,
            status: Status::Archived,
            created_ago: Duration::days(2),
            updated_ago: Duration::days(1),
            action_url: Some("/admin/backups"),
        },
        SeedNotification {
            id: "7",
            title: "Special Offer: 50% Off Premium Features",
            message: "Limited time offer! Upgrade to premium and get access to advanced analytics, custom templates, and priority support.",
            category: Category::Marketing,
            priority: Priority::Medium,
            status: Status::Unread,
            created_ago: Duration::days(3),
            updated_ago: Duration::days(3),
            action_url: Some("/upgrade"),
        },
        SeedNotification {
            id: "8",
            title: "API Rate Limit Warning",
            message: "You are approaching your API rate limit. Current usage: 850/1000 requests per hour.",
            category: Category::Alerts,
            priority: Priority::Medium,
            status: Status::Read,
            created_ago: Duration::days(4),
            updated_ago: Duration::days(3),
            action_url: None,
        },
        SeedNotification {
            id: "9",
            title: "Deleted Notification Example",
            message: "This is an example of a deleted notification that appears in the bin.",
            category: Category::System,
            priority: Priority::Low,
            status: Status::Deleted,
            created_ago: Duration::days(5),
            updated_ago: Duration::days(2),
            action_url: None,
        },
    ]
}

fn template_rows() -> Vec<SeedTemplate> {
    vec![
        SeedTemplate {
            id: "1",
            name: "Security Alert",
            title: "Security Alert: {{alertType}}",
            message: "A security event has been detected: {{description}}. Please review your account security settings.",
            category: Category::Security,
            priority: Priority::High,
            created_ago: Duration::days(7),
        },
        SeedTemplate {
            id: "2",
            name: "System Maintenance",
            title: "System Maintenance: {{maintenanceType}}",
            message: "We have scheduled {{maintenanceType}} maintenance for {{date}}. Services may be temporarily unavailable.",
            category: Category::System,
            priority: Priority::Medium,
            created_ago: Duration::days(14),
        },
        SeedTemplate {
            id: "3",
            name: "Feature Update",
            title: "New Feature: {{featureName}}",
            message: "We've added a new feature called {{featureName}}! {{description}}",
            category: Category::Updates,
            priority: Priority::Low,
            created_ago: Duration::days(21),
        },
        SeedTemplate {
            id: "4",
            name: "Payment Reminder",
            title: "Payment Reminder: {{paymentType}}",
            message: "Your {{paymentType}} is due on {{dueDate}}. Amount: {{amount}}",
            category: Category::Alerts,
            priority: Priority::High,
            created_ago: Duration::days(30),
        },
        SeedTemplate {
            id: "5",
            name: "Welcome Message",
            title: "Welcome to {{platformName}}!",
            message: "Thank you for joining {{platformName}}! We're excited to have you on board. {{welcomeMessage}}",
            category: Category::Social,
            priority: Priority::Low,
            created_ago: Duration::days(45),
        },
    ]
}

/// Demo notifications, newest first, with ages relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    notification_rows()
        .into_iter()
        .map(|row| {
            let updated_at = now - row.updated_ago;
            Notification {
                id: row.id.to_string(),
                title: row.title.to_string(),
                message: row.message.to_string(),
                category: row.category,
                priority: row.priority,
                status: row.status,
                created_at: now - row.created_ago,
                updated_at,
                user_id: DEMO_USER_ID.to_string(),
                action_url: row.action_url.map(str::to_string),
                template_id: None,
                deleted_at: row.status.is_deleted().then_some(updated_at),
            }
        })
        .collect()
}

/// Demo templates with variables derived from their text.
pub fn templates(now: DateTime<Utc>) -> Vec<NotificationTemplate> {
    template_rows()
        .into_iter()
        .map(|row| {
            let created_at = now - row.created_ago;
            NotificationTemplate {
                id: row.id.to_string(),
                name: row.name.to_string(),
                title: row.title.to_string(),
                message: row.message.to_string(),
                category: row.category,
                priority: row.priority,
                variables: template_variables(row.title, row.message),
                is_active: true,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_respects_deleted_invariant() {
        for n in notifications(Utc::now()) {
            assert_eq!(n.is_deleted(), n.deleted_at.is_some(), "notification {}", n.id);
        }
    }

    #[test]
    fn test_seed_ids_unique() {
        let items = notifications(Utc::now());
        let mut ids: Vec<_> = items.iter().map(|n| n.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_seed_template_variables() {
        let templates = templates(Utc::now());
        assert_eq!(templates.len(), 5);
        assert_eq!(templates[1].variables, vec!["maintenanceType", "date"]);
        assert_eq!(templates[3].variables, vec!["paymentType", "dueDate", "amount"]);
    }

    #[test]
    fn test_seed_newest_first() {
        let items = notifications(Utc::now());
        assert!(items.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }
}
