//! `{{variable}}` placeholder handling for notification templates.

use lazy_static::lazy_static;
use regex::Regex;

use super::model::{NewNotification, NotificationTemplate, Status};

lazy_static! {
    // ASCII word characters only, case-sensitive
    static ref VARIABLE_REGEX: Regex =
        Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Invalid template variable regex");
}

/// Variable names in `text`, in order of appearance (duplicates kept).
pub fn extract_variables(text: &str) -> Vec<String> {
    VARIABLE_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Deduplicated variables of title then message, first appearance wins.
pub fn template_variables(title: &str, message: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();
    for name in extract_variables(title)
        .into_iter()
        .chain(extract_variables(message))
    {
        if !variables.contains(&name) {
            variables.push(name);
        }
    }
    variables
}

/// Name given to a duplicated template.
pub fn duplicate_name(name: &str) -> String {
    format!("{} (Copy)", name)
}

/// Creation input for a notification based on `template`.
///
/// Placeholders are copied verbatim; no substitution happens.
pub fn instantiate(template: &NotificationTemplate, user_id: &str) -> NewNotification {
    NewNotification {
        title: template.title.clone(),
        message: template.message.clone(),
        category: template.category,
        priority: template.priority,
        status: Status::Unread,
        user_id: user_id.to_string(),
        action_url: None,
        template_id: Some(template.id.clone()),
    }
}
