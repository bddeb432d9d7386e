//! In-memory notification and template state.
//!
//! Owns both collections plus the list UI state (active view, filter,
//! selection). Every read of the list or the statistics is derived from the
//! full collection on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::backup::Backup;
use super::filter::{self, NotificationFilter, View};
use super::model::{
    Category, NewNotification, NewTemplate, Notification, NotificationPatch, NotificationTemplate,
    Status, TemplatePatch,
};
use super::seed;
use super::stats::NotificationStats;
use super::template;

/// Result of merging a backup into the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub notifications_added: usize,
    pub templates_added: usize,
    /// Records whose id already existed
    pub skipped: usize,
}

#[derive(Debug, Default)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
    templates: Vec<NotificationTemplate>,
    filter: NotificationFilter,
    selection: Vec<String>,
    active_view: View,
    /// Last id handed out, in milliseconds since the epoch
    last_id: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated with the demo notifications and templates.
    pub fn with_seed_data(now: DateTime<Utc>) -> Self {
        Self {
            notifications: seed::notifications(now),
            templates: seed::templates(now),
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn templates(&self) -> &[NotificationTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&NotificationTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Unique, strictly increasing id derived from the wall clock.
    fn next_id(&mut self) -> String {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.last_id = now_ms.max(self.last_id + 1);
        self.last_id.to_string()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Notification> {
        self.notifications.iter_mut().find(|n| n.id == id)
    }

    fn deselect(&mut self, id: &str) {
        self.selection.retain(|selected| selected != id);
    }

    // ------------------------------------------------------------------
    // Notification lifecycle
    // ------------------------------------------------------------------

    /// Add a notification at the front of the collection. Returns its id.
    pub fn create(&mut self, input: NewNotification) -> String {
        let id = self.next_id();
        let notification = Notification::new(id.clone(), input, Utc::now());
        log::info!("Created notification {} ({:?})", id, notification.category);
        self.notifications.insert(0, notification);
        id
    }

    /// Merge `patch` into the notification. Returns false if `id` is unknown.
    pub fn update(&mut self, id: &str, patch: NotificationPatch) -> bool {
        match self.find_mut(id) {
            Some(notification) => {
                notification.apply(patch, Utc::now());
                log::debug!("Updated notification {}", id);
                true
            }
            None => false,
        }
    }

    /// Move to the bin.
    pub fn soft_delete(&mut self, id: &str) -> bool {
        let found = self.update(id, NotificationPatch::status(Status::Deleted));
        self.deselect(id);
        found
    }

    pub fn permanently_delete(&mut self, id: &str) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.deselect(id);
        let removed = self.notifications.len() != before;
        if removed {
            log::info!("Permanently deleted notification {}", id);
        }
        removed
    }

    pub fn restore(&mut self, id: &str) -> bool {
        self.update(id, NotificationPatch::status(Status::Unread))
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.update(id, NotificationPatch::status(Status::Read))
    }

    pub fn mark_unread(&mut self, id: &str) -> bool {
        self.update(id, NotificationPatch::status(Status::Unread))
    }

    pub fn mark_archived(&mut self, id: &str) -> bool {
        self.update(id, NotificationPatch::status(Status::Archived))
    }

    pub fn bulk_mark_read(&mut self, ids: &[String]) -> usize {
        ids.iter().filter(|id| self.mark_read(id)).count()
    }

    pub fn bulk_delete(&mut self, ids: &[String]) -> usize {
        let count = ids.iter().filter(|id| self.soft_delete(id)).count();
        self.clear_selection();
        count
    }

    pub fn bulk_restore(&mut self, ids: &[String]) -> usize {
        let count = ids.iter().filter(|id| self.restore(id)).count();
        self.clear_selection();
        count
    }

    pub fn bulk_permanently_delete(&mut self, ids: &[String]) -> usize {
        let count = ids.iter().filter(|id| self.permanently_delete(id)).count();
        self.clear_selection();
        count
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|selected| selected == id)
    }

    pub fn toggle_selection(&mut self, id: &str) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.selection.push(id.to_string());
        }
    }

    /// Select every notification in the current filtered view.
    pub fn select_all(&mut self) {
        self.selection = self.filtered().iter().map(|n| n.id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // View and filter
    // ------------------------------------------------------------------

    pub fn active_view(&self) -> View {
        self.active_view
    }

    /// Navigate to `view`. Only the header search survives navigation;
    /// the view itself supplies the status constraint.
    pub fn set_active_view(&mut self, view: View) {
        self.active_view = view;
        self.filter = self
            .filter
            .search
            .as_deref()
            .map(NotificationFilter::search)
            .unwrap_or_default();
    }

    pub fn filter(&self) -> &NotificationFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: NotificationFilter) {
        self.filter = filter;
    }

    /// Drop every filter field and return to the full list.
    pub fn clear_filter(&mut self) {
        self.filter = NotificationFilter::default();
        self.active_view = View::All;
    }

    /// Header search box. A non-blank query replaces the filter and leaves
    /// the dashboard for the list; a blank one clears the filter.
    pub fn set_search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.filter = NotificationFilter::default();
            return;
        }
        self.filter = NotificationFilter::search(query);
        if self.active_view == View::Dashboard {
            self.active_view = View::All;
        }
    }

    /// Sidebar category toggle. Leaves the dashboard for the list once a
    /// category is picked; any other view stays put.
    pub fn toggle_category_filter(&mut self, category: Category) {
        let mut categories = self.filter.category.take().unwrap_or_default();
        if categories.contains(&category) {
            categories.retain(|c| *c != category);
        } else {
            categories.push(category);
        }
        let picked = !categories.is_empty();
        self.filter.category = picked.then_some(categories);
        if picked && self.active_view == View::Dashboard {
            self.active_view = View::All;
        }
    }

    pub fn has_active_filters(&self) -> bool {
        self.filter.is_active()
    }

    /// Notifications visible under the active view and filter.
    pub fn filtered(&self) -> Vec<&Notification> {
        filter::apply(&self.notifications, self.active_view, &self.filter)
    }

    pub fn stats(&self) -> NotificationStats {
        NotificationStats::compute(&self.notifications)
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    pub fn create_template(&mut self, input: NewTemplate) -> String {
        let id = self.next_id();
        let template = NotificationTemplate::new(id.clone(), input, Utc::now());
        log::info!("Created template {} '{}'", id, template.name);
        self.templates.insert(0, template);
        id
    }

    pub fn update_template(&mut self, id: &str, patch: TemplatePatch) -> bool {
        match self.templates.iter_mut().find(|t| t.id == id) {
            Some(template) => {
                template.apply(patch, Utc::now());
                true
            }
            None => false,
        }
    }

    pub fn delete_template(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() != before
    }

    /// Copy a template under a "(Copy)" name. Returns the new id.
    pub fn duplicate_template(&mut self, id: &str) -> Option<String> {
        let source = self.template(id)?;
        let input = NewTemplate {
            name: template::duplicate_name(&source.name),
            title: source.title.clone(),
            message: source.message.clone(),
            category: source.category,
            priority: source.priority,
            is_active: source.is_active,
        };
        Some(self.create_template(input))
    }

    /// Templates whose name, title or message contains `query`
    /// (case-insensitive), optionally limited to one category.
    pub fn filtered_templates(
        &self,
        query: &str,
        category: Option<Category>,
    ) -> Vec<&NotificationTemplate> {
        let needle = query.to_lowercase();
        self.templates
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.title.to_lowercase().contains(&needle)
                    || t.message.to_lowercase().contains(&needle)
            })
            .filter(|t| category.map_or(true, |c| t.category == c))
            .collect()
    }

    /// New unread notification copied from a template, placeholders intact.
    pub fn create_from_template(&mut self, template_id: &str, user_id: &str) -> Option<String> {
        let input = template::instantiate(self.template(template_id)?, user_id);
        Some(self.create(input))
    }

    // ------------------------------------------------------------------
    // Backup
    // ------------------------------------------------------------------

    /// Merge records whose ids are not present yet.
    pub fn import(&mut self, backup: Backup) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for mut notification in backup.notifications {
            if self.get(&notification.id).is_some() {
                summary.skipped += 1;
                continue;
            }
            notification.normalize();
            self.notifications.push(notification);
            summary.notifications_added += 1;
        }
        for mut template in backup.templates {
            if self.template(&template.id).is_some() {
                summary.skipped += 1;
                continue;
            }
            template.normalize();
            self.templates.push(template);
            summary.templates_added += 1;
        }

        // Keep newest first after merging
        self.notifications
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
        log::info!(
            "Imported {} notifications and {} templates ({} skipped)",
            summary.notifications_added,
            summary.templates_added,
            summary.skipped
        );
        summary
    }
}
