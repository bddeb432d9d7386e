//! Form state and validation for the create/edit dialogs.
//!
//! Validation errors display as the toast text the front-end shows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::auth::credentials_acceptable;
use super::auth::user::User;
use super::model::{
    Category, NewNotification, NewTemplate, NotificationTemplate, Priority, Status, TemplatePatch,
};
use super::template::{duplicate_name, template_variables};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in title and message")]
    MissingTitleOrMessage,
    #[error("User not authenticated")]
    NotAuthenticated,
    #[error("Please fill in name, title and message")]
    IncompleteTemplate,
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// "Create New Notification" dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationForm {
    pub title: String,
    pub message: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default)]
    pub action_url: String,
    #[serde(default)]
    pub template_id: Option<String>,
}

impl Default for NotificationForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            message: String::new(),
            category: Category::System,
            priority: Priority::Medium,
            action_url: String::new(),
            template_id: None,
        }
    }
}

impl NotificationForm {
    /// Prefill from a template, or drop the template selection on `None`.
    pub fn apply_template(&mut self, template: Option<&NotificationTemplate>) {
        match template {
            Some(template) => {
                self.title = template.title.clone();
                self.message = template.message.clone();
                self.category = template.category;
                self.priority = template.priority;
                self.template_id = Some(template.id.clone());
            }
            None => self.template_id = None,
        }
    }

    pub fn submit(&self, user: Option<&User>) -> Result<NewNotification, FormError> {
        if self.title.trim().is_empty() || self.message.trim().is_empty() {
            return Err(FormError::MissingTitleOrMessage);
        }
        let user = user.ok_or(FormError::NotAuthenticated)?;
        let action_url = Some(self.action_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(NewNotification {
            title: self.title.clone(),
            message: self.message.clone(),
            category: self.category,
            priority: self.priority,
            status: Status::Unread,
            user_id: user.id.clone(),
            action_url,
            template_id: self.template_id.clone().filter(|id| !id.is_empty()),
        })
    }
}

/// Template create/edit dialog. Variables track the text as it is typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateForm {
    pub name: String,
    title: String,
    message: String,
    pub category: Category,
    pub priority: Priority,
    pub is_active: bool,
    #[serde(default)]
    variables: Vec<String>,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            message: String::new(),
            category: Category::System,
            priority: Priority::Medium,
            is_active: true,
            variables: Vec::new(),
        }
    }
}

impl TemplateForm {
    /// Form prefilled for editing `template`.
    pub fn edit(template: &NotificationTemplate) -> Self {
        Self {
            name: template.name.clone(),
            title: template.title.clone(),
            message: template.message.clone(),
            category: template.category,
            priority: template.priority,
            is_active: template.is_active,
            variables: template.variables.clone(),
        }
    }

    /// Form prefilled with a copy of `template`.
    pub fn duplicate(template: &NotificationTemplate) -> Self {
        Self {
            name: duplicate_name(&template.name),
            ..Self::edit(template)
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.variables = template_variables(&self.title, &self.message);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.variables = template_variables(&self.title, &self.message);
    }

    fn validate(&self) -> Result<(), FormError> {
        if [&self.name, &self.title, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(FormError::IncompleteTemplate);
        }
        Ok(())
    }

    pub fn submit(&self) -> Result<NewTemplate, FormError> {
        self.validate()?;
        Ok(NewTemplate {
            name: self.name.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            category: self.category,
            priority: self.priority,
            is_active: self.is_active,
        })
    }

    /// Full-replacement patch for saving an edit.
    pub fn submit_edit(&self) -> Result<TemplatePatch, FormError> {
        self.validate()?;
        Ok(TemplatePatch {
            name: Some(self.name.clone()),
            title: Some(self.title.clone()),
            message: Some(self.message.clone()),
            category: Some(self.category),
            priority: Some(self.priority),
            is_active: Some(self.is_active),
        })
    }
}

/// Sign-in / sign-up dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    /// Only used when registering
    #[serde(default)]
    pub name: String,
}

impl AuthForm {
    pub fn validate_login(&self) -> Result<(), FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(FormError::MissingFields);
        }
        if !credentials_acceptable(&self.email, &self.password) {
            return Err(FormError::PasswordTooShort);
        }
        Ok(())
    }

    pub fn validate_register(&self) -> Result<(), FormError> {
        if self.name.is_empty() {
            return Err(FormError::MissingFields);
        }
        self.validate_login()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn template() -> NotificationTemplate {
        NotificationTemplate::new(
            "2".to_string(),
            NewTemplate {
                name: "System Maintenance".to_string(),
                title: "System Maintenance: {{maintenanceType}}".to_string(),
                message: "Planned for {{date}}".to_string(),
                category: Category::System,
                priority: Priority::Medium,
                is_active: false,
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_notification_form_validation() {
        let user = User::mock("a@b.com", "a");
        let mut form = NotificationForm {
            title: "  ".to_string(),
            message: "body".to_string(),
            ..NotificationForm::default()
        };
        assert_eq!(form.submit(Some(&user)), Err(FormError::MissingTitleOrMessage));

        form.title = "Title".to_string();
        assert_eq!(form.submit(None), Err(FormError::NotAuthenticated));

        let input = form.submit(Some(&user)).unwrap();
        assert_eq!(input.status, Status::Unread);
        assert_eq!(input.user_id, "1");
        assert_eq!(input.category, Category::System);
        assert_eq!(input.priority, Priority::Medium);
        assert!(input.action_url.is_none());
        assert!(input.template_id.is_none());
    }

    #[test]
    fn test_notification_form_template() {
        let user = User::mock("a@b.com", "a");
        let mut form = NotificationForm {
            action_url: " /status ".to_string(),
            ..NotificationForm::default()
        };
        form.apply_template(Some(&template()));
        assert_eq!(form.title, "System Maintenance: {{maintenanceType}}");

        let input = form.submit(Some(&user)).unwrap();
        assert_eq!(input.template_id.as_deref(), Some("2"));
        assert_eq!(input.action_url.as_deref(), Some("/status"));

        form.apply_template(None);
        assert!(form.template_id.is_none());
        assert_eq!(form.message, "Planned for {{date}}");
    }

    #[test]
    fn test_template_form_tracks_variables() {
        let mut form = TemplateForm::default();
        form.set_title("Hi {{name}}");
        assert_eq!(form.variables, vec!["name"]);
        form.set_message("Welcome {{name}} to {{place}}");
        assert_eq!(form.variables, vec!["name", "place"]);
        form.set_title("Hi");
        assert_eq!(form.variables, vec!["name", "place"]);
        form.set_message("");
        assert!(form.variables.is_empty());
    }

    #[test]
    fn test_template_form_prefill() {
        let source = template();
        let copy = TemplateForm::duplicate(&source);
        assert_eq!(copy.name, "System Maintenance (Copy)");
        assert_eq!(copy.variables, source.variables);
        assert!(!copy.is_active);

        let edit = TemplateForm::edit(&source);
        let patch = edit.submit_edit().unwrap();
        assert_eq!(patch.name.as_deref(), Some("System Maintenance"));
    }

    #[test]
    fn test_template_form_requires_text() {
        let mut form = TemplateForm::default();
        form.name = "Empty".to_string();
        form.set_title("t");
        assert_eq!(form.submit().unwrap_err(), FormError::IncompleteTemplate);
        form.set_message("m");
        assert!(form.submit().is_ok());
    }

    #[test]
    fn test_auth_form() {
        let mut form = AuthForm {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
            name: String::new(),
        };
        assert_eq!(form.validate_login(), Err(FormError::PasswordTooShort));
        assert_eq!(form.validate_register(), Err(FormError::MissingFields));

        form.password = "longenough".to_string();
        form.name = "Ann".to_string();
        assert!(form.validate_login().is_ok());
        assert!(form.validate_register().is_ok());
        assert_eq!(FormError::PasswordTooShort.to_string(), "Password must be at least 6 characters");
    }
}
