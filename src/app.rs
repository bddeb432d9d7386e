use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_dialog::DialogExt;

use crate::core::{
    auth::{session::SessionStore, user::{PreferencesPatch, User}, AuthManager},
    backup::Backup,
    config::{ConfigManager, Settings},
    filter::{NotificationFilter, View},
    forms::{AuthForm, NotificationForm, TemplateForm},
    model::{Category, Notification, NotificationPatch, NotificationTemplate, Priority},
    stats::NotificationStats,
    store::{ImportSummary, NotificationStore},
    toast::{Toast, TOAST_EVENT},
};

struct AppState {
    store: Mutex<NotificationStore>,
    auth: tokio::sync::Mutex<AuthManager>,
    settings: Mutex<Settings>,
    config_manager: ConfigManager,
}

impl AppState {
    fn store(&self) -> MutexGuard<'_, NotificationStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn settings(&self) -> MutexGuard<'_, Settings> {
        self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn toast(app: &AppHandle, toast: Toast) {
    if let Err(e) = app.emit(TOAST_EVENT, &toast) {
        log::warn!("Failed to emit toast '{}': {}", toast.message, e);
    }
}

/// Emit the error as a toast and hand it back for the command result.
fn fail(app: &AppHandle, message: impl ToString) -> String {
    let message = message.to_string();
    toast(app, Toast::error(message.clone()));
    message
}

// ============================================
// Session Commands
// ============================================

#[tauri::command]
async fn get_session(state: State<'_, AppState>) -> Result<Option<User>, String> {
    Ok(state.auth.lock().await.current_user().cloned())
}

#[tauri::command]
async fn login(form: AuthForm, state: State<'_, AppState>, app: AppHandle) -> Result<Option<User>, String> {
    form.validate_login().map_err(|e| fail(&app, e))?;
    let mut auth = state.auth.lock().await;
    let accepted = auth
        .login(&form.email, &form.password)
        .await
        .map_err(|e| fail(&app, e))?;
    if !accepted {
        toast(&app, Toast::error("Invalid email or password"));
        return Ok(None);
    }
    toast(&app, Toast::success("Welcome back!"));
    Ok(auth.current_user().cloned())
}

#[tauri::command]
async fn register(form: AuthForm, state: State<'_, AppState>, app: AppHandle) -> Result<Option<User>, String> {
    form.validate_register().map_err(|e| fail(&app, e))?;
    let mut auth = state.auth.lock().await;
    let accepted = auth
        .register(&form.email, &form.password, &form.name)
        .await
        .map_err(|e| fail(&app, e))?;
    if !accepted {
        toast(&app, Toast::error("Registration failed"));
        return Ok(None);
    }
    toast(&app, Toast::success("Account created successfully"));
    Ok(auth.current_user().cloned())
}

#[tauri::command]
async fn logout(state: State<'_, AppState>, app: AppHandle) -> Result<(), String> {
    state.auth.lock().await.logout().map_err(|e| fail(&app, e))?;
    let mut store = state.store();
    store.clear_selection();
    store.set_active_view(View::Dashboard);
    Ok(())
}

#[tauri::command]
async fn update_preferences(
    preferences: PreferencesPatch,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<Option<User>, String> {
    let mut auth = state.auth.lock().await;
    let updated = auth
        .update_preferences(preferences)
        .map_err(|e| fail(&app, e))?;
    if updated {
        toast(&app, Toast::success("Settings saved successfully"));
    }
    Ok(auth.current_user().cloned())
}

// ============================================
// Settings Commands
// ============================================

#[tauri::command]
fn get_settings(state: State<'_, AppState>) -> Settings {
    state.settings().clone()
}

#[tauri::command]
fn save_settings(settings: Settings, state: State<'_, AppState>, app: AppHandle) -> Result<(), String> {
    state.config_manager.save(&settings).map_err(|e| fail(&app, e))?;
    *state.settings() = settings;
    toast(&app, Toast::success("Settings saved successfully"));
    Ok(())
}

// ============================================
// Notification Commands
// ============================================

/// Everything the list screen renders
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    notifications: Vec<Notification>,
    selected: Vec<String>,
    active_view: View,
    filter: NotificationFilter,
    has_active_filters: bool,
}

impl From<&NotificationStore> for ListResponse {
    fn from(store: &NotificationStore) -> Self {
        Self {
            notifications: store.filtered().into_iter().cloned().collect(),
            selected: store.selection().to_vec(),
            active_view: store.active_view(),
            filter: store.filter().clone(),
            has_active_filters: store.has_active_filters(),
        }
    }
}

#[tauri::command]
fn get_list(state: State<'_, AppState>) -> ListResponse {
    ListResponse::from(&*state.store())
}

/// Whole collection, bin included
#[tauri::command]
fn get_notifications(state: State<'_, AppState>) -> Vec<Notification> {
    state.store().notifications().to_vec()
}

#[tauri::command]
fn get_notification(id: String, state: State<'_, AppState>) -> Option<Notification> {
    state.store().get(&id).cloned()
}

/// Dashboard figures plus the percentages the priority chart shows
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    #[serde(flatten)]
    stats: NotificationStats,
    priority_shares: BTreeMap<Priority, f64>,
}

#[tauri::command]
fn get_stats(state: State<'_, AppState>) -> StatsResponse {
    let stats = state.store().stats();
    StatsResponse {
        priority_shares: stats.priority_shares(),
        stats,
    }
}

#[tauri::command]
async fn create_notification(
    form: NotificationForm,
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<String, String> {
    let user = state.auth.lock().await.current_user().cloned();
    let input = form.submit(user.as_ref()).map_err(|e| fail(&app, e))?;
    let id = state.store().create(input);
    toast(&app, Toast::success("Notification created successfully"));
    Ok(id)
}

#[tauri::command]
fn update_notification(id: String, patch: NotificationPatch, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().update(&id, patch);
    if found {
        toast(&app, Toast::success("Notification updated"));
    }
    found
}

#[tauri::command]
fn delete_notification(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().soft_delete(&id);
    if found {
        toast(&app, Toast::success("Notification moved to bin"));
    }
    found
}

#[tauri::command]
fn permanently_delete_notification(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().permanently_delete(&id);
    if found {
        toast(&app, Toast::success("Notification permanently deleted"));
    }
    found
}

#[tauri::command]
fn restore_notification(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().restore(&id);
    if found {
        toast(&app, Toast::success("Notification restored"));
    }
    found
}

#[tauri::command]
fn mark_as_read(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().mark_read(&id);
    if found {
        toast(&app, Toast::success("Notification updated"));
    }
    found
}

#[tauri::command]
fn mark_as_unread(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().mark_unread(&id);
    if found {
        toast(&app, Toast::success("Notification updated"));
    }
    found
}

#[tauri::command]
fn mark_as_archived(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().mark_archived(&id);
    if found {
        toast(&app, Toast::success("Notification updated"));
    }
    found
}

#[tauri::command]
fn bulk_mark_as_read(ids: Vec<String>, state: State<'_, AppState>, app: AppHandle) -> usize {
    let count = state.store().bulk_mark_read(&ids);
    toast(&app, Toast::bulk(count, "marked as read"));
    count
}

#[tauri::command]
fn bulk_delete(ids: Vec<String>, state: State<'_, AppState>, app: AppHandle) -> usize {
    let count = state.store().bulk_delete(&ids);
    toast(&app, Toast::bulk(count, "moved to bin"));
    count
}

#[tauri::command]
fn bulk_restore(ids: Vec<String>, state: State<'_, AppState>, app: AppHandle) -> usize {
    let count = state.store().bulk_restore(&ids);
    toast(&app, Toast::bulk(count, "restored"));
    count
}

#[tauri::command]
fn bulk_permanently_delete(ids: Vec<String>, state: State<'_, AppState>, app: AppHandle) -> usize {
    let count = state.store().bulk_permanently_delete(&ids);
    toast(&app, Toast::bulk(count, "permanently deleted"));
    count
}

// ============================================
// Selection / View Commands
// ============================================

#[tauri::command]
fn toggle_selection(id: String, state: State<'_, AppState>) -> Vec<String> {
    let mut store = state.store();
    store.toggle_selection(&id);
    store.selection().to_vec()
}

#[tauri::command]
fn select_all(state: State<'_, AppState>) -> Vec<String> {
    let mut store = state.store();
    store.select_all();
    store.selection().to_vec()
}

#[tauri::command]
fn clear_selection(state: State<'_, AppState>) {
    state.store().clear_selection();
}

#[tauri::command]
fn set_active_view(view: View, state: State<'_, AppState>) {
    state.store().set_active_view(view);
}

#[tauri::command]
fn set_filter(filter: NotificationFilter, state: State<'_, AppState>) {
    state.store().set_filter(filter);
}

#[tauri::command]
fn clear_filter(state: State<'_, AppState>) {
    state.store().clear_filter();
}

#[tauri::command]
fn set_search(query: String, state: State<'_, AppState>) -> View {
    let mut store = state.store();
    store.set_search(&query);
    store.active_view()
}

#[tauri::command]
fn toggle_category_filter(category: Category, state: State<'_, AppState>) -> NotificationFilter {
    let mut store = state.store();
    store.toggle_category_filter(category);
    store.filter().clone()
}

// ============================================
// Template Commands
// ============================================

#[tauri::command]
fn get_templates(query: Option<String>, category: Option<Category>, state: State<'_, AppState>) -> Vec<NotificationTemplate> {
    state
        .store()
        .filtered_templates(query.as_deref().unwrap_or_default(), category)
        .into_iter()
        .cloned()
        .collect()
}

/// Template editor keystroke: the form with its variables re-derived
#[tauri::command]
fn edit_template_text(mut form: TemplateForm, title: Option<String>, message: Option<String>) -> TemplateForm {
    if let Some(title) = title {
        form.set_title(title);
    }
    if let Some(message) = message {
        form.set_message(message);
    }
    form
}

/// Prefilled editor state for editing or duplicating a template
#[tauri::command]
fn template_form(id: String, duplicate: bool, state: State<'_, AppState>) -> Option<TemplateForm> {
    let store = state.store();
    let template = store.template(&id)?;
    Some(if duplicate {
        TemplateForm::duplicate(template)
    } else {
        TemplateForm::edit(template)
    })
}

/// Notification form prefilled from a template (or with the selection cleared)
#[tauri::command]
fn apply_template(mut form: NotificationForm, template_id: Option<String>, state: State<'_, AppState>) -> NotificationForm {
    let store = state.store();
    form.apply_template(template_id.as_deref().and_then(|id| store.template(id)));
    form
}

#[tauri::command]
fn create_template(form: TemplateForm, state: State<'_, AppState>, app: AppHandle) -> Result<String, String> {
    let input = form.submit().map_err(|e| fail(&app, e))?;
    let id = state.store().create_template(input);
    toast(&app, Toast::success("Template created successfully"));
    Ok(id)
}

#[tauri::command]
fn update_template(id: String, form: TemplateForm, state: State<'_, AppState>, app: AppHandle) -> Result<bool, String> {
    let patch = form.submit_edit().map_err(|e| fail(&app, e))?;
    let found = state.store().update_template(&id, patch);
    if found {
        toast(&app, Toast::success("Template updated"));
    }
    Ok(found)
}

/// Quick "use template" action: a new unread notification with placeholders intact
#[tauri::command]
async fn use_template(template_id: String, state: State<'_, AppState>, app: AppHandle) -> Result<Option<String>, String> {
    let user_id = match state.auth.lock().await.current_user() {
        Some(user) => user.id.clone(),
        None => return Err(fail(&app, "User not authenticated")),
    };
    let id = state.store().create_from_template(&template_id, &user_id);
    if id.is_some() {
        toast(&app, Toast::success("Notification created successfully"));
    }
    Ok(id)
}

#[tauri::command]
fn delete_template(id: String, state: State<'_, AppState>, app: AppHandle) -> bool {
    let found = state.store().delete_template(&id);
    if found {
        toast(&app, Toast::success("Template deleted"));
    }
    found
}

#[tauri::command]
fn duplicate_template(id: String, state: State<'_, AppState>, app: AppHandle) -> Option<String> {
    let copy = state.store().duplicate_template(&id);
    if copy.is_some() {
        toast(&app, Toast::success("Template created successfully"));
    }
    copy
}

// ============================================
// Data Management Commands
// ============================================

#[tauri::command]
async fn export_data(state: State<'_, AppState>, app: AppHandle) -> Result<Option<PathBuf>, String> {
    let backup = Backup::from_store(&state.store());
    let file_name = format!("notifications-{}.json", Utc::now().format("%Y-%m-%d"));

    // Run blocking dialog on a separate thread to avoid freezing the UI
    let dialog_app = app.clone();
    let picked = tauri::async_runtime::spawn_blocking(move || {
        dialog_app
            .dialog()
            .file()
            .add_filter("JSON", &["json"])
            .set_file_name(file_name)
            .blocking_save_file()
    })
    .await
    .map_err(|e| e.to_string())?;

    let Some(file_path) = picked else {
        return Ok(None);
    };
    let path = file_path.into_path().map_err(|e| fail(&app, e))?;
    backup.write_to(&path).map_err(|e| fail(&app, e))?;
    toast(&app, Toast::success("Data exported successfully"));
    Ok(Some(path))
}

#[tauri::command]
async fn import_data(state: State<'_, AppState>, app: AppHandle) -> Result<Option<ImportSummary>, String> {
    let dialog_app = app.clone();
    let picked = tauri::async_runtime::spawn_blocking(move || {
        dialog_app
            .dialog()
            .file()
            .add_filter("JSON", &["json"])
            .blocking_pick_file()
    })
    .await
    .map_err(|e| e.to_string())?;

    let Some(file_path) = picked else {
        return Ok(None);
    };
    let path = file_path.into_path().map_err(|e| fail(&app, e))?;
    let backup = Backup::read_from(&path).map_err(|e| fail(&app, e))?;
    let summary = state.store().import(backup);
    toast(
        &app,
        Toast::success(format!(
            "Imported {} notifications and {} templates",
            summary.notifications_added, summary.templates_added
        )),
    );
    Ok(Some(summary))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            app.handle().plugin(tauri_plugin_dialog::init())?;
            #[cfg(desktop)]
            {
                app.handle().plugin(tauri_plugin_process::init())?;
                app.handle().plugin(tauri_plugin_window_state::Builder::default().build())?;
            }

            // Initialize Config
            let config_dir = app.path().app_config_dir().unwrap_or(PathBuf::from("."));
            let config_manager = ConfigManager::new(config_dir);
            let settings = config_manager.load();

            let mut store = if settings.seed_demo_data {
                NotificationStore::with_seed_data(Utc::now())
            } else {
                NotificationStore::new()
            };
            store.set_active_view(settings.startup_view);

            // Session record lives next to the other app data
            let data_dir = app.path().app_data_dir().unwrap_or(PathBuf::from("."));
            let auth = AuthManager::new(SessionStore::new(data_dir), settings.auth_latency());

            log::info!(
                "Notification hub started with {} notifications, {} templates",
                store.notifications().len(),
                store.templates().len()
            );

            app.manage(AppState {
                store: Mutex::new(store),
                auth: tokio::sync::Mutex::new(auth),
                settings: Mutex::new(settings),
                config_manager,
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session
            get_session,
            login,
            register,
            logout,
            update_preferences,
            get_settings,
            save_settings,
            // Notifications
            get_list,
            get_notifications,
            get_notification,
            get_stats,
            create_notification,
            update_notification,
            delete_notification,
            permanently_delete_notification,
            restore_notification,
            mark_as_read,
            mark_as_unread,
            mark_as_archived,
            bulk_mark_as_read,
            bulk_delete,
            bulk_restore,
            bulk_permanently_delete,
            toggle_selection,
            select_all,
            clear_selection,
            set_active_view,
            set_filter,
            clear_filter,
            set_search,
            toggle_category_filter,
            // Templates
            get_templates,
            edit_template_text,
            template_form,
            apply_template,
            create_template,
            update_template,
            use_template,
            delete_template,
            duplicate_template,
            // Data management
            export_data,
            import_data
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
