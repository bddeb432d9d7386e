//! Mock authentication and session handling.
//!
//! There is no credential check: any non-empty email with a long enough
//! password is accepted after a simulated round-trip delay.

pub mod session;
pub mod user;

use std::time::Duration;

use self::session::SessionStore;
use self::user::{name_from_email, PreferencesPatch, User};
use crate::core::error::Result;

/// Shortest password the mock backend accepts
pub const MIN_PASSWORD_LEN: usize = 6;

/// Whether the mock backend accepts these credentials.
pub fn credentials_acceptable(email: &str, password: &str) -> bool {
    !email.is_empty() && password.chars().count() >= MIN_PASSWORD_LEN
}

pub struct AuthManager {
    user: Option<User>,
    store: SessionStore,
    latency: Duration,
}

impl AuthManager {
    /// Create the manager, restoring any persisted session.
    pub fn new(store: SessionStore, latency: Duration) -> Self {
        let user = store.load();
        if let Some(user) = &user {
            log::info!("Restored session for {}", user.email);
        }
        Self {
            user,
            store,
            latency,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn start_session(&mut self, user: User) -> Result<()> {
        self.store.save(&user)?;
        log::info!("Signed in as {}", user.email);
        self.user = Some(user);
        Ok(())
    }

    /// Returns `Ok(false)` when the credentials are rejected.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        self.simulate_round_trip().await;
        if !credentials_acceptable(email, password) {
            log::debug!("Rejected login for {:?}", email);
            return Ok(false);
        }
        self.start_session(User::mock(email, name_from_email(email)))?;
        Ok(true)
    }

    /// Returns `Ok(false)` when the details are rejected.
    pub async fn register(&mut self, email: &str, password: &str, name: &str) -> Result<bool> {
        self.simulate_round_trip().await;
        if !credentials_acceptable(email, password) || name.is_empty() {
            log::debug!("Rejected registration for {:?}", email);
            return Ok(false);
        }
        self.start_session(User::mock(email, name))?;
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.user.take() {
            log::info!("Signed out {}", user.email);
        }
        self.store.clear()
    }

    /// Merge and persist preferences. Returns false without a session.
    pub fn update_preferences(&mut self, patch: PreferencesPatch) -> Result<bool> {
        let Some(user) = self.user.as_mut() else {
            return Ok(false);
        };
        user.preferences.apply(patch);
        self.store.save(user)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::user::Theme;
    use tempfile::tempdir;

    fn manager(dir: &std::path::Path) -> AuthManager {
        AuthManager::new(SessionStore::new(dir.to_path_buf()), Duration::ZERO)
    }

    #[test]
    fn test_credentials_rule() {
        assert!(!credentials_acceptable("a@b.com", "short"));
        assert!(!credentials_acceptable("", "longenough"));
        assert!(credentials_acceptable("a@b.com", "sixsix"));
    }

    #[tokio::test]
    async fn test_login_scenario() {
        let dir = tempdir().unwrap();
        let mut auth = manager(dir.path());
        assert!(auth.current_user().is_none());

        assert!(!auth.login("a@b.com", "short").await.unwrap());
        assert!(auth.current_user().is_none());

        assert!(auth.login("a@b.com", "longenough").await.unwrap());
        let user = auth.current_user().unwrap();
        assert_eq!(user.name, "a");
        assert_eq!(user.id, "1");

        // A fresh manager on the same storage is already signed in
        let restored = manager(dir.path());
        assert_eq!(restored.current_user().map(|u| u.email.as_str()), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_register_requires_name() {
        let dir = tempdir().unwrap();
        let mut auth = manager(dir.path());

        assert!(!auth.register("a@b.com", "longenough", "").await.unwrap());
        assert!(!auth.register("a@b.com", "short", "Ann").await.unwrap());
        assert!(auth.register("a@b.com", "longenough", "Ann").await.unwrap());
        assert_eq!(auth.current_user().unwrap().name, "Ann");
    }

    #[tokio::test]
    async fn test_logout_clears_storage() {
        let dir = tempdir().unwrap();
        let mut auth = manager(dir.path());
        auth.login("a@b.com", "longenough").await.unwrap();

        auth.logout().unwrap();
        assert!(auth.current_user().is_none());
        assert!(manager(dir.path()).current_user().is_none());
    }

    #[tokio::test]
    async fn test_preferences_persist() {
        let dir = tempdir().unwrap();
        let mut auth = manager(dir.path());
        assert!(!auth.update_preferences(PreferencesPatch::default()).unwrap());

        auth.login("a@b.com", "longenough").await.unwrap();
        let updated = auth
            .update_preferences(PreferencesPatch {
                theme: Some(Theme::Dark),
                compact_view: Some(true),
                ..PreferencesPatch::default()
            })
            .unwrap();
        assert!(updated);

        let restored = manager(dir.path());
        let prefs = &restored.current_user().unwrap().preferences;
        assert_eq!(prefs.theme, Theme::Dark);
        assert!(prefs.compact_view);
        assert!(prefs.email_notifications);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let dir = tempdir().unwrap();
        let mut auth = AuthManager::new(
            SessionStore::new(dir.path().to_path_buf()),
            Duration::from_millis(1000),
        );
        let started = tokio::time::Instant::now();
        assert!(auth.login("a@b.com", "longenough").await.unwrap());
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
