//! Session store and page guards.
//!
//! # Design
//! The current user lives as one JSON record under `sr_user` in the
//! session-scope store. The guards are presentation glue: when a check
//! fails they ask the [`Navigator`] to redirect and report `false`; they
//! never return an error.

use std::sync::Arc;

use crate::error::ApiError;
use crate::storage::{KeyValueStore, SESSION_USER_KEY};
use crate::types::{Role, SessionUser};

/// Redirect target when authentication is missing.
pub const LOGIN_PAGE: &str = "/login.html";

/// Redirect target when the role check fails.
pub const HOME_PAGE: &str = "/index.html";

/// Presentation-side navigation port.
pub trait Navigator: Send + Sync {
    fn redirect(&self, location: &str);
}

/// Navigator that goes nowhere, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNavigator;

impl Navigator for NullNavigator {
    fn redirect(&self, _location: &str) {}
}

/// Reads and writes the current-user record and derives the auth checks.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// The logged-in user, or `None` when nothing (or nothing readable) is
    /// stored.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.store
            .get(SESSION_USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn save_user(&self, user: &SessionUser) -> Result<(), ApiError> {
        let raw =
            serde_json::to_string(user).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.store.set(SESSION_USER_KEY, &raw);
        Ok(())
    }

    /// Clears the session record and sends the user back to the login page.
    pub fn logout(&self) {
        self.store.remove(SESSION_USER_KEY);
        self.navigator.redirect(LOGIN_PAGE);
    }

    /// `true` when a session exists; otherwise redirects to the login page.
    pub fn require_auth(&self) -> bool {
        if self.current_user().is_some() {
            return true;
        }
        tracing::debug!("no session, redirecting to {LOGIN_PAGE}");
        self.navigator.redirect(LOGIN_PAGE);
        false
    }

    /// `true` when a session exists and carries `role`; otherwise redirects
    /// to the home page.
    pub fn require_role(&self, role: Role) -> bool {
        match self.current_user() {
            Some(user) if user.rol == role => true,
            _ => {
                tracing::debug!(%role, "role check failed, redirecting to {HOME_PAGE}");
                self.navigator.redirect(HOME_PAGE);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn redirect(&self, location: &str) {
            self.visits
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(location.to_string());
        }
    }

    fn session() -> (SessionStore, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let store = SessionStore::new(Arc::new(MemoryStore::new()), navigator.clone());
        (store, navigator)
    }

    fn ana() -> SessionUser {
        SessionUser {
            id_usuario: 1,
            nombre: "Ana".to_string(),
            apellidos: "Pérez".to_string(),
            rol: Role::Medico,
            correo: Some("ana@example.com".to_string()),
        }
    }

    #[test]
    fn saved_user_is_readable() {
        let (session, _) = session();
        session.save_user(&ana()).unwrap();
        assert_eq!(session.current_user(), Some(ana()));
    }

    #[test]
    fn cleared_session_fails_both_guards_without_panicking() {
        let (session, navigator) = session();
        session.save_user(&ana()).unwrap();
        session.logout();

        assert!(session.current_user().is_none());
        assert!(!session.require_auth());
        assert!(!session.require_role(Role::Medico));
        assert_eq!(
            *navigator.visits.lock().unwrap(),
            vec![LOGIN_PAGE, LOGIN_PAGE, HOME_PAGE]
        );
    }

    #[test]
    fn guards_pass_with_matching_session() {
        let (session, navigator) = session();
        session.save_user(&ana()).unwrap();
        assert!(session.require_auth());
        assert!(session.require_role(Role::Medico));
        assert!(navigator.visits.lock().unwrap().is_empty());
    }

    #[test]
    fn role_mismatch_redirects_home() {
        let (session, navigator) = session();
        session.save_user(&ana()).unwrap();
        assert!(!session.require_role(Role::Administrador));
        assert_eq!(*navigator.visits.lock().unwrap(), vec![HOME_PAGE]);
    }

    #[test]
    fn corrupt_session_record_reads_as_absent() {
        let navigator = Arc::new(RecordingNavigator::default());
        let kv = Arc::new(MemoryStore::new());
        kv.set(SESSION_USER_KEY, "{broken");
        let session = SessionStore::new(kv, navigator);
        assert!(session.current_user().is_none());
        assert!(!session.require_auth());
    }
}
