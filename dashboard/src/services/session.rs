//! # Session Store
//!
//! The signed-in user's token, profile, refresh token and currency choice,
//! persisted as `session.json` in the session directory. Writes go to a
//! temporary file that is then renamed over the old one, so a crash never
//! leaves a half-written session. Logging out deletes the file.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::UserProfile;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file error: {0}")]
    Io(#[from] io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub refresh_token: Option<String>,
    pub selected_currency: Option<String>,
}

/// Shared handle to the current session; clones see the same state
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Load the session saved in `dir`, starting empty if there is none
    pub fn open(dir: &Path) -> Result<Self, SessionError> {
        let path = dir.join(SESSION_FILE);
        let session = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Session::default(),
            Err(e) => return Err(e.into()),
        };
        info!("Opened session store at {:?}", path);
        Ok(Self {
            path: Some(path),
            current: Arc::new(RwLock::new(session)),
        })
    }

    /// A session that lives only in memory
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            current: Arc::new(RwLock::new(Session::default())),
        }
    }

    pub fn session(&self) -> Session {
        match self.current.read() {
            Ok(session) => session.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session().token
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(
        &self,
        token: impl Into<String>,
        refresh_token: Option<String>,
        user: UserProfile,
    ) -> Result<(), SessionError> {
        info!("Signed in as {}", user.email);
        let token = token.into();
        self.modify(move |session| {
            session.token = Some(token);
            session.refresh_token = refresh_token;
            session.user = Some(user);
        })
    }

    pub fn set_selected_currency(&self, currency: impl Into<String>) -> Result<(), SessionError> {
        let currency = currency.into();
        self.modify(move |session| session.selected_currency = Some(currency))
    }

    /// Forget everything and remove the saved file
    pub fn logout(&self) -> Result<(), SessionError> {
        self.replace(Session::default());
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        info!("Logged out");
        Ok(())
    }

    fn replace(&self, session: Session) {
        match self.current.write() {
            Ok(mut current) => *current = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    fn modify<F: FnOnce(&mut Session)>(&self, change: F) -> Result<(), SessionError> {
        let mut session = self.session();
        change(&mut session);
        self.save(&session)?;
        self.replace(session);
        Ok(())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let temp = path.with_extension("json.tmp");
        fs::write(&temp, serde_json::to_vec_pretty(session)?)?;
        if let Err(e) = fs::rename(&temp, path) {
            warn!("Failed to replace session file {:?}: {}", path, e);
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pastor() -> UserProfile {
        UserProfile {
            id: "user_1".to_string(),
            name: "Grace Mensah".to_string(),
            email: "grace@church.org".to_string(),
            role: "admin".to_string(),
        }
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        assert!(!store.is_signed_in());

        store
            .sign_in("tok-123", Some("refresh-456".to_string()), pastor())
            .unwrap();
        store.set_selected_currency("GHS").unwrap();

        let reopened = SessionStore::open(dir.path()).unwrap();
        let session = reopened.session();
        assert_eq!(session.token.as_deref(), Some("tok-123"));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-456"));
        assert_eq!(session.selected_currency.as_deref(), Some("GHS"));
        assert_eq!(session.user, Some(pastor()));
        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[test]
    fn test_logout_clears_memory_and_file() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.sign_in("tok", None, pastor()).unwrap();
        assert!(dir.path().join(SESSION_FILE).exists());

        store.logout().unwrap();
        assert_eq!(store.session(), Session::default());
        assert!(!dir.path().join(SESSION_FILE).exists());

        // Logging out twice is harmless
        store.logout().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{ not json").unwrap();
        assert!(matches!(
            SessionStore::open(dir.path()),
            Err(SessionError::Json(_))
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::ephemeral();
        let clone = store.clone();
        store.sign_in("tok", None, pastor()).unwrap();
        assert_eq!(clone.token().as_deref(), Some("tok"));
    }
}
