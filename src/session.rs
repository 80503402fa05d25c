use std::{fs, path::Path, path::PathBuf, sync::Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils;

pub const FALLBACK_TOKEN: &str = "dummy-token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session store lock poisoned")]
    Poisoned,
}

/// The two persisted entries, under the key names the app has always used.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StoredSession {
    #[serde(rename = "userToken", skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    /// JSON-encoded [`UserProfile`].
    #[serde(rename = "userData", skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub email: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

pub struct SessionStore {
    path: PathBuf,
    data: Mutex<StoredSession>,
}

impl SessionStore {
    pub fn open_default() -> Self {
        Self::open(utils::session_path())
    }

    pub fn open(path: PathBuf) -> Self {
        let data = read_session(&path).unwrap_or_else(|err| {
            tracing::warn!(path = ?path, error = %err, "unreadable session file, starting signed out");
            StoredSession::default()
        });
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<StoredSession, SessionError> {
        self.data
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| SessionError::Poisoned)
    }

    pub fn update<F>(&self, transform: F) -> Result<StoredSession, SessionError>
    where
        F: FnOnce(&mut StoredSession),
    {
        let mut guard = self.data.lock().map_err(|_| SessionError::Poisoned)?;
        transform(&mut guard);
        write_session(&self.path, &guard)?;
        Ok(guard.clone())
    }
}

fn read_session(path: &Path) -> Result<StoredSession, SessionError> {
    if !path.exists() {
        return Ok(StoredSession::default());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_session(path: &Path, session: &StoredSession) -> Result<(), SessionError> {
    utils::ensure_parent(path)?;
    let contents = serde_json::to_string_pretty(session)?;
    fs::write(path, contents)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialRoute {
    Welcome,
    Home,
}

/// Signed-in state, handed to whichever screens need it. Built once before
/// the first render and torn down explicitly on logout.
pub struct Session {
    store: SessionStore,
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn initialize(store: SessionStore) -> Result<Self, SessionError> {
        let stored = store.read()?;
        let token = stored.user_token.filter(|t| !t.is_empty());
        let user = stored.user_data.as_deref().and_then(|raw| {
            serde_json::from_str::<UserProfile>(raw)
                .map_err(|err| tracing::warn!(error = %err, "ignoring malformed stored user"))
                .ok()
        });
        tracing::info!(signed_in = token.is_some(), "session initialized");
        Ok(Self { store, token, user })
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn initial_route(&self) -> InitialRoute {
        if self.is_logged_in() {
            InitialRoute::Home
        } else {
            InitialRoute::Welcome
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn login(&mut self, profile: UserProfile) -> Result<(), SessionError> {
        let token = profile
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_TOKEN.to_string());
        let encoded = serde_json::to_string(&profile)?;
        self.store.update(|stored| {
            stored.user_token = Some(token.clone());
            stored.user_data = Some(encoded);
        })?;
        tracing::info!(user_id = %profile.user_id, "signed in");
        self.token = Some(token);
        self.user = Some(profile);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.update(|stored| {
            stored.user_token = None;
            stored.user_data = None;
        })?;
        tracing::info!("signed out");
        self.token = None;
        self.user = None;
        Ok(())
    }
}
