//! Authenticated session state.
//!
//! A [`Session`] is total: holding one means holding both the user record
//! and the bearer token. Application state carries `Option<Session>`, and
//! only the navigation guard branches on its absence; views that require
//! authentication receive `&Session` and never re-check.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::models::{AuthResponse, User};

/// The client's belief about who is signed in, plus the credential that
/// proves it to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    /// The signed-in user's id.
    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    /// The bearer credential for `Authorization` headers.
    pub fn bearer(&self) -> &str {
        &self.token
    }

    /// Loads the persisted session from the default path, if any.
    ///
    /// A missing file is not an error; an unreadable or unparsable file is.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&paths::session_path())
    }

    /// Loads a persisted session from a specific path.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;
        Ok(Some(session))
    }

    /// Persists this session to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::session_path())
    }

    /// Persists this session to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))
    }

    /// Removes the persisted session at the default path.
    ///
    /// Returns whether a session file existed.
    pub fn clear() -> Result<bool> {
        Self::clear_at(&paths::session_path())
    }

    /// Removes the persisted session at a specific path.
    pub fn clear_at(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove session at {}", path.display()))?;
        Ok(true)
    }
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            user: resp.user,
            token: resp.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn sample() -> Session {
        Session {
            user: User {
                id: "u1".to_string(),
                username: "ada".to_string(),
                email: None,
            },
            token: "jwt-abc".to_string(),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        sample().save_to(&path).unwrap();
        let loaded = Session::load_from(&path).unwrap();
        assert_eq!(loaded, Some(sample()));
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Session::load_from(&dir.path().join("session.json")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_load_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(Session::load_from(&path).is_err());
    }

    #[test]
    fn test_clear_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        assert!(!Session::clear_at(&path).unwrap());
        sample().save_to(&path).unwrap();
        assert!(Session::clear_at(&path).unwrap());
        assert!(!path.exists());
    }
}
