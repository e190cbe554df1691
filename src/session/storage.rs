//! Session persistence
//!
//! Only the authentication fields survive a restart. They are kept as one
//! JSON document in the configured storage directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiError;
use crate::shared::models::User;

/// Persisted subset of the session; loading and error flags are never written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// JSON file holding a `PersistedSession`
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet
    pub fn load(&self) -> Result<Option<PersistedSession>, ApiError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error(&self.path, err)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| storage_error(&self.path, err))
    }

    pub fn save(&self, session: &PersistedSession) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| storage_error(parent, err))?;
        }
        let text = serde_json::to_string_pretty(session).map_err(|err| storage_error(&self.path, err))?;
        std::fs::write(&self.path, text).map_err(|err| storage_error(&self.path, err))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the file; a missing file is already clear
    pub fn clear(&self) -> Result<(), ApiError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(&self.path, err)),
        }
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> ApiError {
    ApiError::Storage(format!("{}: {}", path.display(), err))
}
