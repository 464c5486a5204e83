//! Persisted login session
//!
//! The signed-in user is stored as JSON in the data directory. A missing file
//! means nobody is logged in; so does a corrupt one, which is logged and
//! otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};

use super::auth::User;

const SESSION_FILE: &str = "session.json";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store rooted at `<data_dir>/chermiti/`
    pub fn in_data_dir() -> Result<Self> {
        let base = dirs::data_dir().ok_or(SiteError::NoDataDir)?;
        Ok(Self::in_dir(base.join("chermiti")))
    }

    /// Store keeping its file directly in `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored user, if any
    pub fn load(&self) -> Option<User> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read session {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring corrupt session {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SiteError::SessionIo {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, json).map_err(|source| SiteError::SessionIo {
            path: self.path.clone(),
            source,
        })?;
        log::info!("Session saved for {}", user.email);
        Ok(())
    }

    /// Removes the stored session; clearing an empty store is not an error
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SiteError::SessionIo {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::auth::MockDirectory;

    #[test]
    fn save_then_load_returns_the_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path().join("nested"));
        assert_eq!(store.load(), None);

        let user = MockDirectory::new()
            .authenticate("admin@chermiti.com", "admin123")
            .unwrap();
        store.save(&user).unwrap();
        assert_eq!(store.load(), Some(user));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_session_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), None);
    }
}
