use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::client::error::ClientResult;
use crate::model::RecordCategory;

/// Which screen the client is on. Driven entirely by the persisted role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard(RecordCategory),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub role: Option<RecordCategory>,
}

impl Session {
    pub fn view(&self) -> View {
        match self.role {
            Some(role) => View::Dashboard(role),
            None => View::Login,
        }
    }
}

/// Persists the session as a single role string in a file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `PORTAL_SESSION_FILE`, or `finance-portal/role` under the user data dir.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("PORTAL_SESSION_FILE") {
            return PathBuf::from(path);
        }

        dirs::data_dir()
            .unwrap_or_else(env::temp_dir)
            .join("finance-portal")
            .join("role")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> ClientResult<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(e.into()),
        };

        let role = match RecordCategory::from_str(raw.trim()) {
            Ok(role) => Some(role),
            Err(_) => {
                warn!(path = %self.path.display(), "Ignoring unrecognised role in session file");
                None
            }
        };

        Ok(Session { role })
    }

    pub fn save(&self, role: RecordCategory) -> ClientResult<Session> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, role.as_ref())?;
        debug!(path = %self.path.display(), %role, "Session saved");

        Ok(Session { role: Some(role) })
    }

    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
