//! Session persisted as a JSON file between invocations.
//!
//! ERROR HANDLING
//! ==============
//! The credential-store capability cannot fail, so write errors are logged
//! and the in-memory copy stays authoritative for the rest of the run. A
//! missing or unreadable file loads as signed out.
//!
//! The file holds live tokens, so on unix it is kept readable by its owner
//! only (mode 0600).

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use quill::{CredentialStore, Session};

pub struct FileStore {
    path: PathBuf,
    session: RefCell<Session>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = load(&path).unwrap_or_default();
        Self { path, session: RefCell::new(session) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, session: &Session) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        let mut file = owner_only().write(true).create(true).truncate(true).open(&self.path)?;
        restrict(&file)?;
        file.write_all(raw.as_bytes())
    }
}

#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

#[cfg(unix)]
fn owner_only() -> fs::OpenOptions {
    use std::os::unix::fs::OpenOptionsExt;
    let mut options = fs::OpenOptions::new();
    options.mode(SESSION_FILE_MODE);
    options
}

#[cfg(not(unix))]
fn owner_only() -> fs::OpenOptions {
    fs::OpenOptions::new()
}

/// Tighten a file created by an older version or another tool.
#[cfg(unix)]
fn restrict(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

fn load(path: &Path) -> Option<Session> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable session file");
            None
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Session {
        self.session.borrow().clone()
    }

    fn set(&self, session: Session) {
        if let Err(err) = self.persist(&session) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to save session");
        }
        *self.session.borrow_mut() = session;
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove session");
            }
        }
        *self.session.borrow_mut() = Session::anonymous();
    }
}
