use std::{collections::HashMap, path::PathBuf, sync::RwLock};

use {
    minab_common::Result,
    tracing::{debug, info, warn},
};

use crate::credential::Credential;

/// Storage slot name inside the session file.
const SESSION_SLOT: &str = "session";

/// Process-wide holder of the caller's session credential.
///
/// At most one credential is active per client instance. Writes must be
/// visible to the very next read — implementations keep no caching layer,
/// so a login or logout takes effect on the next outgoing request.
pub trait CredentialStore: Send + Sync {
    /// Current credential, already normalized: legacy sentinel values read
    /// back from persistence come out as `None`, never as a literal token.
    fn get(&self) -> Option<Credential>;

    fn set(&self, credential: Credential) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// File-based credential storage at `~/.config/minab/session.json`.
///
/// Survives process restarts so the identity context can be recomputed after
/// a reload without re-authentication. Reads are tolerant: a missing or
/// unparseable file is the absent state, not an error.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new() -> Self {
        let path = directories::ProjectDirs::from("", "", "minab")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("session.json");
        Self { path }
    }

    /// Create a store at a specific path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_slots(&self) -> Option<HashMap<String, String>> {
        let path = self.path.display().to_string();
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path, "session file not found");
                return None;
            },
            Err(e) => {
                warn!(path = %path, error = %e, "session file read failed");
                return None;
            },
        };

        match serde_json::from_str(&data) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(path = %path, error = %e, "session file parse failed");
                None
            },
        }
    }

    fn write_slots(&self, slots: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(slots)
            .map_err(|e| minab_common::Error::message(format!("serialize session file: {e}")))?;
        std::fs::write(&self.path, &data)?;

        // Owner-only: the file holds a bearer token.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        let slots = self.read_slots()?;
        // Normalization happens here, at the storage boundary: a stored
        // "undefined" string comes out as the absent state.
        slots.get(SESSION_SLOT).and_then(Credential::parse)
    }

    fn set(&self, credential: Credential) -> Result<()> {
        info!(path = %self.path.display(), "saving session credential");
        let mut slots = self.read_slots().unwrap_or_default();
        slots.insert(SESSION_SLOT.to_string(), credential.as_str().to_string());
        self.write_slots(&slots)
    }

    fn clear(&self) -> Result<()> {
        info!(path = %self.path.display(), "clearing session credential");
        let Some(mut slots) = self.read_slots() else {
            return Ok(());
        };
        slots.remove(SESSION_SLOT);
        self.write_slots(&slots)
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory credential storage, for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        match self.slot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, credential: Credential) -> Result<()> {
        match self.slot.write() {
            Ok(mut guard) => *guard = Some(credential),
            Err(poisoned) => *poisoned.into_inner() = Some(credential),
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.slot.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileCredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::with_path(dir.path().join("session.json"));
        (dir, store)
    }

    #[test]
    fn file_store_round_trip() {
        let (_dir, store) = temp_store();
        assert!(store.get().is_none());

        store.set(Credential::parse("tok123").unwrap()).unwrap();
        assert_eq!(store.get().unwrap().as_str(), "tok123");

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let (dir, store) = temp_store();
        store.set(Credential::parse("tok123").unwrap()).unwrap();

        let reopened = FileCredentialStore::with_path(dir.path().join("session.json"));
        assert_eq!(reopened.get().unwrap().as_str(), "tok123");
    }

    #[test]
    fn stored_sentinel_reads_back_as_absent() {
        let (_dir, store) = temp_store();
        // A loosely-typed writer persisted the string "undefined".
        std::fs::write(&store.path, r#"{"session": "undefined"}"#).unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn corrupt_file_reads_back_as_absent() {
        let (_dir, store) = temp_store();
        std::fs::write(&store.path, "not json").unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn clear_on_missing_file_is_fine() {
        let (_dir, store) = temp_store();
        store.clear().unwrap();
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().is_none());
        store.set(Credential::parse("tok").unwrap()).unwrap();
        assert_eq!(store.get().unwrap().as_str(), "tok");
        store.clear().unwrap();
        assert!(store.get().is_none());
    }
}
