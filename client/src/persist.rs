//! Durable storage for the persisted subset of the store: favorites, the
//! current user, and filter criteria.
//!
//! Records are wrapped in a versioned envelope:
//!
//! ```json
//! { "version": 1, "state": { "favorites": [], "user": null, "filters": {} } }
//! ```
//!
//! Version 0 records kept filters as strings, with `""` meaning
//! unconstrained. They are migrated on load.

use payloads::{Format, InstitutionId, Level, ProgramId, User};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use crate::filters::FilterCriteria;

/// Name under which the record is stored.
pub const STORAGE_KEY: &str = "upnext-store";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Persisted state is malformed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persisted state has unsupported version {0}")]
    UnknownVersion(u32),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// The subset of client state that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub favorites: Vec<ProgramId>,
    pub user: Option<User>,
    pub filters: FilterCriteria,
}

/// A place to keep one serialized record.
pub trait PersistStorage {
    fn load(&self) -> Result<Option<String>, PersistError>;
    fn save(&self, contents: &str) -> Result<(), PersistError>;
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    state: &'a PersistedState,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    #[serde(default)]
    version: u32,
    state: serde_json::Value,
}

pub fn encode(state: &PersistedState) -> Result<String, PersistError> {
    let envelope = EnvelopeOut {
        version: SCHEMA_VERSION,
        state,
    };
    Ok(serde_json::to_string(&envelope)?)
}

pub fn decode(raw: &str) -> Result<PersistedState, PersistError> {
    let envelope: EnvelopeIn = serde_json::from_str(raw)?;
    match envelope.version {
        0 => {
            let legacy: LegacyState = serde_json::from_value(envelope.state)?;
            Ok(legacy.into())
        }
        SCHEMA_VERSION => Ok(serde_json::from_value(envelope.state)?),
        other => Err(PersistError::UnknownVersion(other)),
    }
}

/// Read and decode whatever `storage` holds.
pub fn read(
    storage: &dyn PersistStorage,
) -> Result<Option<PersistedState>, PersistError> {
    storage.load()?.map(|raw| decode(&raw)).transpose()
}

pub fn write(
    storage: &dyn PersistStorage,
    state: &PersistedState,
) -> Result<(), PersistError> {
    storage.save(&encode(state)?)
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyState {
    favorites: Vec<ProgramId>,
    user: Option<User>,
    filters: LegacyFilters,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LegacyFilters {
    category: String,
    level: String,
    format: String,
    institution: String,
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

impl From<LegacyState> for PersistedState {
    fn from(legacy: LegacyState) -> Self {
        let LegacyFilters {
            category,
            level,
            format,
            institution,
        } = legacy.filters;
        let mut favorites = legacy.favorites;
        dedup_in_order(&mut favorites);
        Self {
            favorites,
            user: legacy.user,
            filters: FilterCriteria {
                category: non_empty(category),
                level: level.parse::<Level>().ok(),
                format: format.parse::<Format>().ok(),
                institution: non_empty(institution).map(InstitutionId),
                search: String::new(),
            },
        }
    }
}

/// Drop repeated ids, keeping the first occurrence.
pub(crate) fn dedup_in_order(ids: &mut Vec<ProgramId>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

/// In-memory storage. Clones share the same slot, so a test can hand one
/// clone to a store, drop the store, and restore a fresh one from another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage(Rc<RefCell<Option<String>>>);

impl MemoryStorage {
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(Some(contents.into()))))
    }

    pub fn contents(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

impl PersistStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Ok(self.contents())
    }

    fn save(&self, contents: &str) -> Result<(), PersistError> {
        *self.0.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::path::{Path, PathBuf};

    use super::{PersistError, PersistStorage, STORAGE_KEY};

    /// A json file on disk. Writes go to a sibling temp file first and are
    /// renamed into place, so a crash never leaves a half-written record.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<dir>/upnext-store.json`
        pub fn in_dir(dir: impl AsRef<Path>) -> Self {
            Self::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl PersistStorage for FileStorage {
        fn load(&self) -> Result<Option<String>, PersistError> {
            match std::fs::read_to_string(&self.path) {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn save(&self, contents: &str) -> Result<(), PersistError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let tmp = self.path.with_extension("json.tmp");
            std::fs::write(&tmp, contents)?;
            std::fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{PersistError, PersistStorage, STORAGE_KEY};

    /// The browser's `window.localStorage`.
    #[derive(Debug, Clone, Default)]
    pub struct LocalStorage;

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| {
                PersistError::Unavailable("no localStorage".into())
            })
    }

    impl PersistStorage for LocalStorage {
        fn load(&self) -> Result<Option<String>, PersistError> {
            storage()?
                .get_item(STORAGE_KEY)
                .map_err(|e| PersistError::Unavailable(format!("{e:?}")))
        }

        fn save(&self, contents: &str) -> Result<(), PersistError> {
            storage()?
                .set_item(STORAGE_KEY, contents)
                .map_err(|e| PersistError::Unavailable(format!("{e:?}")))
        }
    }
}
