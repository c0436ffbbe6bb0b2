//! The store handle passed to every consumer.

use std::rc::Rc;
use yewdux::{Context, Dispatch};

use crate::persist::{self, MemoryStorage, PersistStorage};
use crate::state::{Action, State};

/// Handle to one isolated [`State`] container plus its persistence backend.
///
/// Cloning is cheap and every clone sees the same state. Each call to
/// [`AppStore::new`] gets its own yewdux context, so tests can run side by
/// side without sharing anything.
#[derive(Clone)]
pub struct AppStore {
    dispatch: Dispatch<State>,
    storage: Rc<dyn PersistStorage>,
}

impl AppStore {
    /// Create a store, restoring any record `storage` already holds.
    pub fn new(storage: impl PersistStorage + 'static) -> Self {
        let cx = Context::new();
        let store = Self {
            dispatch: Dispatch::new(&cx),
            storage: Rc::new(storage),
        };
        store.restore();
        store
    }

    /// A store backed by throwaway memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    fn restore(&self) {
        match persist::read(self.storage.as_ref()) {
            Ok(Some(persisted)) => {
                tracing::debug!(
                    favorites = persisted.favorites.len(),
                    "Restored persisted state"
                );
                self.dispatch.reduce_mut(|s| s.restore(persisted));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Discarding persisted state: {e}");
            }
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> Rc<State> {
        self.dispatch.get()
    }

    /// Apply one mutation, writing the persisted subset through to storage
    /// when the action touched it.
    pub fn apply(&self, action: Action) {
        tracing::trace!(?action, "apply");
        let persist = action.touches_persisted();
        self.dispatch.reduce_mut(|s| s.apply(action));
        if persist {
            self.persist();
        }
    }

    fn persist(&self) {
        let persisted = self.state().persisted();
        // a failed write must not undo the in-memory change
        if let Err(e) = persist::write(self.storage.as_ref(), &persisted) {
            tracing::error!("Failed to persist state: {e}");
        }
    }

    /// Arm `reset` to be applied if the returned guard is dropped before
    /// [`Pending::settle`] is called.
    pub(crate) fn pending(&self, reset: Action) -> Pending {
        Pending {
            store: self.clone(),
            reset: Some(reset),
        }
    }

    /// Register a callback for state changes. The subscription lives as long
    /// as the returned dispatch.
    pub fn subscribe<F>(&self, on_change: F) -> Dispatch<State>
    where
        F: Fn(Rc<State>) + 'static,
    {
        self.dispatch.clone().subscribe(on_change)
    }
}

/// Undoes a transient store change when the owning future is dropped
/// mid-request.
#[must_use]
pub(crate) struct Pending {
    store: AppStore,
    reset: Option<Action>,
}

impl Pending {
    /// The request finished; keep whatever the caller applies next.
    pub(crate) fn settle(mut self) {
        self.reset = None;
    }
}

impl Drop for Pending {
    fn drop(&mut self) {
        if let Some(reset) = self.reset.take() {
            tracing::debug!(?reset, "Request dropped before settling");
            self.store.apply(reset);
        }
    }
}
