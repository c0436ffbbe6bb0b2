//! Client-side state layer for the UpNext program catalog.
//!
//! Views get their data through the [`hooks`], which fetch through the
//! [`APIClient`] and cache into the [`AppStore`]. Everything a hook needs
//! travels in a [`ClientContext`]; there is no global state.

pub mod config;
pub mod filters;
pub mod hooks;
pub mod logs;
pub mod persist;
pub mod state;
pub mod store;

pub use config::ClientConfig;
pub use filters::{FilterCriteria, FilterUpdate};
pub use hooks::HookError;
pub use state::{Action, FetchStatus, State};
pub use store::AppStore;

use payloads::{APIClient, UserId};
use std::rc::Rc;

use crate::hooks::use_favorites::InFlight;

/// Everything the hooks need, passed explicitly. Cheap to clone.
#[derive(Clone)]
pub struct ClientContext {
    pub api: Rc<APIClient>,
    pub store: AppStore,
    /// `None` makes favorite mutations fail with
    /// [`HookError::MissingUserId`].
    pub user_id: Option<UserId>,
    in_flight: InFlight,
}

impl ClientContext {
    pub fn new(
        api: APIClient,
        store: AppStore,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            api: Rc::new(api),
            store,
            user_id,
            in_flight: InFlight::default(),
        }
    }

    /// Build a context from configuration, persisting to the platform's
    /// storage.
    pub fn from_config(config: &ClientConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let store = AppStore::new(persist::FileStorage::in_dir(
            config.resolved_store_dir(),
        ));
        #[cfg(target_arch = "wasm32")]
        let store = AppStore::new(persist::LocalStorage);

        tracing::debug!(api = %config.api_base_url, "Client context ready");
        Self::new(config.api_client(), store, Some(config.user_id.clone()))
    }

    /// The same context acting without a user.
    pub fn without_user(&self) -> Self {
        Self {
            user_id: None,
            ..self.clone()
        }
    }
}
