//! Data-access hooks: the bridge between the API client and the store.
//!
//! Each hook takes the [`ClientContext`](crate::ClientContext) explicitly.
//! Within one call the order is always request, then store update.

pub mod use_favorites;
pub mod use_fetch;
pub mod use_institutions;
pub mod use_program;
pub mod use_programs;
pub mod use_user;

pub use use_favorites::{Favorites, use_favorites};
pub use use_fetch::FetchHookReturn;
pub(crate) use use_fetch::{CachedCollection, use_collection};
pub use use_institutions::{refresh_institutions, use_institutions};
pub use use_program::{Lookup, ProgramDetail, select_program};
pub use use_programs::{refresh_programs, use_programs};
pub use use_user::{ProfileUpdate, save_profile, use_user};

use payloads::{ClientError, ProgramId};

/// Failures of the mutating hooks.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// Raised before any request is made; nothing is mutated.
    #[error("User ID is required")]
    MissingUserId,
    #[error("A favorite change for program {0} is already in progress")]
    InFlight(ProgramId),
    #[error(transparent)]
    Client(#[from] ClientError),
}
