use payloads::{Program, ProgramId, UserId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::ClientContext;
use crate::hooks::HookError;
use crate::state::Action;

/// Program ids with a favorite mutation in flight.
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight(Rc<RefCell<HashSet<ProgramId>>>);

impl InFlight {
    fn acquire(
        &self,
        program_id: &ProgramId,
    ) -> Result<InFlightGuard, HookError> {
        if !self.0.borrow_mut().insert(program_id.clone()) {
            return Err(HookError::InFlight(program_id.clone()));
        }
        Ok(InFlightGuard {
            registry: self.clone(),
            program_id: program_id.clone(),
        })
    }

    pub(crate) fn contains(&self, program_id: &ProgramId) -> bool {
        self.0.borrow().contains(program_id)
    }
}

/// Releases the id when dropped, including when the owning future is.
struct InFlightGuard {
    registry: InFlight,
    program_id: ProgramId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.0.borrow_mut().remove(&self.program_id);
    }
}

/// Favorite operations for the context's user.
///
/// Favorites come from the persisted store; nothing is fetched unless
/// [`Favorites::sync_from_server`] is called.
pub struct Favorites<'a> {
    cx: &'a ClientContext,
}

pub fn use_favorites(cx: &ClientContext) -> Favorites<'_> {
    Favorites { cx }
}

impl Favorites<'_> {
    pub fn favorites(&self) -> Vec<ProgramId> {
        self.cx.store.state().favorites.clone()
    }

    pub fn is_favorite(&self, program_id: &ProgramId) -> bool {
        self.cx.store.state().is_favorite(program_id)
    }

    /// Whether a mutation for this program is still waiting on the API.
    pub fn is_pending(&self, program_id: &ProgramId) -> bool {
        self.cx.in_flight.contains(program_id)
    }

    pub fn favorite_programs(&self) -> Vec<Program> {
        self.cx
            .store
            .state()
            .favorite_programs()
            .into_iter()
            .cloned()
            .collect()
    }

    fn user_id(&self) -> Result<&UserId, HookError> {
        match &self.cx.user_id {
            Some(user_id) if !user_id.0.is_empty() => Ok(user_id),
            _ => {
                tracing::warn!("User ID is required to change favorites");
                Err(HookError::MissingUserId)
            }
        }
    }

    /// Register a favorite with the API, then record it locally.
    ///
    /// The store is only touched after the API accepted the change.
    pub async fn add_favorite(
        &self,
        program_id: &ProgramId,
    ) -> Result<(), HookError> {
        let user_id = self.user_id()?;
        let _guard = self.cx.in_flight.acquire(program_id)?;
        self.cx.api.add_favorite(user_id, program_id).await?;
        self.cx.store.apply(Action::AddFavorite(program_id.clone()));
        Ok(())
    }

    pub async fn remove_favorite(
        &self,
        program_id: &ProgramId,
    ) -> Result<(), HookError> {
        let user_id = self.user_id()?;
        let _guard = self.cx.in_flight.acquire(program_id)?;
        self.cx.api.remove_favorite(user_id, program_id).await?;
        self.cx
            .store
            .apply(Action::RemoveFavorite(program_id.clone()));
        Ok(())
    }

    /// Flip a favorite. Returns whether the program is a favorite afterwards.
    pub async fn toggle_favorite(
        &self,
        program_id: &ProgramId,
    ) -> Result<bool, HookError> {
        if self.is_favorite(program_id) {
            self.remove_favorite(program_id).await?;
            Ok(false)
        } else {
            self.add_favorite(program_id).await?;
            Ok(true)
        }
    }

    /// Replace the local list with the server's listing.
    pub async fn sync_from_server(&self) -> Result<Vec<ProgramId>, HookError> {
        let user_id = self.user_id()?;
        let favorites = self.cx.api.list_favorites(user_id).await?;
        let ids: Vec<ProgramId> =
            favorites.into_iter().map(|f| f.program_id).collect();
        self.cx.store.apply(Action::ReplaceFavorites(ids));
        Ok(self.favorites())
    }
}
