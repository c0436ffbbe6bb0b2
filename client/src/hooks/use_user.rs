use payloads::{Level, User, requests};

use crate::ClientContext;
use crate::hooks::HookError;
use crate::state::Action;

/// Fields the profile form edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub level: Level,
    pub interests: Vec<String>,
}

impl From<ProfileUpdate> for requests::UserDraft {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            name: Some(update.name),
            email: Some(update.email),
            interests: Some(update.interests),
            level: Some(update.level),
        }
    }
}

/// The current user, loaded from the API if the store has none yet.
///
/// Load failures land in the store's error; the restored (or missing) user
/// is returned unchanged.
pub async fn use_user(cx: &ClientContext) -> Option<User> {
    if let Some(user) = cx.store.state().user.clone() {
        return Some(user);
    }
    let user_id = cx.user_id.as_ref()?;

    match cx.api.get_user(user_id).await {
        Ok(user) => {
            cx.store.apply(Action::SetUser(Some(user.clone())));
            Some(user)
        }
        Err(e) => {
            tracing::error!("Error fetching user: {e}");
            cx.store.apply(Action::SetError(Some(e.message())));
            None
        }
    }
}

/// Save the profile through the API and mirror the result into the store.
///
/// Errors propagate to the caller, which owns user-facing feedback.
pub async fn save_profile(
    cx: &ClientContext,
    update: ProfileUpdate,
) -> Result<User, HookError> {
    let user_id = cx
        .store
        .state()
        .user
        .as_ref()
        .map(|user| user.id.clone())
        .or_else(|| cx.user_id.clone())
        .ok_or(HookError::MissingUserId)?;

    let interests = update.interests.clone();
    cx.store.apply(Action::SetLoading(true));
    let loading = cx.store.pending(Action::SetLoading(false));
    let result = cx.api.update_user(&user_id, &update.into()).await;
    drop(loading);

    let user = result.inspect_err(|e| {
        tracing::error!("Error updating user: {e}");
    })?;
    cx.store.apply(Action::SetUser(Some(user.clone())));
    cx.store.apply(Action::UpdateUserInterests(interests));
    Ok(user)
}
