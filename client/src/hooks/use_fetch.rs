use payloads::{APIClient, ClientError};

use crate::ClientContext;
use crate::state::{Action, FetchStatus, State};

/// Snapshot handed back by the collection hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchHookReturn<T> {
    pub data: T,
    pub status: FetchStatus,
    /// Whether anything in the store is loading, not just this collection.
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> FetchHookReturn<T> {
    /// Returns true if this is the initial load (nothing fetched yet and no
    /// error).
    pub fn is_initial_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Empty | FetchStatus::Loading)
            && self.error.is_none()
    }
}

/// A collection fetched once per session and cached in the store.
pub(crate) trait CachedCollection {
    type Item: Clone;

    /// For log lines.
    const NAME: &'static str;

    fn status(state: &State) -> &FetchStatus;
    fn items(state: &State) -> &[Self::Item];
    fn set_status(status: FetchStatus) -> Action;
    fn set_items(items: Vec<Self::Item>) -> Action;

    async fn fetch(api: &APIClient) -> Result<Vec<Self::Item>, ClientError>;
}

/// Fetch-with-cache composer shared by the collection hooks.
///
/// Without `force`, fetches only from `Empty`. With it, re-fetches from any
/// settled state. A collection that is already `Loading` is never fetched
/// twice: the status flips before the request goes out, so a concurrent
/// caller sees it and returns the in-flight snapshot. If the future is
/// dropped before the request settles, the previous status is restored.
pub(crate) async fn use_collection<C: CachedCollection>(
    cx: &ClientContext,
    force: bool,
) -> FetchHookReturn<Vec<C::Item>> {
    let previous = C::status(&cx.store.state()).clone();
    let should_fetch = match previous {
        FetchStatus::Empty => true,
        FetchStatus::Loading => false,
        FetchStatus::Populated | FetchStatus::Failed(_) => force,
    };

    if should_fetch {
        // a dropped future must not leave the collection stuck in Loading
        let pending = cx.store.pending(C::set_status(previous));
        cx.store.apply(C::set_status(FetchStatus::Loading));
        cx.store.apply(Action::SetError(None));

        let result = C::fetch(&cx.api).await;
        pending.settle();
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "Fetched {}", C::NAME);
                cx.store.apply(C::set_items(items));
                cx.store.apply(C::set_status(FetchStatus::Populated));
            }
            Err(e) => {
                tracing::error!("Error fetching {}: {e}", C::NAME);
                let message = e.message();
                cx.store
                    .apply(C::set_status(FetchStatus::Failed(message.clone())));
                cx.store.apply(Action::SetError(Some(message)));
            }
        }
    }

    snapshot::<C>(&cx.store.state())
}

pub(crate) fn snapshot<C: CachedCollection>(
    state: &State,
) -> FetchHookReturn<Vec<C::Item>> {
    let status = C::status(state).clone();
    FetchHookReturn {
        data: C::items(state).to_vec(),
        error: status.error().map(str::to_string),
        is_loading: state.is_loading(),
        status,
    }
}
