use payloads::{APIClient, ClientError, Program};

use crate::ClientContext;
use crate::hooks::{CachedCollection, FetchHookReturn, use_collection};
use crate::state::{Action, FetchStatus, State};

pub(crate) struct Programs;

impl CachedCollection for Programs {
    type Item = Program;

    const NAME: &'static str = "programs";

    fn status(state: &State) -> &FetchStatus {
        &state.programs_status
    }

    fn items(state: &State) -> &[Program] {
        &state.programs
    }

    fn set_status(status: FetchStatus) -> Action {
        Action::SetProgramsStatus(status)
    }

    fn set_items(items: Vec<Program>) -> Action {
        Action::SetPrograms(items)
    }

    async fn fetch(api: &APIClient) -> Result<Vec<Program>, ClientError> {
        api.list_programs().await
    }
}

/// Programs, fetched at most once per session and cached in the store.
///
/// A failed fetch is recorded in the store's error and is not retried; use
/// [`refresh_programs`] for that.
pub async fn use_programs(cx: &ClientContext) -> FetchHookReturn<Vec<Program>> {
    use_collection::<Programs>(cx, false).await
}

/// Re-fetch programs regardless of what is cached, unless a fetch is
/// already in flight.
pub async fn refresh_programs(
    cx: &ClientContext,
) -> FetchHookReturn<Vec<Program>> {
    use_collection::<Programs>(cx, true).await
}
