use payloads::{APIClient, ClientError, Institution};

use crate::ClientContext;
use crate::hooks::{CachedCollection, FetchHookReturn, use_collection};
use crate::state::{Action, FetchStatus, State};

pub(crate) struct Institutions;

impl CachedCollection for Institutions {
    type Item = Institution;

    const NAME: &'static str = "institutions";

    fn status(state: &State) -> &FetchStatus {
        &state.institutions_status
    }

    fn items(state: &State) -> &[Institution] {
        &state.institutions
    }

    fn set_status(status: FetchStatus) -> Action {
        Action::SetInstitutionsStatus(status)
    }

    fn set_items(items: Vec<Institution>) -> Action {
        Action::SetInstitutions(items)
    }

    async fn fetch(api: &APIClient) -> Result<Vec<Institution>, ClientError> {
        api.list_institutions().await
    }
}

/// Same policy as `use_programs`, tracked independently.
pub async fn use_institutions(
    cx: &ClientContext,
) -> FetchHookReturn<Vec<Institution>> {
    use_collection::<Institutions>(cx, false).await
}

pub async fn refresh_institutions(
    cx: &ClientContext,
) -> FetchHookReturn<Vec<Institution>> {
    use_collection::<Institutions>(cx, true).await
}
