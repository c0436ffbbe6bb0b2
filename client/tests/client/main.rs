mod favorites;
mod persistence;
mod programs;

use client::{AppStore, ClientContext};
use test_helpers::{TestApp, mock};

/// A context for the fixture user against `app`, with throwaway storage.
fn context(app: &TestApp) -> ClientContext {
    ClientContext::new(
        app.client.clone(),
        AppStore::in_memory(),
        Some(mock::USER_ID.into()),
    )
}
