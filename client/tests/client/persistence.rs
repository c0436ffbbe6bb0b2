use client::hooks::use_favorites;
use client::persist::MemoryStorage;
use client::{Action, AppStore, ClientConfig, ClientContext, FilterUpdate};
use payloads::{Format, ProgramId};
use test_helpers::{mock, spawn_app};

#[tokio::test]
async fn favorites_and_filters_survive_a_restart() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let storage = MemoryStorage::default();
    let store = AppStore::new(storage.clone());
    let cx = ClientContext::new(
        app.client.clone(),
        store,
        Some(mock::USER_ID.into()),
    );

    use_favorites(&cx).add_favorite(&"2".into()).await?;
    cx.store.apply(Action::SetUser(Some(mock::user())));
    cx.store.apply(Action::SetFilters(
        FilterUpdate::default().format(Format::Online),
    ));
    cx.store.apply(Action::SetSearch("bootcamp".into()));
    let before = cx.store.state().persisted();
    drop(cx);

    let restored = AppStore::new(storage.clone());
    let state = restored.state();
    assert_eq!(state.persisted(), before);
    assert!(state.is_favorite(&"2".into()));
    assert_eq!(state.filters.format, Some(Format::Online));
    assert_eq!(state.filters.search, "");
    assert!(state.programs.is_empty());

    let raw = storage.contents().unwrap_or_default();
    assert!(!raw.contains("bootcamp"));

    Ok(())
}

#[tokio::test]
async fn configured_context_persists_to_disk() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let dir = std::env::temp_dir()
        .join(format!("upnext-client-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let config = ClientConfig {
        api_base_url: app.address(),
        store_dir: Some(dir.clone()),
        user_id: mock::USER_ID.into(),
    };

    let cx = ClientContext::from_config(&config);
    use_favorites(&cx).add_favorite(&"3".into()).await?;
    drop(cx);

    let cx = ClientContext::from_config(&config);
    assert_eq!(use_favorites(&cx).favorites(), vec![ProgramId::from("3")]);

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
