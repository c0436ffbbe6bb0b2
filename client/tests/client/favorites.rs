use client::HookError;
use client::hooks::{use_favorites, use_programs};
use payloads::ProgramId;
use reqwest::StatusCode;
use test_helpers::{Route, mock, spawn_app};

use crate::context;

#[tokio::test]
async fn add_and_remove_follow_the_api() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);
    let favorites = use_favorites(&cx);
    let program_id = ProgramId::from("1");

    favorites.add_favorite(&program_id).await?;
    assert!(favorites.is_favorite(&program_id));
    let on_server = app.client.list_favorites(&mock::USER_ID.into()).await?;
    assert_eq!(on_server[0].program_id, program_id);

    favorites.remove_favorite(&program_id).await?;
    assert!(!favorites.is_favorite(&program_id));
    assert!(favorites.favorites().is_empty());

    Ok(())
}

#[tokio::test]
async fn missing_user_id_mutates_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app).without_user();
    let favorites = use_favorites(&cx);

    let added = favorites.add_favorite(&"1".into()).await;
    assert!(matches!(added, Err(HookError::MissingUserId)));
    let removed = favorites.remove_favorite(&"1".into()).await;
    assert!(matches!(removed, Err(HookError::MissingUserId)));

    assert!(cx.store.state().favorites.is_empty());
    assert_eq!(app.requests(Route::AddFavorite), 0);
    assert_eq!(app.requests(Route::RemoveFavorite), 0);

    Ok(())
}

#[tokio::test]
async fn overlapping_toggles_leave_one_copy() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);
    let favorites = use_favorites(&cx);
    let program_id = ProgramId::from("3");

    let (first, second) = futures::join!(
        favorites.toggle_favorite(&program_id),
        favorites.toggle_favorite(&program_id)
    );
    assert!(matches!(first, Ok(true)));
    assert!(matches!(second, Err(HookError::InFlight(id)) if id == program_id));

    assert_eq!(favorites.favorites(), vec![program_id.clone()]);
    assert!(!favorites.is_pending(&program_id));
    assert_eq!(app.requests(Route::AddFavorite), 1);

    // once settled, the next toggle goes through
    assert!(!favorites.toggle_favorite(&program_id).await?);
    assert!(favorites.favorites().is_empty());

    Ok(())
}

#[tokio::test]
async fn different_programs_do_not_block_each_other() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);
    let favorites = use_favorites(&cx);

    let (one, two) = (ProgramId::from("1"), ProgramId::from("2"));

    let (a, b) = futures::join!(
        favorites.add_favorite(&one),
        favorites.add_favorite(&two)
    );
    a?;
    b?;
    assert_eq!(favorites.favorites().len(), 2);

    Ok(())
}

#[tokio::test]
async fn api_failure_leaves_store_unchanged() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);
    let favorites = use_favorites(&cx);
    app.fail_next(
        Route::AddFavorite,
        StatusCode::INTERNAL_SERVER_ERROR,
        "could not save",
    );

    let err = favorites.add_favorite(&"4".into()).await.unwrap_err();
    assert_eq!(err.to_string(), "could not save");
    assert!(!favorites.is_favorite(&"4".into()));
    assert!(!favorites.is_pending(&"4".into()));

    // a rejected remove keeps the favorite
    favorites.add_favorite(&"4".into()).await?;
    app.fail_next(
        Route::RemoveFavorite,
        StatusCode::INTERNAL_SERVER_ERROR,
        "could not remove",
    );
    assert!(favorites.remove_favorite(&"4".into()).await.is_err());
    assert!(favorites.is_favorite(&"4".into()));

    Ok(())
}

#[tokio::test]
async fn sync_replaces_local_list_with_server_listing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user_id = mock::USER_ID.into();
    app.client.add_favorite(&user_id, &"2".into()).await?;
    app.client.add_favorite(&user_id, &"4".into()).await?;

    let cx = context(&app);
    let favorites = use_favorites(&cx);
    favorites.add_favorite(&"5".into()).await?;
    app.client.remove_favorite(&user_id, &"5".into()).await?;

    let synced = favorites.sync_from_server().await?;
    assert_eq!(synced, vec![ProgramId::from("2"), "4".into()]);

    use_programs(&cx).await;
    let titles: Vec<String> = favorites
        .favorite_programs()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(
        titles,
        vec!["Data Science Fundamentals", "Machine Learning in Production"]
    );

    Ok(())
}
