use client::hooks::{
    Lookup, refresh_institutions, refresh_programs, select_program,
    use_institutions, use_programs,
};
use client::{Action, FetchStatus, FilterUpdate};
use futures::poll;
use payloads::ProgramId;
use reqwest::StatusCode;
use test_helpers::{Route, Seed, mock, spawn_app, spawn_app_with};

use crate::context;

#[tokio::test]
async fn fetch_populates_the_store() -> anyhow::Result<()> {
    let app = spawn_app_with(Seed {
        programs: mock::programs()[..3].to_vec(),
        ..mock::seed()
    })
    .await;
    let cx = context(&app);

    let programs = use_programs(&cx).await;
    assert_eq!(programs.data.len(), 3);
    assert_eq!(programs.status, FetchStatus::Populated);
    assert!(!programs.is_loading);
    assert_eq!(programs.error, None);

    let state = cx.store.state();
    assert_eq!(state.programs.len(), 3);
    assert!(!state.is_loading());
    assert_eq!(state.error, None);

    Ok(())
}

#[tokio::test]
async fn fetch_failure_sets_error_and_keeps_programs_empty()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_next(
        Route::ListPrograms,
        StatusCode::INTERNAL_SERVER_ERROR,
        "db down",
    );
    let cx = context(&app);

    let programs = use_programs(&cx).await;
    assert_eq!(programs.error.as_deref(), Some("db down"));
    assert_eq!(programs.status, FetchStatus::Failed("db down".into()));
    assert!(!programs.is_initial_loading());
    assert_eq!(cx.store.state().error.as_deref(), Some("db down"));
    assert!(cx.store.state().programs.is_empty());

    // a failed collection stays failed until refreshed
    use_programs(&cx).await;
    assert_eq!(app.requests(Route::ListPrograms), 1);

    let programs = refresh_programs(&cx).await;
    assert_eq!(programs.status, FetchStatus::Populated);
    assert_eq!(programs.data.len(), mock::programs().len());
    assert_eq!(cx.store.state().error, None);

    Ok(())
}

#[tokio::test]
async fn concurrent_callers_share_one_fetch() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);

    let (first, second) = futures::join!(use_programs(&cx), use_programs(&cx));
    assert_eq!(first.status, FetchStatus::Populated);
    assert!(second.is_initial_loading());
    assert_eq!(app.requests(Route::ListPrograms), 1);

    // populated collections are served from the store
    let cached = use_programs(&cx).await;
    assert_eq!(cached.data, first.data);
    assert_eq!(app.requests(Route::ListPrograms), 1);

    Ok(())
}

#[tokio::test]
async fn fetched_program_ids_are_unique() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);

    let programs = use_programs(&cx).await.data;
    let mut ids: Vec<&ProgramId> = programs.iter().map(|p| &p.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), programs.len());

    Ok(())
}

#[tokio::test]
async fn institutions_have_independent_state() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_next(
        Route::ListInstitutions,
        StatusCode::SERVICE_UNAVAILABLE,
        "maintenance",
    );
    let cx = context(&app);

    let institutions = use_institutions(&cx).await;
    assert_eq!(institutions.error.as_deref(), Some("maintenance"));
    assert_eq!(cx.store.state().programs_status, FetchStatus::Empty);

    let programs = use_programs(&cx).await;
    assert_eq!(programs.status, FetchStatus::Populated);
    assert_eq!(
        cx.store.state().institutions_status,
        FetchStatus::Failed("maintenance".into())
    );

    let institutions = refresh_institutions(&cx).await;
    assert_eq!(institutions.data, mock::institutions());

    Ok(())
}

#[tokio::test]
async fn filters_apply_to_fetched_programs() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);
    use_programs(&cx).await;

    cx.store.apply(Action::SetFilters(
        FilterUpdate::default().category("Data Science"),
    ));
    let ids = |cx: &client::ClientContext| -> Vec<ProgramId> {
        cx.store
            .state()
            .filtered_programs()
            .into_iter()
            .map(|p| p.id.clone())
            .collect()
    };
    assert_eq!(ids(&cx), vec![ProgramId::from("2"), "4".into()]);

    cx.store.apply(Action::SetSearch("PRODUCTION".into()));
    assert_eq!(ids(&cx), vec![ProgramId::from("4")]);

    cx.store.apply(Action::ClearFilters);
    assert_eq!(ids(&cx).len(), mock::programs().len());

    Ok(())
}

#[tokio::test]
async fn select_program_resolves_from_the_catalog() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);

    match select_program(&cx, &"2".into()).await {
        Lookup::Found(detail) => {
            assert_eq!(detail.program.title, "Data Science Fundamentals");
            assert_eq!(
                detail.institution.map(|i| i.name).as_deref(),
                Some("Data Institute")
            );
        }
        other => panic!("Expected program 2, got {other:?}"),
    }
    assert_eq!(
        cx.store.state().selected_program.as_ref().map(|p| p.id.clone()),
        Some("2".into())
    );

    // unknown institution
    match select_program(&cx, &"5".into()).await {
        Lookup::Found(detail) => assert_eq!(detail.institution, None),
        other => panic!("Expected program 5, got {other:?}"),
    }

    assert_eq!(select_program(&cx, &"404".into()).await, Lookup::NotFound);
    assert_eq!(cx.store.state().selected_program, None);
    assert_eq!(app.requests(Route::ListPrograms), 1);
    assert_eq!(app.requests(Route::ListInstitutions), 1);

    Ok(())
}

#[tokio::test]
async fn select_program_reports_load_failure() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_next(
        Route::ListPrograms,
        StatusCode::INTERNAL_SERVER_ERROR,
        "db down",
    );
    let cx = context(&app);

    assert_eq!(
        select_program(&cx, &"1".into()).await,
        Lookup::Failed("db down".into())
    );

    Ok(())
}

#[tokio::test]
async fn dropped_fetch_does_not_leave_collection_loading()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);

    let mut fetch = Box::pin(use_programs(&cx));
    assert!(poll!(&mut fetch).is_pending());
    assert_eq!(cx.store.state().programs_status, FetchStatus::Loading);
    drop(fetch);

    let state = cx.store.state();
    assert_eq!(state.programs_status, FetchStatus::Empty);
    assert!(!state.is_loading());

    let programs = use_programs(&cx).await;
    assert_eq!(programs.status, FetchStatus::Populated);
    assert_eq!(programs.data.len(), mock::programs().len());

    // a dropped refresh keeps the cached collection
    let mut refresh = Box::pin(refresh_programs(&cx));
    assert!(poll!(&mut refresh).is_pending());
    drop(refresh);
    assert_eq!(cx.store.state().programs_status, FetchStatus::Populated);
    assert_eq!(refresh_programs(&cx).await.status, FetchStatus::Populated);

    Ok(())
}

#[tokio::test]
async fn select_program_waits_for_a_populated_catalog() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let cx = context(&app);
    let program_id = ProgramId::from("2");

    let (programs, selected) =
        futures::join!(use_programs(&cx), select_program(&cx, &program_id));
    assert_eq!(programs.status, FetchStatus::Populated);
    assert_eq!(selected, Lookup::Loading);
    assert_eq!(cx.store.state().selected_program, None);

    match select_program(&cx, &program_id).await {
        Lookup::Found(detail) => assert_eq!(detail.program.id, program_id),
        other => panic!("Expected program 2, got {other:?}"),
    }

    Ok(())
}
