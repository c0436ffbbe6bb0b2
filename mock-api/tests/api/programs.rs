use payloads::{ClientError, Level, requests::ProgramDraft};
use reqwest::StatusCode;
use test_helpers::{Route, assert_status_code, spawn_app};

#[tokio::test]
async fn create_read_update_delete_program() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let mut draft =
        ProgramDraft::from(test_helpers::mock::programs()[0].clone());
    draft.title = Some("Rust Systems Programming".into());
    let created = app.client.create_program(&draft).await?;
    assert_eq!(created.title, "Rust Systems Programming");
    assert_eq!(app.client.get_program(&created.id).await?, created);

    let updated = app
        .client
        .update_program(
            &created.id,
            &ProgramDraft {
                level: Some(Level::Advanced),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.level, Level::Advanced);
    assert_eq!(updated.title, created.title);

    let deleted = app.client.delete_program(&created.id).await?;
    assert_eq!(deleted.message, "Program deleted");
    assert_status_code(
        app.client.get_program(&created.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn missing_program_reports_error_body() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let err = app.client.get_program(&"404".into()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.message(), "Program not found");

    Ok(())
}

#[tokio::test]
async fn incomplete_program_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.create_program(&ProgramDraft::default()).await;
    assert_status_code(result, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn injected_failure_applies_to_next_request_only() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.fail_next(
        Route::ListPrograms,
        StatusCode::INTERNAL_SERVER_ERROR,
        "db down",
    );

    match app.client.list_programs().await {
        Err(ClientError::APIError { status, message }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message, "db down");
        }
        other => panic!("Expected injected failure, got {other:?}"),
    }

    let programs = app.client.list_programs().await?;
    assert_eq!(programs.len(), test_helpers::mock::programs().len());
    assert_eq!(app.requests(Route::ListPrograms), 2);

    Ok(())
}
