use payloads::ProgramId;
use reqwest::StatusCode;
use test_helpers::{assert_status_code, mock, spawn_app};

#[tokio::test]
async fn add_list_remove_favorite() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let user_id = mock::USER_ID.into();
    let program_id = ProgramId::from("3");

    app.client.add_favorite(&user_id, &program_id).await?;
    // adding again is accepted without a duplicate
    app.client.add_favorite(&user_id, &program_id).await?;

    let favorites = app.client.list_favorites(&user_id).await?;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].program_id, program_id);
    assert_eq!(favorites[0].program.title, "Advanced Backend Engineering");

    let removed = app.client.remove_favorite(&user_id, &program_id).await?;
    assert_eq!(removed.message, "Favorite removed");
    assert!(app.client.list_favorites(&user_id).await?.is_empty());

    assert_status_code(
        app.client.remove_favorite(&user_id, &program_id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn favorite_of_unknown_program_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .add_favorite(&mock::USER_ID.into(), &"missing".into())
        .await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn malformed_favorite_body_is_bad_request() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/favorites", app.address()))
        .header("Content-Type", "application/json")
        .body(r#"{"userId":"1"}"#)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: payloads::responses::ErrorBody = response.json().await?;
    assert!(body.error.is_some());

    Ok(())
}
