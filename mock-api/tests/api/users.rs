use payloads::{Level, requests::UserDraft};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, mock, spawn_app};

#[tokio::test]
async fn fixture_user_is_served() -> anyhow::Result<()> {
    let app = spawn_app().await;

    assert_eq!(app.client.list_users().await?, vec![mock::user()]);
    assert_eq!(app.client.get_user(&mock::USER_ID.into()).await?, mock::user());
    assert_status_code(
        app.client.get_user(&"42".into()).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_other_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let updated = app
        .client
        .update_user(
            &mock::USER_ID.into(),
            &UserDraft {
                level: Some(Level::Advanced),
                interests: Some(vec!["Design".into()]),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.level, Level::Advanced);
    assert_eq!(updated.interests, vec!["Design"]);
    assert_eq!(updated.email, mock::user().email);

    Ok(())
}

#[tokio::test]
async fn create_user() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app
        .client
        .create_user(&UserDraft {
            name: Some("Bruno".into()),
            email: Some("bruno@example.com".into()),
            interests: None,
            level: Some(Level::Beginner),
        })
        .await?;
    assert!(created.interests.is_empty());
    assert_eq!(app.client.list_users().await?.len(), 2);

    Ok(())
}
