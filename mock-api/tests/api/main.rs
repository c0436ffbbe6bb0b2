mod favorites;
mod programs;
mod users;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response =
        reqwest::get(format!("{}/health_check", app.address())).await?;
    assert!(response.status().is_success());
    assert_eq!(response.text().await?, "healthy");

    Ok(())
}

#[tokio::test]
async fn institutions_are_listed_and_fetched() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let institutions = app.client.list_institutions().await?;
    assert_eq!(institutions, test_helpers::mock::institutions());

    let institution = app.client.get_institution(&"2".into()).await?;
    assert_eq!(institution.name, "Data Institute");

    let created = app
        .client
        .create_institution(&payloads::requests::InstitutionDraft {
            name: Some("Cloud Lab".into()),
            ..Default::default()
        })
        .await?;
    assert_eq!(app.client.get_institution(&created.id).await?, created);

    Ok(())
}
