mod executor;
mod fetch;
mod mutation;
mod students;

use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    assert_eq!(app.client.health_check().await?, "healthy");

    Ok(())
}
