use payloads::{ClientError, Request, ResponseBody, StatusCode};
use serde_json::json;
use test_helpers::{alice_payload, assert_status_code, spawn_app};

#[tokio::test]
async fn json_headers_follow_the_body() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.execute(&Request::get("/students")).await?;
    app.client.create_student(&alice_payload()).await?;

    let requests = app.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("accept"), Some("application/json"));
    assert_eq!(requests[0].header("content-type"), None);
    assert_eq!(requests[0].body, None);
    assert_eq!(requests[1].header("accept"), Some("application/json"));
    assert_eq!(requests[1].header("content-type"), Some("application/json"));

    Ok(())
}

#[tokio::test]
async fn caller_headers_are_sent_and_override_defaults() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let request = Request::get("/students")
        .header("X-Trace", "abc")
        .header("Accept", "application/vnd.students+json");
    app.client.execute(&request).await?;

    let recorded = &app.requests()[0];
    assert_eq!(recorded.header("x-trace"), Some("abc"));
    assert_eq!(
        recorded.header("accept"),
        Some("application/vnd.students+json")
    );

    Ok(())
}

#[tokio::test]
async fn text_responses_are_not_parsed() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let body = app.client.execute(&Request::get("/health_check")).await?;
    assert_eq!(body, ResponseBody::Text("healthy".into()));

    Ok(())
}

#[tokio::test]
async fn error_carries_status_and_body_text() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;

    let error = app
        .client
        .create_student(&alice_payload())
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Request failed: 409 Conflict - Student name already exists"
    );
    match error {
        ClientError::Http {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, StatusCode::CONFLICT);
            assert_eq!(status_text, "Conflict");
            assert_eq!(body, "Student name already exists");
        }
        other => panic!("unexpected error {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn bad_ids_and_unknown_routes_are_errors() -> anyhow::Result<()> {
    let app = spawn_app().await;

    assert_status_code(
        app.client.get_student("abc").await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client.execute(&Request::get("/nowhere")).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

/// Answer a single connection with `status_line` and a short text body.
async fn serve_once(status_line: &'static str) -> anyhow::Result<String> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "{status_line}\r\ncontent-type: text/plain\r\ncontent-length: 4\r\nconnection: close\r\n\r\ngone"
        );
        let _ = socket.write_all(response.as_bytes()).await;
    });
    Ok(address)
}

#[tokio::test]
async fn server_reason_phrase_is_reported() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut client = app.client.clone();
    client.address = serve_once("HTTP/1.1 499 Client Closed Request").await?;

    let error = client.list_students().await.unwrap_err();
    assert_eq!(
        error.to_string(),
        "Request failed: 499 Client Closed Request - gone"
    );

    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut client = app.client.clone();
    // Port 9 (discard) is not listening on the loopback interface.
    client.address = "http://127.0.0.1:9".into();

    let error = client.list_students().await.unwrap_err();
    assert!(matches!(error, ClientError::Network(_)));
    assert_eq!(
        error.to_string(),
        "Network error. Please check your connection."
    );

    Ok(())
}

#[tokio::test]
async fn request_body_is_sent_as_json() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let request = Request::post("/student").json(&alice_payload())?;
    let created = app.client.execute(&request).await?;
    assert_eq!(created, ResponseBody::Json(json!({ "uuid": 1 })));

    Ok(())
}
