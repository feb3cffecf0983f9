use lifecycle::{FetchController, FetchOptions};
use payloads::{Method, Student, StatusCode};
use serde_json::Value;
use std::{cell::RefCell, rc::Rc};
use test_helpers::{alice_payload, bob_payload, spawn_app};

#[tokio::test]
async fn refetch_loads_the_student_list() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;
    app.seed_student(&bob_payload()).await?;

    let list = FetchController::<Vec<Student>>::from_request(
        app.client.clone(),
        "/students",
        &FetchOptions::default(),
    );
    let loading = Rc::new(RefCell::new(Vec::new()));
    list.set_listener({
        let loading = Rc::clone(&loading);
        move |state| loading.borrow_mut().push(state.loading)
    });

    list.refetch().await;

    let state = list.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    let names: Vec<_> = state
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Alice", "Bob"]);
    assert_eq!(*loading.borrow(), [true, false]);

    Ok(())
}

#[tokio::test]
async fn empty_list_is_data_not_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let list = FetchController::<Vec<Student>>::from_request(
        app.client.clone(),
        "/students",
        &FetchOptions::default(),
    );
    list.refetch().await;

    let state = list.state();
    assert_eq!(state.data, Some(Vec::new()));
    assert!(state.error.is_none());

    Ok(())
}

#[tokio::test]
async fn http_failure_is_recorded_as_error() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let lookup = FetchController::<Value>::from_request(
        app.client.clone(),
        "/student/not-a-number",
        &FetchOptions::default(),
    );
    lookup.refetch().await;

    let state = lookup.state();
    assert!(!state.loading);
    assert!(state.data.is_none());
    let error = state.error.expect("error should be recorded");
    assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));

    Ok(())
}

#[tokio::test]
async fn superseded_call_that_never_started_is_not_sent() -> anyhow::Result<()>
{
    let app = spawn_app().await;
    let list = FetchController::<Vec<Student>>::from_request(
        app.client.clone(),
        "/students",
        &FetchOptions::default(),
    );

    let first = list.refetch();
    let second = list.refetch();
    futures::join!(first, second);

    assert_eq!(app.requests().len(), 1);
    assert_eq!(list.state().data, Some(Vec::new()));

    Ok(())
}

#[tokio::test]
async fn options_shape_the_request() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let options = FetchOptions {
        method: Method::Post,
        body: Some(serde_json::to_value(alice_payload())?),
        headers: vec![("X-Client".into(), "lifecycle".into())],
        auto: false,
    };

    let create = FetchController::<Value>::from_request(
        app.client.clone(),
        "/student",
        &options,
    );
    create.refetch().await;

    assert_eq!(create.state().data, Some(serde_json::json!({ "uuid": 1 })));
    let recorded = &app.requests()[0];
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.header("x-client"), Some("lifecycle"));
    assert_eq!(recorded.header("content-type"), Some("application/json"));

    Ok(())
}

#[tokio::test]
async fn disposed_controller_ignores_late_results() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;
    let list = FetchController::<Vec<Student>>::from_request(
        app.client.clone(),
        "/students",
        &FetchOptions::default(),
    );

    let call = list.refetch();
    list.dispose();
    call.await;

    let state = list.state();
    assert!(state.data.is_none());
    assert!(list.is_disposed());

    Ok(())
}
