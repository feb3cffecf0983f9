use lifecycle::{MutationCallbacks, MutationController, MutationStatus};
use payloads::{
    APIClient, ClientError, StatusCode, StudentId, StudentPayload, responses,
};
use std::{cell::RefCell, rc::Rc};
use test_helpers::{alice_payload, bob_payload, spawn_app};

type CreateController =
    MutationController<StudentPayload, responses::Created, Rc<ClientError>>;

fn create_controller(client: &APIClient) -> CreateController {
    let client = client.clone();
    MutationController::new(move |details: StudentPayload| {
        let client = client.clone();
        async move { client.create_student(&details).await.map_err(Rc::new) }
    })
}

#[tokio::test]
async fn successful_create_moves_to_success() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let create = create_controller(&app.client);
    let statuses = Rc::new(RefCell::new(Vec::new()));
    create.set_listener({
        let statuses = Rc::clone(&statuses);
        move |state| statuses.borrow_mut().push(state.status)
    });

    let created = create
        .mutate_async(alice_payload(), None)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    assert_eq!(created.uuid, StudentId(1));
    let state = create.state();
    assert!(state.is_success());
    assert_eq!(state.data.map(|c| c.uuid), Some(StudentId(1)));
    assert_eq!(
        *statuses.borrow(),
        [MutationStatus::Pending, MutationStatus::Success]
    );

    Ok(())
}

#[tokio::test]
async fn rejected_create_reports_error_and_fires_callbacks()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;
    let events = Rc::new(RefCell::new(Vec::<String>::new()));
    let create = create_controller(&app.client).with_callbacks(
        MutationCallbacks::new()
            .on_success({
                let events = Rc::clone(&events);
                move |_, _| events.borrow_mut().push("success".into())
            })
            .on_error({
                let events = Rc::clone(&events);
                move |error: &Rc<ClientError>, details: &StudentPayload| {
                    events
                        .borrow_mut()
                        .push(format!("error {} {}", details.name, error))
                }
            })
            .on_settled({
                let events = Rc::clone(&events);
                move |data, error, _| {
                    events.borrow_mut().push(format!(
                        "settled {} {}",
                        data.is_some(),
                        error.is_some()
                    ))
                }
            }),
    );

    create.mutate(alice_payload(), None).await;

    let state = create.state();
    assert!(state.is_error());
    assert_eq!(
        state.error.and_then(|e| e.status()),
        Some(StatusCode::CONFLICT)
    );
    assert_eq!(
        *events.borrow(),
        [
            "error Alice Request failed: 409 Conflict - Student name already exists",
            "settled false true",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn call_site_callbacks_take_precedence() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let seen = Rc::new(RefCell::new(Vec::<&str>::new()));
    let create = create_controller(&app.client).with_callbacks(
        MutationCallbacks::new().on_success({
            let seen = Rc::clone(&seen);
            move |_, _| seen.borrow_mut().push("instance")
        }),
    );

    create.mutate(alice_payload(), None).await;
    create
        .mutate(
            bob_payload(),
            Some(MutationCallbacks::new().on_success({
                let seen = Rc::clone(&seen);
                move |_, _| seen.borrow_mut().push("call site")
            })),
        )
        .await;

    assert_eq!(*seen.borrow(), ["instance", "call site"]);

    Ok(())
}

#[tokio::test]
async fn reset_after_error_returns_to_idle() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;
    let create = create_controller(&app.client);

    let result = create.mutate_async(alice_payload(), None).await;
    let error = result.err().ok_or_else(|| anyhow::anyhow!("expected 409"))?;
    assert_eq!(error.status(), Some(StatusCode::CONFLICT));
    assert!(create.state().is_error());

    create.reset();
    let state = create.state();
    assert!(state.is_idle());
    assert!(state.data.is_none());
    assert!(state.error.is_none());

    Ok(())
}

#[tokio::test]
async fn disposed_mutation_skips_callbacks_but_returns_result()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    let fired = Rc::new(RefCell::new(false));
    let create = create_controller(&app.client).with_callbacks(
        MutationCallbacks::new().on_settled({
            let fired = Rc::clone(&fired);
            move |_, _, _| *fired.borrow_mut() = true
        }),
    );

    let call = create.mutate_async(alice_payload(), None);
    create.dispose();
    let created = call.await;

    assert!(created.is_ok());
    assert!(!*fired.borrow());
    // the request itself still went through
    assert_eq!(app.client.list_students().await?.len(), 1);

    Ok(())
}
