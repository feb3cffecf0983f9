//! End-to-end flows the student pages are built from.

use lifecycle::{FetchController, FetchOptions, MutationCallbacks, MutationController};
use payloads::{
    Sex, Student, StudentId, StudentPayload,
    requests::{StudentField, StudentForm},
    responses::Success,
};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use test_helpers::{alice_payload, bob_payload, spawn_app};

fn filled_form() -> StudentForm {
    let mut form = StudentForm::default();
    for (field, value) in [
        (StudentField::Name, "  Alice "),
        (StudentField::Sex, "M"),
        (StudentField::Class, "7"),
        (StudentField::Age, "13"),
        (StudentField::Siblings, "2"),
        (StudentField::Gpa, "3.75"),
    ] {
        form.set(field, value.into());
    }
    form
}

#[tokio::test]
async fn submitting_the_form_creates_and_clears() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let form = Rc::new(RefCell::new(filled_form()));
    let create = {
        let client = app.client.clone();
        MutationController::new(move |details: StudentPayload| {
            let client = client.clone();
            async move { client.create_student(&details).await.map_err(Rc::new) }
        })
    };

    let payload = form
        .borrow()
        .parse()
        .map_err(|errors| anyhow::anyhow!("{errors:?}"))?;
    create
        .mutate(
            payload,
            Some(MutationCallbacks::new().on_success({
                let form = Rc::clone(&form);
                move |_, _| *form.borrow_mut() = StudentForm::default()
            })),
        )
        .await;

    assert!(create.state().is_success());
    assert_eq!(*form.borrow(), StudentForm::default());
    let recorded = &app.requests()[0];
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.path, "/student");
    assert_eq!(
        recorded.body,
        Some(json!({
            "class": 7,
            "name": "Alice",
            "sex": "M",
            "age": 13,
            "siblings": 2,
            "gpa": 3.75,
        }))
    );

    Ok(())
}

#[tokio::test]
async fn created_student_can_be_looked_up() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let uuid = app.seed_student(&alice_payload()).await?;

    let found = app.client.get_student(&uuid.to_string()).await?;

    assert_eq!(found, Some(Student::from_payload(uuid, alice_payload())));

    Ok(())
}

#[tokio::test]
async fn unknown_id_lookup_is_not_found() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;

    assert_eq!(app.client.get_student("999").await?, None);

    Ok(())
}

#[tokio::test]
async fn updating_replaces_the_record() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let uuid = app.seed_student(&alice_payload()).await?;
    let update = {
        let client = app.client.clone();
        MutationController::new(
            move |(uuid, details): (StudentId, StudentPayload)| {
                let client = client.clone();
                async move {
                    client.update_student(uuid, &details).await.map_err(Rc::new)
                }
            },
        )
    };

    let details = StudentPayload {
        sex: Sex::F,
        gpa: 3.9,
        ..alice_payload()
    };
    let outcome = update
        .mutate_async((uuid, details.clone()), None)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    assert!(outcome.success);
    let students = app.client.list_students().await?;
    assert_eq!(students, [Student::from_payload(uuid, details)]);

    Ok(())
}

#[tokio::test]
async fn deleting_refreshes_the_list_once() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let alice = app.seed_student(&alice_payload()).await?;
    app.seed_student(&bob_payload()).await?;

    let list = FetchController::<Vec<Student>>::from_request(
        app.client.clone(),
        "/students",
        &FetchOptions::default(),
    );
    list.refetch().await;
    assert_eq!(list.state().data.map(|s| s.len()), Some(2));

    let delete = {
        let client = app.client.clone();
        MutationController::new(move |uuid: StudentId| {
            let client = client.clone();
            async move { client.delete_student(uuid).await.map_err(Rc::new) }
        })
    };
    app.clear_requests();
    if delete.mutate_async(alice, None).await.is_ok() {
        list.refetch().await;
    }

    let calls: Vec<_> = app
        .requests()
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(calls, ["DELETE /student/1", "GET /students"]);
    let names: Vec<_> = list
        .state()
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Bob"]);

    Ok(())
}

#[tokio::test]
async fn deleting_an_unknown_id_reports_no_success() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_student(&alice_payload()).await?;

    let outcome = app.client.delete_student(StudentId(42)).await?;

    assert_eq!(outcome, Success { success: false });
    assert_eq!(app.client.list_students().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn updating_an_unknown_id_reports_no_success() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let outcome = app
        .client
        .update_student(StudentId(42), &alice_payload())
        .await?;

    assert_eq!(outcome, Success { success: false });
    assert!(app.client.list_students().await?.is_empty());

    Ok(())
}
