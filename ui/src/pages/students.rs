use lifecycle::{FetchOptions, MutationCallbacks};
use payloads::{Student, StudentId};
use std::rc::Rc;
use yew::prelude::*;

use crate::components::{
    Align, Column, ConfirmationModal, FormMode, Loader, Modal, StudentForm,
    Table,
};
use crate::contexts::toast::{ToastHandle, use_toast};
use crate::hooks::{use_api_client, use_fetch, use_mutation, use_title};

/// What the add/edit modal is showing.
#[derive(Debug, Clone, PartialEq)]
enum Editor {
    Create,
    Edit(Student),
}

fn empty_text(loading: bool) -> &'static str {
    if loading { "Loading…" } else { "No students found." }
}

fn show_loading_banner(loading: bool, rows: usize) -> bool {
    loading && rows == 0
}

fn delete_message(name: &str, success: bool) -> String {
    if success {
        format!("Deleted {name}")
    } else {
        format!("{name} was already removed")
    }
}

fn toast_delete_outcome(toast: &ToastHandle, student: &Student, success: bool) {
    let message = delete_message(&student.name, success);
    if success {
        toast.success(message);
    } else {
        toast.error(message);
    }
}

#[function_component]
pub fn StudentsPage() -> Html {
    use_title("Students");
    let client = use_api_client();
    let toast = use_toast();
    let students =
        use_fetch::<Vec<Student>, _>("/students", FetchOptions::default(), ());
    let editor = use_state(|| None::<Editor>);
    let deleting = use_state(|| None::<Student>);

    let delete = use_mutation(
        move |uuid: StudentId| {
            let client = client.clone();
            async move { client.delete_student(uuid).await.map_err(Rc::new) }
        },
        MutationCallbacks::new(),
    );

    let rows = students.data.clone().unwrap_or_default();

    let open_create = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| editor.set(Some(Editor::Create)))
    };
    let close_editor = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(None))
    };
    let on_saved = {
        let editor = editor.clone();
        let students = students.clone();
        let toast = toast.clone();
        Callback::from(move |_: ()| {
            let message = match &*editor {
                Some(Editor::Edit(student)) => format!("Saved {}", student.name),
                _ => "Student added".to_string(),
            };
            editor.set(None);
            toast.success(message);
            students.refetch.emit(());
        })
    };

    let close_delete = {
        let deleting = deleting.clone();
        Callback::from(move |_: ()| deleting.set(None))
    };
    let confirm_delete = {
        let deleting = deleting.clone();
        let delete = delete.clone();
        let students = students.clone();
        let toast = toast.clone();
        Callback::from(move |_: ()| {
            let Some(student) = (*deleting).clone() else {
                return;
            };
            let deleting = deleting.clone();
            let delete = delete.clone();
            let students = students.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                if let Ok(outcome) = delete.mutate_async(student.uuid, None).await {
                    deleting.set(None);
                    toast_delete_outcome(&toast, &student, outcome.success);
                    students.refetch_async().await;
                }
            });
        })
    };

    let columns = {
        let editor = editor.clone();
        let deleting = deleting.clone();
        let reset_delete = delete.reset.clone();
        let delete_pending = delete.is_pending();
        vec![
            Column::new("UUID", |s: Student| html! { {s.uuid.to_string()} })
                .width("100px"),
            Column::new("Name", |s: Student| html! { {s.name} }),
            Column::new("Class", |s: Student| html! { {s.class.to_string()} })
                .width("80px"),
            Column::new("Age", |s: Student| html! { {s.age.to_string()} })
                .width("80px")
                .align(Align::Right),
            Column::new("Sex", |s: Student| html! { {s.sex.to_string()} })
                .width("100px"),
            Column::new("Siblings", |s: Student| {
                html! { {s.siblings.to_string()} }
            })
            .width("100px")
            .align(Align::Right),
            Column::new("GPA", |s: Student| html! { {s.gpa.to_string()} })
                .width("100px")
                .align(Align::Right),
            Column::new("Actions", move |s: Student| {
                let on_edit = {
                    let editor = editor.clone();
                    let s = s.clone();
                    Callback::from(move |_: MouseEvent| {
                        editor.set(Some(Editor::Edit(s.clone())))
                    })
                };
                let on_delete = {
                    let deleting = deleting.clone();
                    let reset_delete = reset_delete.clone();
                    Callback::from(move |_: MouseEvent| {
                        reset_delete.emit(());
                        deleting.set(Some(s.clone()));
                    })
                };
                html! {
                    <div class="flex gap-2">
                        <button
                            onclick={on_edit}
                            class="px-2 py-1 text-sm border rounded-md"
                        >
                            {"Edit"}
                        </button>
                        <button
                            onclick={on_delete}
                            disabled={delete_pending}
                            class="px-2 py-1 text-sm text-white bg-red-600
                                   rounded-md disabled:opacity-50"
                        >
                            {"Delete"}
                        </button>
                    </div>
                }
            })
            .width("180px"),
        ]
    };

    let editor_modal = match &*editor {
        None => html! {},
        Some(current) => {
            let (title, mode, initial) = match current {
                Editor::Create => ("Add Student", FormMode::Create, None),
                Editor::Edit(student) => (
                    "Edit Student",
                    FormMode::Edit(student.uuid),
                    Some(student.payload()),
                ),
            };
            html! {
                <Modal {title} on_close={close_editor}>
                    <StudentForm {mode} {initial} on_success={on_saved} />
                </Modal>
            }
        }
    };

    let delete_modal = match &*deleting {
        None => html! {},
        Some(student) => html! {
            <ConfirmationModal
                title="Delete Student"
                message={format!("Delete student {}?", student.name)}
                confirm_text="Delete"
                on_confirm={confirm_delete}
                on_close={close_delete}
                is_loading={delete.is_pending()}
                error_message={delete
                    .state
                    .error
                    .as_ref()
                    .map(|e| AttrValue::from(e.to_string()))}
            />
        },
    };

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">{"Students"}</h1>
                <button
                    onclick={open_create}
                    class="px-4 py-2 text-sm font-medium text-white
                           bg-indigo-600 hover:bg-indigo-700 rounded-md"
                >
                    {"Add Student"}
                </button>
            </div>

            if show_loading_banner(students.is_loading, rows.len()) {
                <p class="text-neutral-600">{"Loading students…"}</p>
                <Loader />
            }
            if let Some(error) = &students.error {
                <p class="text-red-600">{format!("Error: {error}")}</p>
            }

            <Table<Student>
                {columns}
                rows={rows}
                row_key={Callback::from(|s: Student| AttrValue::from(s.uuid.to_string()))}
                empty_text={empty_text(students.is_loading)}
            />

            {editor_modal}
            {delete_modal}
        </div>
    }
}
