use lifecycle::MutationCallbacks;
use payloads::{
    StudentId, StudentPayload,
    requests::{FieldError, StudentField, StudentForm as FormValues},
};
use std::rc::Rc;
use yew::prelude::*;

use crate::hooks::{use_api_client, use_mutation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(StudentId),
}

impl FormMode {
    pub fn submit_label(self, pending: bool) -> &'static str {
        match (self, pending) {
            (Self::Create, false) => "Add Student",
            (Self::Create, true) => "Adding…",
            (Self::Edit(_), false) => "Save",
            (Self::Edit(_), true) => "Saving…",
        }
    }
}

/// Keys a number input should swallow: exponent and sign characters.
fn blocks_key(key: &str) -> bool {
    matches!(key, "e" | "E" | "+" | "-")
}

fn message_for(errors: &[FieldError], field: StudentField) -> Option<&'static str> {
    errors
        .iter()
        .find(|e| e.field() == field)
        .map(FieldError::error_message)
}

#[derive(Properties, PartialEq)]
pub struct StudentFormProps {
    pub mode: FormMode,
    /// Seed values when editing.
    #[prop_or_default]
    pub initial: Option<StudentPayload>,
    pub on_success: Callback<()>,
}

const INPUT_CLASS: &str = "px-3 py-2 border border-neutral-300 \
                           dark:border-neutral-600 rounded-md bg-white \
                           dark:bg-neutral-700";

#[function_component]
pub fn StudentForm(props: &StudentFormProps) -> Html {
    let client = use_api_client();
    let values = use_state(FormValues::default);
    let errors = use_state(Vec::<FieldError>::new);

    {
        let values = values.clone();
        let errors = errors.clone();
        use_effect_with(
            (props.mode, props.initial.clone()),
            move |(mode, initial)| {
                match (mode, initial) {
                    (FormMode::Edit(_), Some(initial)) => {
                        values.set(FormValues::from_payload(initial))
                    }
                    _ => values.set(FormValues::default()),
                }
                errors.set(Vec::new());
            },
        );
    }

    let create = {
        let client = client.clone();
        use_mutation(
            move |details: StudentPayload| {
                let client = client.clone();
                async move {
                    client.create_student(&details).await.map_err(Rc::new)
                }
            },
            MutationCallbacks::new(),
        )
    };
    let update = use_mutation(
        move |(uuid, details): (StudentId, StudentPayload)| {
            let client = client.clone();
            async move {
                client.update_student(uuid, &details).await.map_err(Rc::new)
            }
        },
        MutationCallbacks::new(),
    );

    let pending = create.is_pending() || update.is_pending();
    let mutation_error = create
        .state
        .error
        .clone()
        .or_else(|| update.state.error.clone());

    let onsubmit = {
        let values = values.clone();
        let errors = errors.clone();
        let create = create.clone();
        let update = update.clone();
        let mode = props.mode;
        let on_success = props.on_success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let details = match values.parse() {
                Ok(details) => details,
                Err(failures) => {
                    errors.set(failures);
                    return;
                }
            };
            errors.set(Vec::new());

            let done = {
                let values = values.clone();
                let on_success = on_success.clone();
                move || {
                    values.set(FormValues::default());
                    on_success.emit(());
                }
            };
            match mode {
                FormMode::Create => create.mutate_with(
                    details,
                    MutationCallbacks::new().on_success(move |_, _| done()),
                ),
                FormMode::Edit(uuid) => update.mutate_with(
                    (uuid, details),
                    MutationCallbacks::new().on_success(move |_, _| done()),
                ),
            }
        })
    };

    let on_input = |field: StudentField| {
        let values = values.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*values).clone();
            next.set(field, input.value());
            values.set(next);
        })
    };

    let on_sex_change = {
        let values = values.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*values).clone();
            next.set(StudentField::Sex, select.value());
            values.set(next);
        })
    };

    let on_number_keydown = Callback::from(|e: KeyboardEvent| {
        if blocks_key(&e.key()) {
            e.prevent_default();
        }
    });

    let error_text = |field: StudentField| match message_for(&errors, field) {
        Some(message) => html! {
            <span class="text-xs text-red-600 dark:text-red-400 mt-1">
                {message}
            </span>
        },
        None => html! {},
    };

    let number_field = |field: StudentField,
                        label: &'static str,
                        min: &'static str,
                        step: &'static str,
                        placeholder: &'static str| {
        html! {
            <div class="flex flex-col">
                <label class="text-sm font-semibold mb-1">{label}</label>
                <input
                    type="number"
                    {min}
                    {step}
                    {placeholder}
                    value={values.get(field).to_string()}
                    onkeydown={on_number_keydown.clone()}
                    oninput={on_input(field)}
                    class={INPUT_CLASS}
                />
                {error_text(field)}
            </div>
        }
    };

    html! {
        <form {onsubmit}>
            <div class="grid grid-cols-2 gap-3">
                <div class="flex flex-col">
                    <label class="text-sm font-semibold mb-1">{"Name"}</label>
                    <input
                        value={values.name.clone()}
                        oninput={on_input(StudentField::Name)}
                        placeholder="e.g. Alice"
                        class={INPUT_CLASS}
                    />
                    {error_text(StudentField::Name)}
                </div>

                <div class="flex flex-col">
                    <label class="text-sm font-semibold mb-1">{"Sex"}</label>
                    <select onchange={on_sex_change} class={INPUT_CLASS}>
                        <option value="M" selected={values.sex == "M"}>{"M"}</option>
                        <option value="F" selected={values.sex == "F"}>{"F"}</option>
                    </select>
                    {error_text(StudentField::Sex)}
                </div>

                {number_field(StudentField::Class, "Class", "1", "1", "e.g. 7")}
                {number_field(StudentField::Age, "Age", "1", "1", "e.g. 13")}
                {number_field(StudentField::Siblings, "Siblings", "0", "1", "e.g. 2")}
                {number_field(StudentField::Gpa, "GPA", "0", "0.01", "e.g. 3.75")}
            </div>

            if let Some(error) = mutation_error {
                <div class="text-sm text-red-600 dark:text-red-400 mt-2">
                    {format!("Error: {error}")}
                </div>
            }

            <div class="flex justify-end gap-2 mt-4">
                <button
                    type="submit"
                    disabled={pending}
                    class="px-4 py-2 text-sm font-medium text-white bg-indigo-600
                           hover:bg-indigo-700 rounded-md
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {props.mode.submit_label(pending)}
                </button>
            </div>
        </form>
    }
}
