use payloads::Student;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::hooks::{use_api_client, use_title};
use crate::state::State;

fn lookup_label(loading: bool) -> &'static str {
    if loading { "Looking…" } else { "Lookup" }
}

fn detail_rows(student: &Student) -> [(&'static str, String); 7] {
    [
        ("UUID", student.uuid.to_string()),
        ("Name", student.name.clone()),
        ("Class", student.class.to_string()),
        ("Sex", student.sex.to_string()),
        ("Age", student.age.to_string()),
        ("Siblings", student.siblings.to_string()),
        ("GPA", student.gpa.to_string()),
    ]
}

#[function_component]
pub fn FindStudentPage() -> Html {
    use_title("Find Student");
    let client = use_api_client();
    let (state, dispatch) = use_store::<State>();
    let input = use_state(String::new);
    let lookup = &state.lookup;

    let oninput = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlInputElement = e.target_unchecked_into();
            input.set(target.value());
        })
    };

    let onsubmit = {
        let input = input.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let uuid = input.trim().to_string();
            if uuid.is_empty() {
                return;
            }
            dispatch.reduce_mut(|s| s.lookup.start());
            let client = client.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                let result = client.get_student(&uuid).await;
                tracing::debug!(?result, "lookup response");
                dispatch.reduce_mut(|s| s.lookup.resolve(result));
            });
        })
    };

    let on_clear = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            dispatch.reduce_mut(|s| s.lookup.clear())
        })
    };

    html! {
        <div class="space-y-4">
            <h1 class="text-2xl font-bold">{"Find Student"}</h1>

            <form {onsubmit} class="flex gap-2">
                <input
                    value={(*input).clone()}
                    {oninput}
                    placeholder="Enter UUID"
                    class="px-3 py-2 border border-neutral-300 rounded-md min-w-[240px]"
                />
                <button
                    type="submit"
                    disabled={lookup.loading}
                    class="px-4 py-2 text-sm font-medium text-white bg-indigo-600
                           hover:bg-indigo-700 rounded-md disabled:opacity-50"
                >
                    {lookup_label(lookup.loading)}
                </button>
                if lookup.recent.is_some() {
                    <button
                        type="button"
                        onclick={on_clear}
                        class="px-4 py-2 text-sm border rounded-md"
                    >
                        {"Clear"}
                    </button>
                }
            </form>

            if let Some(error) = &lookup.error {
                <div class="text-red-600">{format!("Error: {error}")}</div>
            }

            if let Some(student) = &lookup.recent {
                <div class="border border-neutral-200 rounded-lg p-4 shadow-sm">
                    <h3 class="font-semibold mb-2">{"Most recent lookup"}</h3>
                    {for detail_rows(student).into_iter().map(|(label, value)| html! {
                        <div class="flex gap-3 py-1 border-b border-neutral-100 last:border-b-0">
                            <span class="w-32 font-semibold">{label}</span>
                            <span>{value}</span>
                        </div>
                    })}
                </div>
            }
        </div>
    }
}
