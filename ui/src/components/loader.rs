use yew::prelude::*;

/// Full-width spinner for content that has nothing to show yet.
#[function_component]
pub fn Loader() -> Html {
    html! {
        <div class="flex justify-center items-center min-h-[50vh]">
            <div
                role="status"
                aria-label="loading"
                class="w-12 h-12 rounded-full border-4 border-neutral-200
                       border-t-indigo-500 animate-spin"
            />
        </div>
    }
}
