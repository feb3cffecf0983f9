use crate::contexts::toast::{Toast, ToastKind, use_toast};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
}

#[function_component]
pub fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;

    let (palette, icon) = match toast.kind {
        ToastKind::Error => (
            "bg-red-50 dark:bg-red-900 border-red-200 dark:border-red-800 \
             text-red-700 dark:text-red-400",
            "✕",
        ),
        ToastKind::Success => (
            "bg-green-50 dark:bg-green-900 border-green-200 \
             dark:border-green-800 text-green-700 dark:text-green-400",
            "✓",
        ),
    };

    let on_close = {
        let id = toast.id;
        Callback::from(move |_: MouseEvent| toast_handle.remove(id))
    };

    html! {
        <div
            role="status"
            class={format!("p-4 rounded-lg border shadow-lg flex items-start gap-3 {palette}")}
        >
            <span class="text-sm font-medium">{icon}</span>
            <p class="flex-1 text-sm font-medium leading-5">{&toast.message}</p>
            <button
                onclick={on_close}
                class="text-neutral-400 hover:text-neutral-600 dark:hover:text-neutral-200"
                title="Dismiss"
            >
                {"×"}
            </button>
        </div>
    }
}
