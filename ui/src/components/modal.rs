use wasm_bindgen::{JsCast, closure::Closure};
use yew::prelude::*;

/// A dialog over a dimmed backdrop.
///
/// Closes through the × button, a backdrop click (unless disabled) or the
/// Escape key. The parent decides whether the modal is mounted at all.
///
/// # Example
///
/// ```rust,ignore
/// if *show_modal {
///     <Modal title="Add Student" on_close={close_modal}>
///         <p>{"Modal content goes here"}</p>
///     </Modal>
/// }
/// ```
#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub children: Html,
    pub on_close: Callback<()>,
    #[prop_or_else(|| AttrValue::from("max-w-xl"))]
    pub max_width: AttrValue,
    #[prop_or(true)]
    pub close_on_backdrop: bool,
}

fn is_escape(key: &str) -> bool {
    key == "Escape" || key == "Esc"
}

#[function_component]
pub fn Modal(props: &ModalProps) -> Html {
    let backdrop_ref = use_node_ref();

    use_effect_with(props.on_close.clone(), |on_close| {
        let on_close = on_close.clone();
        let listener = Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(
            move |e: web_sys::KeyboardEvent| {
                if is_escape(&e.key()) {
                    on_close.emit(());
                }
            },
        );
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(document) = &document {
            let _ = document.add_event_listener_with_callback(
                "keydown",
                listener.as_ref().unchecked_ref(),
            );
        }
        move || {
            if let Some(document) = document {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    });

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        let close_on_backdrop = props.close_on_backdrop;

        Callback::from(move |e: MouseEvent| {
            if !close_on_backdrop {
                return;
            }
            if let Some(backdrop_element) =
                backdrop_ref.cast::<web_sys::Element>()
                && let Some(target) = e.target()
                && target.dyn_ref::<web_sys::Element>()
                    == Some(&backdrop_element)
            {
                on_close.emit(());
            }
        })
    };

    let on_close_click = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div
            ref={backdrop_ref}
            onclick={on_backdrop_click}
            role="dialog"
            aria-modal="true"
            class="fixed inset-0 bg-black bg-opacity-50 z-50 flex
                   items-center justify-center p-4"
        >
            <div
                class={format!(
                    "bg-white dark:bg-neutral-800 rounded-lg shadow-xl \
                     w-full max-h-[90vh] flex flex-col overflow-hidden {}",
                    props.max_width
                )}
            >
                <div class="flex items-center justify-between px-4 py-3
                            border-b border-neutral-200 dark:border-neutral-700">
                    <h3 class="font-semibold text-neutral-900 dark:text-neutral-100">
                        {&props.title}
                    </h3>
                    <button
                        aria-label="Close"
                        onclick={on_close_click}
                        class="text-lg leading-none text-neutral-400
                               hover:text-neutral-600 dark:hover:text-neutral-200"
                    >
                        {"×"}
                    </button>
                </div>
                <div class="p-4 overflow-auto">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::is_escape;

    #[test]
    fn escape_key_names() {
        assert!(is_escape("Escape"));
        assert!(is_escape("Esc"));
        assert!(!is_escape("Enter"));
    }
}
