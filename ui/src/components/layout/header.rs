use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    to: Route,
    label: AttrValue,
}

#[function_component]
fn NavLink(props: &NavLinkProps) -> Html {
    let current = use_route::<Route>();
    let active = current.as_ref() == Some(&props.to);
    let classes = if active {
        "px-3 py-2 rounded-md text-sm font-medium bg-neutral-900 text-white"
    } else {
        "px-3 py-2 rounded-md text-sm font-medium text-neutral-300 \
         hover:bg-neutral-700 hover:text-white"
    };
    html! {
        <Link<Route> to={props.to.clone()} {classes}>
            {&props.label}
        </Link<Route>>
    }
}

#[function_component]
pub fn Header() -> Html {
    html! {
        <header class="bg-neutral-800 border-b border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex-shrink-0">
                        <Link<Route> to={Route::Students} classes="text-xl font-semibold text-white">
                            {"Student Records"}
                        </Link<Route>>
                    </div>
                    <nav class="flex items-center space-x-2">
                        <NavLink to={Route::Students} label="Students" />
                        <NavLink to={Route::FindStudent} label="Find Student" />
                    </nav>
                </div>
            </div>
        </header>
    }
}
