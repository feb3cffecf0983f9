use payloads::ClientConfig;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod state;

pub use state::State;

use components::layout::MainLayout;
use contexts::toast::ToastProvider;
use hooks::ApiContext;
use pages::{FindStudentPage, NotFoundPage, StudentsPage};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Students,
    #[at("/find-student")]
    FindStudent,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Students => html! { <StudentsPage /> },
        Route::FindStudent => html! { <FindStudentPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    let api = use_memo((), |_| {
        let config = ClientConfig::from_build_env();
        tracing::info!(base_url = %config.base_url, "API client configured");
        ApiContext::new(&config)
    });

    html! {
        <YewduxRoot>
            <ContextProvider<ApiContext> context={(*api).clone()}>
                <ToastProvider>
                    <BrowserRouter>
                        <MainLayout>
                            <Switch<Route> render={switch} />
                        </MainLayout>
                    </BrowserRouter>
                </ToastProvider>
            </ContextProvider<ApiContext>>
        </YewduxRoot>
    }
}
