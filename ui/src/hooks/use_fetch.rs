use futures::future::LocalBoxFuture;
use lifecycle::{AutoTrigger, FetchController, FetchOptions};
use payloads::ClientError;
use serde::de::DeserializeOwned;
use std::rc::Rc;
use yew::prelude::*;

use super::use_api_client;

/// Fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<Rc<ClientError>>,
    pub refetch: Callback<()>,
    pub abort: Callback<()>,
    controller: Rc<FetchController<T>>,
}

impl<T: Clone> Clone for FetchHookReturn<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            refetch: self.refetch.clone(),
            abort: self.abort.clone(),
            controller: Rc::clone(&self.controller),
        }
    }
}

impl<T: Clone + 'static> FetchHookReturn<T> {
    /// Like `refetch`, but hands back the call so the caller can wait for
    /// it to be committed.
    pub fn refetch_async(&self) -> LocalBoxFuture<'static, ()> {
        self.controller.refetch()
    }
}

/// Read `path` through a [`FetchController`] owned by the component.
///
/// With `options.auto` set, a request is issued on mount, when `auto` is
/// switched on, and again whenever `path` or `deps` change; otherwise only `refetch` issues one. A newer
/// call always supersedes an older one, and the controller is disposed on
/// unmount so late responses are dropped.
///
/// # Example
///
/// ```rust,ignore
/// let students = use_fetch::<Vec<Student>, _>(
///     "/students",
///     FetchOptions::default(),
///     (),
/// );
/// ```
#[hook]
pub fn use_fetch<T, D>(
    path: &str,
    options: FetchOptions,
    deps: D,
) -> FetchHookReturn<T>
where
    T: Clone + DeserializeOwned + 'static,
    D: PartialEq + Clone + 'static,
{
    let client = use_api_client();
    let force_update = use_force_update();

    // The fetcher reads the request at call time, so a changed path or
    // body is picked up by the next refetch.
    let request = use_mut_ref(|| options.request(path));
    *request.borrow_mut() = options.request(path);

    let controller = {
        let request = request.clone();
        use_memo((), move |_| {
            FetchController::<T>::new(move || {
                let client = client.clone();
                let request = request.borrow().clone();
                async move { client.execute(&request).await?.decode() }
            })
        })
    };

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            controller.set_listener(move |_| force_update.force_update());
            move || controller.dispose()
        });
    }

    let trigger = use_mut_ref(|| AutoTrigger::new(options.auto));
    {
        let controller = controller.clone();
        use_effect_with(
            (path.to_string(), deps, options.auto),
            move |(path, deps, auto)| {
                let mut trigger = trigger.borrow_mut();
                trigger.set_auto(*auto);
                if trigger.observe(&(path.clone(), deps.clone())) {
                    yew::platform::spawn_local(controller.refetch());
                }
            },
        );
    }

    let state = controller.state();
    let refetch = {
        let controller = controller.clone();
        Callback::from(move |_| {
            yew::platform::spawn_local(controller.refetch());
        })
    };
    let abort = {
        let controller = controller.clone();
        Callback::from(move |_| controller.abort())
    };

    FetchHookReturn {
        data: state.data,
        is_loading: state.loading,
        error: state.error,
        refetch,
        abort,
        controller,
    }
}
