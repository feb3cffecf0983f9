use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, AbortHandle, Abortable, LocalBoxFuture};
use payloads::{APIClient, ClientError, Method, Request};
use serde::de::DeserializeOwned;

/// Snapshot of a fetch controller.
///
/// A failed refetch keeps the data from the last success so callers can keep
/// showing it next to the error. After a failure both `data` and `error` may
/// therefore be set; only a success clears `error`.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub error: Option<Rc<ClientError>>,
    pub loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

/// How a path-based controller builds its request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
    /// Issue a request on first use and whenever the dependencies change.
    pub auto: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            body: None,
            headers: Vec::new(),
            auto: true,
        }
    }
}

impl FetchOptions {
    pub fn manual() -> Self {
        Self {
            auto: false,
            ..Self::default()
        }
    }

    pub fn request(&self, path: &str) -> Request {
        Request {
            path: path.to_string(),
            method: self.method,
            body: self.body.clone(),
            headers: self.headers.clone(),
        }
    }
}

/// Decides when an auto-triggered controller should issue a request.
///
/// Dependencies are compared with `PartialEq`, so a tuple or `Vec` of values
/// gives the usual positional comparison.
#[derive(Debug)]
pub struct AutoTrigger<D> {
    auto: bool,
    last: Option<D>,
}

impl<D: PartialEq + Clone> AutoTrigger<D> {
    pub fn new(auto: bool) -> Self {
        Self { auto, last: None }
    }

    /// Switch between automatic and manual triggering. Turning `auto` off
    /// forgets the last dependencies, so turning it back on fetches again.
    pub fn set_auto(&mut self, auto: bool) {
        if !auto {
            self.last = None;
        }
        self.auto = auto;
    }

    /// Record the current dependencies and return whether to fetch.
    pub fn observe(&mut self, deps: &D) -> bool {
        if !self.auto || self.last.as_ref() == Some(deps) {
            return false;
        }
        self.last = Some(deps.clone());
        true
    }
}

type Fetcher<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<T, ClientError>>>;
type Listener<T> = Rc<dyn Fn(&FetchState<T>)>;

struct Inner<T> {
    state: FetchState<T>,
    in_flight: Option<AbortHandle>,
    listener: Option<Listener<T>>,
    disposed: bool,
}

/// A re-issuable read whose superseded calls never write state.
pub struct FetchController<T> {
    inner: Rc<RefCell<Inner<T>>>,
    fetcher: Fetcher<T>,
}

impl<T> Clone for FetchController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            fetcher: Rc::clone(&self.fetcher),
        }
    }
}

impl<T: Clone + 'static> FetchController<T> {
    pub fn new<F, Fut>(fetcher: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ClientError>> + 'static,
    {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: FetchState::default(),
                in_flight: None,
                listener: None,
                disposed: false,
            })),
            fetcher: Rc::new(move || fetcher().boxed_local()),
        }
    }

    /// A controller that executes `options` against `path` and decodes the
    /// response body as `T`.
    pub fn from_request(
        client: APIClient,
        path: &str,
        options: &FetchOptions,
    ) -> Self
    where
        T: DeserializeOwned,
    {
        let request = Rc::new(options.request(path));
        Self::new(move || {
            let client = client.clone();
            let request = Rc::clone(&request);
            async move { client.execute(&request).await?.decode() }
        })
    }

    pub fn state(&self) -> FetchState<T> {
        self.inner.borrow().state.clone()
    }

    /// Called with a fresh snapshot after every state change.
    pub fn set_listener(&self, listener: impl Fn(&FetchState<T>) + 'static) {
        let mut inner = self.inner.borrow_mut();
        if !inner.disposed {
            inner.listener = Some(Rc::new(listener));
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Start a new call, aborting the one in flight.
    ///
    /// The previous call is aborted before this one is issued. The returned
    /// future drives the new call; only its outcome is committed, and only if
    /// nothing superseded or aborted it in the meantime.
    pub fn refetch(&self) -> LocalBoxFuture<'static, ()> {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return future::ready(()).boxed_local();
            }
            if let Some(previous) = inner.in_flight.replace(handle.clone()) {
                previous.abort();
            }
            inner.state.loading = true;
            inner.state.error = None;
        }
        notify(&self.inner);

        let call = Abortable::new((self.fetcher)(), registration);
        let inner = Rc::clone(&self.inner);
        async move {
            let Ok(result) = call.await else {
                tracing::debug!("fetch aborted, result discarded");
                return;
            };
            {
                let mut inner = inner.borrow_mut();
                if inner.disposed || handle.is_aborted() {
                    tracing::debug!("fetch superseded, result discarded");
                    return;
                }
                inner.in_flight = None;
                inner.state.loading = false;
                match result {
                    Ok(data) => inner.state.data = Some(data),
                    Err(e) => inner.state.error = Some(Rc::new(e)),
                }
            }
            notify(&inner);
        }
        .boxed_local()
    }

    /// Cancel the call in flight without issuing a replacement. Data and
    /// error keep their values.
    pub fn abort(&self) {
        let aborted = {
            let mut inner = self.inner.borrow_mut();
            match inner.in_flight.take() {
                Some(handle) => {
                    handle.abort();
                    inner.state.loading = false;
                    true
                }
                None => false,
            }
        };
        if aborted {
            notify(&self.inner);
        }
    }

    /// Tear down: abort the call in flight and stop all further writes.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.listener = None;
        if let Some(handle) = inner.in_flight.take() {
            handle.abort();
        }
    }
}

fn notify<T: Clone>(inner: &RefCell<Inner<T>>) {
    let pending = {
        let inner = inner.borrow();
        match (&inner.listener, inner.disposed) {
            (Some(listener), false) => {
                Some((Rc::clone(listener), inner.state.clone()))
            }
            _ => None,
        }
    };
    if let Some((listener, state)) = pending {
        listener(&state);
    }
}
