use std::cell::RefCell;
use std::fmt::Debug;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct MutationState<T, E> {
    pub data: Option<T>,
    pub error: Option<E>,
    pub status: MutationStatus,
}

impl<T, E> Default for MutationState<T, E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            status: MutationStatus::Idle,
        }
    }
}

impl<T, E> MutationState<T, E> {
    pub fn is_idle(&self) -> bool {
        self.status == MutationStatus::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == MutationStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == MutationStatus::Error
    }
}

type OnSuccess<V, T> = Rc<dyn Fn(&T, &V)>;
type OnError<V, E> = Rc<dyn Fn(&E, &V)>;
type OnSettled<V, T, E> = Rc<dyn Fn(Option<&T>, Option<&E>, &V)>;

/// Hooks run when an invocation settles.
///
/// `on_settled` runs after `on_success` or `on_error`, exactly once per
/// invocation.
pub struct MutationCallbacks<V, T, E> {
    on_success: Option<OnSuccess<V, T>>,
    on_error: Option<OnError<V, E>>,
    on_settled: Option<OnSettled<V, T, E>>,
}

impl<V, T, E> Default for MutationCallbacks<V, T, E> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            on_settled: None,
        }
    }
}

impl<V, T, E> Clone for MutationCallbacks<V, T, E> {
    fn clone(&self) -> Self {
        Self {
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            on_settled: self.on_settled.clone(),
        }
    }
}

impl<V, T, E> MutationCallbacks<V, T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, f: impl Fn(&T, &V) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&E, &V) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }

    pub fn on_settled(
        mut self,
        f: impl Fn(Option<&T>, Option<&E>, &V) + 'static,
    ) -> Self {
        self.on_settled = Some(Rc::new(f));
        self
    }

    /// Call-site callbacks replace instance callbacks slot by slot.
    fn overlay(&self, local: Option<Self>) -> Self {
        let local = local.unwrap_or_default();
        Self {
            on_success: local.on_success.or_else(|| self.on_success.clone()),
            on_error: local.on_error.or_else(|| self.on_error.clone()),
            on_settled: local.on_settled.or_else(|| self.on_settled.clone()),
        }
    }
}

type Operation<V, T, E> = Rc<dyn Fn(V) -> LocalBoxFuture<'static, Result<T, E>>>;
type Listener<T, E> = Rc<dyn Fn(&MutationState<T, E>)>;

struct Inner<V, T, E> {
    state: MutationState<T, E>,
    callbacks: MutationCallbacks<V, T, E>,
    listener: Option<Listener<T, E>>,
    disposed: bool,
}

/// A one-shot write with an idle/pending/success/error status machine.
///
/// Invocations are not ordered against each other: when two overlap, the
/// one that settles last decides the final state.
pub struct MutationController<V, T, E> {
    inner: Rc<RefCell<Inner<V, T, E>>>,
    operation: Operation<V, T, E>,
}

impl<V, T, E> Clone for MutationController<V, T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            operation: Rc::clone(&self.operation),
        }
    }
}

impl<V, T, E> MutationController<V, T, E>
where
    V: Clone + 'static,
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn(V) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: MutationState::default(),
                callbacks: MutationCallbacks::default(),
                listener: None,
                disposed: false,
            })),
            operation: Rc::new(move |variables| {
                operation(variables).boxed_local()
            }),
        }
    }

    pub fn with_callbacks(self, callbacks: MutationCallbacks<V, T, E>) -> Self {
        self.set_callbacks(callbacks);
        self
    }

    /// Replace the instance-level callbacks used by later invocations.
    pub fn set_callbacks(&self, callbacks: MutationCallbacks<V, T, E>) {
        self.inner.borrow_mut().callbacks = callbacks;
    }

    /// Called with a fresh snapshot after every state change.
    pub fn set_listener(
        &self,
        listener: impl Fn(&MutationState<T, E>) + 'static,
    ) {
        let mut inner = self.inner.borrow_mut();
        if !inner.disposed {
            inner.listener = Some(Rc::new(listener));
        }
    }

    pub fn state(&self) -> MutationState<T, E> {
        self.inner.borrow().state.clone()
    }

    /// Invoke the operation and hand its outcome back to the caller.
    ///
    /// The status moves to pending immediately. State is updated and
    /// callbacks have run by the time the returned future resolves.
    pub fn mutate_async(
        &self,
        variables: V,
        local: Option<MutationCallbacks<V, T, E>>,
    ) -> LocalBoxFuture<'static, Result<T, E>> {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if !inner.disposed {
                inner.state.status = MutationStatus::Pending;
                inner.state.error = None;
            }
            inner.callbacks.overlay(local)
        };
        notify(&self.inner);

        let call = (self.operation)(variables.clone());
        let inner = Rc::clone(&self.inner);
        async move {
            let result = call.await;
            if inner.borrow().disposed {
                tracing::debug!("mutation settled after teardown, dropped");
                return result;
            }

            {
                let mut inner = inner.borrow_mut();
                match &result {
                    Ok(data) => {
                        inner.state.data = Some(data.clone());
                        inner.state.status = MutationStatus::Success;
                    }
                    Err(error) => {
                        tracing::warn!(?error, "mutation failed");
                        inner.state.error = Some(error.clone());
                        inner.state.status = MutationStatus::Error;
                    }
                }
            }
            notify(&inner);

            match &result {
                Ok(data) => {
                    if let Some(on_success) = &callbacks.on_success {
                        on_success(data, &variables);
                    }
                    if let Some(on_settled) = &callbacks.on_settled {
                        on_settled(Some(data), None, &variables);
                    }
                }
                Err(error) => {
                    if let Some(on_error) = &callbacks.on_error {
                        on_error(error, &variables);
                    }
                    if let Some(on_settled) = &callbacks.on_settled {
                        on_settled(None, Some(error), &variables);
                    }
                }
            }
            result
        }
        .boxed_local()
    }

    /// Fire-and-forget form of [`Self::mutate_async`]: a failure is recorded
    /// in state but not returned.
    pub fn mutate(
        &self,
        variables: V,
        local: Option<MutationCallbacks<V, T, E>>,
    ) -> LocalBoxFuture<'static, ()> {
        self.mutate_async(variables, local).map(|_| ()).boxed_local()
    }

    /// Return to idle. A call in flight still records its outcome.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.state = MutationState::default();
        }
        notify(&self.inner);
    }

    /// Stop all further state writes, notifications and callbacks.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.listener = None;
    }
}

fn notify<V, T: Clone, E: Clone>(inner: &RefCell<Inner<V, T, E>>) {
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
