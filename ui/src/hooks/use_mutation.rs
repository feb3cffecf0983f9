use futures::future::LocalBoxFuture;
use lifecycle::{MutationCallbacks, MutationController, MutationState};
use std::fmt::Debug;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

pub struct MutationHookReturn<V, T, E> {
    pub state: MutationState<T, E>,
    pub reset: Callback<()>,
    controller: Rc<MutationController<V, T, E>>,
}

impl<V, T: Clone, E: Clone> Clone for MutationHookReturn<V, T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            reset: self.reset.clone(),
            controller: Rc::clone(&self.controller),
        }
    }
}

impl<V, T, E> MutationHookReturn<V, T, E>
where
    V: Clone + 'static,
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Invoke and await the outcome. Callbacks passed here replace the
    /// hook's callbacks of the same kind for this call only.
    pub fn mutate_async(
        &self,
        variables: V,
        local: Option<MutationCallbacks<V, T, E>>,
    ) -> LocalBoxFuture<'static, Result<T, E>> {
        self.controller.mutate_async(variables, local)
    }

    /// Fire-and-forget invocation with call-site callbacks.
    pub fn mutate_with(
        &self,
        variables: V,
        local: MutationCallbacks<V, T, E>,
    ) {
        yew::platform::spawn_local(
            self.controller.mutate(variables, Some(local)),
        );
    }
}

/// Wrap a write operation in a [`MutationController`] owned by the component.
///
/// The operation is captured on first render. `callbacks` are taken fresh on
/// every render, so they may close over current props and state. After
/// unmount a settling call no longer touches state or runs callbacks.
#[hook]
pub fn use_mutation<V, T, E, F, Fut>(
    operation: F,
    callbacks: MutationCallbacks<V, T, E>,
) -> MutationHookReturn<V, T, E>
where
    V: Clone + 'static,
    T: Clone + 'static,
    E: Clone + Debug + 'static,
    F: Fn(V) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let force_update = use_force_update();
    let controller = use_memo((), move |_| MutationController::new(operation));
    controller.set_callbacks(callbacks);

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            controller.set_listener(move |_| force_update.force_update());
            move || controller.dispose()
        });
    }

    let reset = {
        let controller = controller.clone();
        Callback::from(move |_| controller.reset())
    };

    MutationHookReturn {
        state: controller.state(),
        reset,
        controller,
    }
}
