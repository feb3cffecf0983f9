//! Request lifecycles for the student client.
//!
//! [`FetchController`] manages a re-issuable read whose superseded calls are
//! cancelled; [`MutationController`] manages one-shot writes with an explicit
//! status machine. Both are single-threaded and runtime-agnostic: operations
//! hand back futures and the owner decides how to drive them (the browser
//! app spawns them locally, tests await them directly).

pub mod fetch;
pub mod mutation;

pub use fetch::{AutoTrigger, FetchController, FetchOptions, FetchState};
pub use mutation::{
    MutationCallbacks, MutationController, MutationState, MutationStatus,
};
