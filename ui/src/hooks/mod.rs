pub mod use_api_client;
pub mod use_fetch;
pub mod use_mutation;
pub mod use_title;

pub use use_api_client::{ApiContext, use_api_client};
pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_mutation::{MutationHookReturn, use_mutation};
pub use use_title::use_title;
