use payloads::{APIClient, ClientConfig};
use std::rc::Rc;
use yew::prelude::*;

/// The API client provided at the root of the tree.
#[derive(Clone)]
pub struct ApiContext(pub Rc<APIClient>);

impl ApiContext {
    pub fn new(config: &ClientConfig) -> Self {
        Self(Rc::new(APIClient::new(config)))
    }
}

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Outside a provider, falls back to a client built from the compile-time
/// configuration.
#[hook]
pub fn use_api_client() -> APIClient {
    match use_context::<ApiContext>() {
        Some(ApiContext(client)) => (*client).clone(),
        None => APIClient::new(&ClientConfig::from_build_env()),
    }
}
