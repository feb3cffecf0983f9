/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Name of the environment value overriding the base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Client configuration, built once at startup and handed to
/// [`crate::APIClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ClientConfig {
    /// Use `base_url` if given and non-blank, otherwise the local default.
    pub fn new(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Self { base_url }
    }

    /// Read the override from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        Self::new(lookup(BASE_URL_ENV).as_deref())
    }

    /// Read the override captured at compile time. Used by the browser
    /// build, which has no process environment.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_BASE_URL"))
    }
}
