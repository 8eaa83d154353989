use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Where the banner backend lives. Overridable via `BANNER_API_URL` for
/// pointing a dev build at a remote backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        match std::env::var("BANNER_API_URL") {
            Ok(url) if !url.is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }
}
