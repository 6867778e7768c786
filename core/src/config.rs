//! Runner configuration.

/// The public REST testing service the demo talks to.
pub const API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Environment variable that overrides `API_BASE`.
pub const API_BASE_ENV: &str = "CRUD_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub base_url: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
        }
    }
}

impl RunnerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `CRUD_API_BASE`, falling back to `API_BASE`.
    pub fn from_env() -> Self {
        match std::env::var(API_BASE_ENV) {
            Ok(base_url) if !base_url.trim().is_empty() => Self::new(base_url.trim()),
            _ => Self::default(),
        }
    }
}
