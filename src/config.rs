use std::time::Duration;

/// Default backend address.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// How long the home route shows the splash screen.
pub const DEFAULT_SPLASH_DURATION: Duration = Duration::from_millis(2000);

/// Build-time client configuration.
///
/// The browser bundle has no process environment, so the frontend resolves
/// overrides with `option_env!` and hands them to [`ClientConfig::from_overrides`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub google_client_id: Option<String>,
    pub splash_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            google_client_id: None,
            splash_duration: DEFAULT_SPLASH_DURATION,
        }
    }
}

impl ClientConfig {
    pub fn from_overrides(api_base: Option<&str>, google_client_id: Option<&str>) -> Self {
        let defaults = Self::default();
        let api_base = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let google_client_id = google_client_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self { api_base, google_client_id, ..defaults }
    }

    /// Joins an endpoint path (always starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}
