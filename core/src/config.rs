//! Client configuration.
//!
//! Passed by value into `TodoClient` and `Synchronizer` constructors; there is
//! no process-wide API state.

/// Environment variable read by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "TODO_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Where the todo service lives and which extra headers every request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service origin without the `/api` prefix. A trailing slash is ignored.
    pub base_url: String,
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            headers: Vec::new(),
        }
    }

    /// Reads `TODO_API_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        Self::from_env_var(BASE_URL_ENV)
    }

    /// Like [`ClientConfig::from_env`] but reads `key`. Unset, blank and
    /// non-UTF-8 values fall back to the default.
    pub fn from_env_var(key: &str) -> Self {
        match std::env::var(key) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Adds a header sent with every request, e.g. `authorization`.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.headers.is_empty());
    }

    // Each test owns its variable so parallel tests never race on one key.

    #[test]
    fn from_env_var_reads_and_trims_url() {
        let key = "TODO_SYNC_TEST_URL_SET";
        std::env::set_var(key, "  http://todo.test:9000/ ");
        let config = ClientConfig::from_env_var(key);
        std::env::remove_var(key);
        assert_eq!(config.base_url, "http://todo.test:9000/");
        assert!(config.headers.is_empty());
    }

    #[test]
    fn from_env_var_unset_uses_default() {
        let key = "TODO_SYNC_TEST_URL_UNSET";
        std::env::remove_var(key);
        assert_eq!(ClientConfig::from_env_var(key), ClientConfig::default());
    }

    #[test]
    fn from_env_var_blank_uses_default() {
        let key = "TODO_SYNC_TEST_URL_BLANK";
        std::env::set_var(key, "   ");
        let config = ClientConfig::from_env_var(key);
        std::env::remove_var(key);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn with_header_lowercases_name() {
        let config = ClientConfig::new("http://todo.test").with_header("Authorization", "Bearer t");
        assert_eq!(
            config.headers,
            vec![("authorization".to_string(), "Bearer t".to_string())]
        );
    }
}
