//! Client settings.

use indexmap::IndexMap;
use std::time::Duration;

/// Settings shared by every submission of a [`FormClient`](crate::FormClient).
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Relative form URLs (`/signup`) are joined onto this.
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Sent with every submission, e.g. a CSRF token.
    pub headers: IndexMap<String, String>,
    pub user_agent: String,
    /// Redirects followed by the transport; `None` stops at the first one.
    pub redirect_limit: Option<usize>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut headers = IndexMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());

        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            headers,
            user_agent: concat!("formguard/", env!("CARGO_PKG_VERSION")).to_string(),
            redirect_limit: Some(10),
        }
    }
}

impl HttpClientConfig {
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for [`HttpClientConfig`].
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Add or replace a header. Names are case-insensitive.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.config
            .headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn redirect_limit(mut self, limit: Option<usize>) -> Self {
        self.config.redirect_limit = limit;
        self
    }

    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}
