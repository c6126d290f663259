//! Form submission client.

use http::StatusCode;
use reqwest::multipart;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::encode::{EncodedBody, JSON_CONTENT_TYPE};
use crate::{HttpClientConfig, HttpClientError, Result, SubmitRequest, SubmitResponse};

/// Sends form data and interprets the server's answer.
#[derive(Debug, Clone)]
pub struct FormClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl FormClient {
    /// Create a client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let redirects = match config.redirect_limit {
            Some(limit) => reqwest::redirect::Policy::limited(limit),
            None => reqwest::redirect::Policy::none(),
        };

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(redirects)
            .build()
            .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Resolve a form URL against the configured base URL.
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.config.base_url.as_deref().ok_or_else(|| {
                    HttpClientError::InvalidUrl(format!("{} is relative and no base URL is set", url))
                })?;
                Ok(Url::parse(base)?.join(url)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Send a form.
    ///
    /// A 200 answer is parsed as `{ validationErrors?, redirect? }`; a body
    /// that is not JSON becomes a `base` validation error. Any other status
    /// is an [`HttpClientError::Status`].
    pub async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse> {
        let mut url = self.resolve_url(request.url())?;
        let method = request.http_method().clone();

        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(&pairs);
        }

        let mut builder = self.inner.request(method.clone(), url.clone());
        for (name, value) in &self.config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body()? {
            None => builder,
            Some(EncodedBody::Form { content_type, body }) => builder
                .header(http::header::CONTENT_TYPE, content_type)
                .body(body),
            Some(EncodedBody::Json(body)) => builder
                .header(http::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body),
            Some(EncodedBody::Multipart(parts)) => {
                let form = parts
                    .into_iter()
                    .fold(multipart::Form::new(), |form, (name, value)| form.text(name, value));
                builder.multipart(form)
            }
        };

        debug!(method = %method, url = %url, "Submitting form");

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();

        if status != StatusCode::OK {
            warn!(method = %method, url = %url, status = %status, "Form submission rejected");
            return Err(HttpClientError::Status {
                method: method.to_string(),
                url: request.url().to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(status = %status, bytes = body.len(), "Form submitted");

        Ok(SubmitResponse::parse(&body))
    }

    fn classify(&self, error: reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            HttpClientError::Timeout(self.config.timeout)
        } else if error.is_connect() {
            HttpClientError::Connection(error.to_string())
        } else {
            HttpClientError::Http(error)
        }
    }
}
