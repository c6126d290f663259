//! Submission request.

use crate::encode::{EncodedBody, encode_body, encode_pairs};
use crate::{HttpClientError, Result};
use formguard_config::{AjaxOptions, SendType};
use formguard_validation::DataMap;
use http::Method;

/// Everything needed to send one form.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    url: String,
    method: Method,
    send_type: SendType,
    enctype: String,
    data: DataMap,
}

impl SubmitRequest {
    pub fn new(url: impl Into<String>, data: DataMap) -> Self {
        let defaults = AjaxOptions::default();
        Self {
            url: url.into(),
            method: Method::GET,
            send_type: defaults.send_type,
            enctype: defaults.enctype,
            data,
        }
    }

    /// Build from the form's submission options.
    pub fn from_options(ajax: &AjaxOptions, data: DataMap) -> Result<Self> {
        let url = ajax
            .url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| HttpClientError::InvalidUrl("no URL configured".to_string()))?;

        let method = Method::from_bytes(ajax.method.to_ascii_uppercase().as_bytes())
            .map_err(|e| HttpClientError::RequestBuild(e.to_string()))?;

        Ok(Self {
            url,
            method,
            send_type: ajax.send_type,
            enctype: ajax.enctype.clone(),
            data,
        })
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn send_type(mut self, send_type: SendType) -> Self {
        self.send_type = send_type;
        self
    }

    pub fn enctype(mut self, enctype: impl Into<String>) -> Self {
        self.enctype = enctype.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_method(&self) -> &Method {
        &self.method
    }

    pub fn data(&self) -> &DataMap {
        &self.data
    }

    /// GET and HEAD carry the data in the query string instead of a body.
    pub fn uses_query(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }

    /// Query pairs appended to the URL.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        if self.uses_query() {
            encode_pairs(&self.data)
        } else {
            Vec::new()
        }
    }

    /// Request body, `None` for query-carrying methods.
    pub fn body(&self) -> Result<Option<EncodedBody>> {
        if self.uses_query() {
            return Ok(None);
        }
        encode_body(&self.data, self.send_type, &self.enctype).map(Some)
    }
}
