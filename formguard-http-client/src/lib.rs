//! # formguard HTTP client
//!
//! Encodes a form's data snapshot and submits it, turning the server's
//! answer into a [`SubmitResponse`].
//!
//! ## Send Types
//!
//! - **serialize**: URL-encoded pairs with the form's enctype
//! - **json**: the snapshot as a JSON object
//! - **formData**: multipart text parts
//!
//! GET and HEAD requests carry the encoded pairs in the query string and
//! send no body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use formguard_http_client::{FormClient, HttpClientConfig, SubmitRequest};
//! use formguard_validation::{DataMap, FieldValue};
//! use http::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FormClient::new(HttpClientConfig::default())?;
//!
//!     let mut data = DataMap::new();
//!     data.insert("email".to_string(), FieldValue::from("kari@example.com"));
//!
//!     let request = SubmitRequest::new("https://example.com/subscribe", data).method(Method::POST);
//!     let response = client.submit(&request).await?;
//!
//!     if let Some(base) = response.base_errors() {
//!         println!("Rejected: {}", base.join(", "));
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod encode;
mod error;
mod request;
mod response;

pub use client::FormClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use encode::{EncodedBody, JSON_CONTENT_TYPE, encode_body, encode_pairs, to_urlencoded};
pub use error::{HttpClientError, Result};
pub use request::SubmitRequest;
pub use response::{BASE, JSON_PARSING_ERROR, SubmitResponse};
