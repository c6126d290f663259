//! Integration tests for formguard-http-client

use formguard_config::{AjaxOptions, SendType};
use formguard_http_client::*;
use formguard_validation::{DataMap, FieldValue};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn data() -> DataMap {
    let mut data = DataMap::new();
    data.insert("name".into(), FieldValue::from("Kari"));
    data.insert("tags".into(), FieldValue::from(vec!["a", "b"]));
    data
}

fn ajax(server: &MockServer, method: &str, send_type: SendType) -> AjaxOptions {
    AjaxOptions {
        url: Some(format!("{}/send", server.uri())),
        method: method.to_string(),
        send_type,
        ..AjaxOptions::default()
    }
}

#[tokio::test]
async fn test_get_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/send"))
        .and(query_param("name", "Kari"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FormClient::default_client().unwrap();
    let request = SubmitRequest::from_options(&ajax(&server, "GET", SendType::Serialize), data()).unwrap();
    let response = client.submit(&request).await.unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_post_serialize_uses_enctype() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=Kari&tags=a&tags=b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "redirect": "/thanks" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FormClient::default_client().unwrap();
    let request = SubmitRequest::from_options(&ajax(&server, "post", SendType::Serialize), data()).unwrap();
    let response = client.submit(&request).await.unwrap();

    assert_eq!(response.redirect.as_deref(), Some("/thanks"));
}

#[tokio::test]
async fn test_post_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", JSON_CONTENT_TYPE))
        .and(body_json(json!({ "name": "Kari", "tags": ["a", "b"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "validationErrors": { "name": ["Already registered"] }
        })))
        .mount(&server)
        .await;

    let client = FormClient::default_client().unwrap();
    let request = SubmitRequest::from_options(&ajax(&server, "POST", SendType::Json), data()).unwrap();
    let response = client.submit(&request).await.unwrap();

    assert!(!response.is_success());
    assert_eq!(
        response.field_errors().collect::<Vec<_>>(),
        vec![("name", &["Already registered".to_string()][..])]
    );
}

#[tokio::test]
async fn test_invalid_json_becomes_base_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = FormClient::default_client().unwrap();
    let request = SubmitRequest::from_options(&ajax(&server, "POST", SendType::FormData), data()).unwrap();
    let response = client.submit(&request).await.unwrap();

    assert_eq!(response.base_errors(), Some(&[JSON_PARSING_ERROR.to_string()][..]));
}

#[tokio::test]
async fn test_non_200_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = FormClient::default_client().unwrap();
    let options = ajax(&server, "POST", SendType::Serialize);
    let request = SubmitRequest::from_options(&options, data()).unwrap();
    let error = client.submit(&request).await.unwrap_err();

    match error {
        HttpClientError::Status {
            method,
            url,
            status,
            status_text,
        } => {
            assert_eq!(method, "POST");
            assert_eq!(Some(url), options.url);
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_created_is_not_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = FormClient::default_client().unwrap();
    let request = SubmitRequest::from_options(&ajax(&server, "POST", SendType::Json), data()).unwrap();
    let error = client.submit(&request).await.unwrap_err();
    assert_eq!(error.status_code(), Some(201));
}

#[tokio::test]
async fn test_relative_url_with_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forms/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FormClient::new(
        HttpClientConfig::builder()
            .base_url(format!("{}/forms/", server.uri()))
            .build(),
    )
    .unwrap();

    let request = SubmitRequest::new("contact", DataMap::new());
    assert!(client.submit(&request).await.unwrap().is_success());
}

#[tokio::test]
async fn test_configured_headers_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(header("x-csrf-token", "t0k3n"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FormClient::new(HttpClientConfig::builder().header("X-CSRF-Token", "t0k3n").build()).unwrap();
    let request = SubmitRequest::from_options(&ajax(&server, "POST", SendType::Serialize), data()).unwrap();

    assert!(client.submit(&request).await.unwrap().is_success());
}
