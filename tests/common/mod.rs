//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use a2a_summarizer::domain::models::{Config, Message};
use a2a_summarizer::{bootstrap, DomainError, DomainResult, Summarizer};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_BASE_URL: &str = "https://summarizer.apps.example.com";

/// Summarizer that reports the length of its input.
pub struct FakeSummarizer;

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn run(&self, text: &str) -> DomainResult<String> {
        Ok(format!("Summary ({} chars)", text.chars().count()))
    }
}

/// Summarizer whose upstream call always fails.
pub struct UnreachableSummarizer;

#[async_trait]
impl Summarizer for UnreachableSummarizer {
    async fn run(&self, _text: &str) -> DomainResult<String> {
        Err(DomainError::UpstreamCall(
            "Network error: connection refused".to_string(),
        ))
    }
}

/// Router backed by the given summarizer and a fresh task store.
pub fn test_router(summarizer: Arc<dyn Summarizer>) -> Router {
    bootstrap::build_gateway(&Config::default(), TEST_BASE_URL, summarizer).build_router()
}

/// `VCAP_SERVICES` JSON with one GenAI binding.
pub fn vcap_services(name: &str, api_base: &str, api_key: &str, config_url: &str) -> String {
    json!({
        "genai": [{
            "name": name,
            "label": "genai",
            "tags": ["genai", "llm"],
            "credentials": {
                "endpoint": {
                    "api_base": api_base,
                    "api_key": api_key,
                    "config_url": config_url
                }
            }
        }]
    })
    .to_string()
}

/// Body of a config endpoint response advertising `models`.
pub fn advertised_models(models: &[&str]) -> String {
    let models: Vec<Value> = models
        .iter()
        .map(|name| json!({"name": name, "capabilities": ["chat", "tools"]}))
        .collect();
    json!({ "advertisedModels": models }).to_string()
}

/// Body of a chat completion response with one choice.
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-oss-120b",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
    })
    .to_string()
}

/// JSON-RPC envelope for `method`.
pub fn rpc(method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params
    })
}

/// `message/send` params for a single text message.
pub fn send_params(text: &str) -> Value {
    json!({ "message": serde_json::to_value(Message::user_text(text)).unwrap() })
}

/// POST a raw body to `/` and return status and body text.
pub async fn post_raw(router: &Router, body: String) -> (u16, String) {
    let response = router
        .clone()
        .oneshot(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// POST a JSON-RPC request to `/` and parse the response.
pub async fn post_rpc(router: &Router, request: Value) -> Value {
    let (_, body) = post_raw(router, request.to_string()).await;
    serde_json::from_str(&body).unwrap()
}

/// GET `path` and return status and body text.
pub async fn get(router: &Router, path: &str) -> (u16, String) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
