//! A2A (Agent-to-Agent) HTTP Gateway.
//!
//! Implements JSON-RPC 2.0 over HTTP following the A2A protocol, plus the
//! agent card discovery endpoints.

use axum::{
    body::Bytes,
    extract::State,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json, Response,
    },
    routing::{get, post},
    Router,
};
use futures::stream::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use super::jsonrpc::{
    A2AErrorCode, JsonRpcRequest, JsonRpcResponse, MessageSendParams, RpcError, JSONRPC_VERSION,
};
use super::request_handler::RequestHandler;
use crate::domain::models::{AgentCard, Config};

/// Configuration for the A2A HTTP gateway.
#[derive(Debug, Clone)]
pub struct A2AHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for A2AHttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

impl From<&Config> for A2AHttpConfig {
    fn from(config: &Config) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.server.enable_cors,
        }
    }
}

/// Shared state for the A2A HTTP gateway.
pub struct A2AState {
    pub card: AgentCard,
    pub handler: RequestHandler,
}

/// A2A HTTP Gateway.
pub struct A2AGateway {
    config: A2AHttpConfig,
    state: Arc<A2AState>,
}

impl A2AGateway {
    pub fn new(config: A2AHttpConfig, card: AgentCard, handler: RequestHandler) -> Self {
        Self {
            config,
            state: Arc::new(A2AState { card, handler }),
        }
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> Arc<A2AState> {
        Arc::clone(&self.state)
    }

    /// Build the router.
    pub fn build_router(&self) -> Router {
        let app = Router::new()
            .route("/", post(handle_jsonrpc))
            .route("/.well-known/agent.json", get(agent_card))
            .route("/.well-known/agent-card.json", get(agent_card))
            .route("/health", get(health_check))
            .with_state(Arc::clone(&self.state));

        if self.config.enable_cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Start the gateway with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();

        // Hostnames such as `localhost` are resolved, not parsed.
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;

        info!("A2A HTTP Gateway listening on {}", addr);
        info!("Agent Card: {}/.well-known/agent.json", self.state.card.url);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

async fn health_check() -> &'static str {
    "OK"
}

async fn agent_card(State(state): State<Arc<A2AState>>) -> Json<AgentCard> {
    Json(state.card.clone())
}

async fn handle_jsonrpc(State(state): State<Arc<A2AState>>, body: Bytes) -> Response {
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let code = if serde_json::from_slice::<Value>(&body).is_ok() {
                A2AErrorCode::InvalidRequest
            } else {
                A2AErrorCode::ParseError
            };
            return Json(JsonRpcResponse::error(
                None,
                code,
                Some(json!({"message": e.to_string()})),
            ))
            .into_response();
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Json(JsonRpcResponse::error(
            request.id,
            A2AErrorCode::InvalidRequest,
            Some(json!({"message": "Invalid JSON-RPC version"})),
        ))
        .into_response();
    }

    debug!(method = %request.method, "JSON-RPC request");

    match request.method.as_str() {
        "message/send" => handle_message_send(&state, request).await,
        "message/stream" => handle_message_stream(&state, request).await,
        "tasks/get" => {
            let result = match parse_params(&request) {
                Ok(params) => state.handler.on_get_task(params).await,
                Err(e) => Err(e),
            };
            task_response(request.id, result)
        }
        "tasks/cancel" => {
            let result = match parse_params(&request) {
                Ok(params) => state.handler.on_cancel_task(params).await,
                Err(e) => Err(e),
            };
            task_response(request.id, result)
        }
        method if method.starts_with("tasks/pushNotificationConfig/") => {
            Json(JsonRpcResponse::error(
                request.id,
                A2AErrorCode::PushNotificationNotSupported,
                None,
            ))
            .into_response()
        }
        "tasks/resubscribe" => Json(JsonRpcResponse::error(
            request.id,
            A2AErrorCode::UnsupportedOperation,
            Some(json!({"method": request.method})),
        ))
        .into_response(),
        _ => Json(JsonRpcResponse::error(
            request.id,
            A2AErrorCode::MethodNotFound,
            Some(json!({"method": request.method})),
        ))
        .into_response(),
    }
}

fn parse_params<T: DeserializeOwned>(request: &JsonRpcRequest) -> Result<T, RpcError> {
    serde_json::from_value(request.params.clone())
        .map_err(|e| RpcError::InvalidParams(e.to_string()))
}

fn task_response<T: serde::Serialize>(id: Option<Value>, result: Result<T, RpcError>) -> Response {
    let response = match result.and_then(|value| {
        serde_json::to_value(value).map_err(|e| RpcError::Internal(e.to_string()))
    }) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => {
            warn!(error = %e, "JSON-RPC request failed");
            JsonRpcResponse::from_rpc_error(id, &e)
        }
    };
    Json(response).into_response()
}

async fn handle_message_send(state: &A2AState, request: JsonRpcRequest) -> Response {
    let result = match parse_params::<MessageSendParams>(&request) {
        Ok(params) => state.handler.on_message_send(params).await,
        Err(e) => Err(e),
    };
    task_response(request.id, result)
}

async fn handle_message_stream(state: &A2AState, request: JsonRpcRequest) -> Response {
    let params = match parse_params::<MessageSendParams>(&request) {
        Ok(params) => params,
        Err(e) => return task_response::<Value>(request.id, Err(e)),
    };

    let events = match state.handler.on_message_stream(params).await {
        Ok(events) => events,
        Err(e) => return task_response::<Value>(request.id, Err(e)),
    };

    let id = request.id;
    let stream = events.map(move |event| {
        let response = match serde_json::to_value(&event) {
            Ok(value) => JsonRpcResponse::success(id.clone(), value),
            Err(e) => {
                JsonRpcResponse::from_rpc_error(id.clone(), &RpcError::Internal(e.to_string()))
            }
        };
        let data = serde_json::to_string(&response).unwrap_or_default();
        Ok::<Event, Infallible>(Event::default().data(data))
    });

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
