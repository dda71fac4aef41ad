//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay endpoint
//! - Wire up middleware (tracing, body limit)
//! - Run the relay pipeline detached from the connection
//! - Serve until the shutdown signal fires

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::http::response::error_response;
use crate::observability::metrics;
use crate::relay::{RelayHandler, RelayOutcome};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayHandler>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an already provisioned relay.
    pub fn new(config: ServerConfig, relay: Arc<RelayHandler>) -> Self {
        Self {
            router: build_router(&config, AppState { relay }),
        }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
    Router::new()
        .route("/send", post(send_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
}

/// `POST /send`.
async fn send_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let start_time = Instant::now();

    let payload = match body {
        Ok(Json(Value::Object(payload))) => payload,
        Ok(Json(_)) => {
            return reject(StatusCode::BAD_REQUEST, "request body must be a JSON object", start_time);
        }
        Err(rejection) => {
            return reject(rejection.status(), &rejection.body_text(), start_time);
        }
    };

    // Spawned so a client hanging up cannot cancel a send or append mid-flight.
    let relay = state.relay.clone();
    let outcome = match spawn_in_current_span(async move { relay.relay(payload).await }).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Relay task aborted");
            return reject(StatusCode::INTERNAL_SERVER_ERROR, "relay task aborted", start_time);
        }
    };

    let label = match &outcome {
        RelayOutcome::Sent { .. } => "sent",
        RelayOutcome::Failed { .. } => "queue_failed",
    };
    metrics::record_request(label, start_time);

    outcome.into_response()
}

/// Spawn `future` under the caller's span so its events stay nested in the request.
fn spawn_in_current_span<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(future.instrument(tracing::Span::current()))
}

fn reject(status: StatusCode, reason: &str, start_time: Instant) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    tracing::warn!(trace_id = %trace_id, status = %status, reason, "Rejected request");
    metrics::record_request("rejected", start_time);
    error_response(status, reason, trace_id)
}
