//! Webhook HTTP server.
//!
//! Receives GitHub security alert events and turns them into reconciler
//! invocations: `created` events take the single-alert fast path, every
//! other recognized action triggers a full repository pass.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::infrastructure::webhook::signature::verify_signature;
use crate::services::SyncService;

struct AppState {
    sync: SyncService,
    secret: String,
}

/// Events carrying alert payloads we react to.
const ALERT_EVENTS: &[&str] = &["code_scanning_alert", "secret_scanning_alert"];

#[derive(Debug, Deserialize)]
struct AlertEvent {
    action: String,
    alert: EventAlert,
    repository: EventRepository,
}

#[derive(Debug, Deserialize)]
struct EventAlert {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct EventRepository {
    full_name: String,
}

/// Run the webhook server until the process is stopped.
pub async fn run_server(sync: SyncService, secret: String, port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState { sync, secret });
    let app = Router::new()
        .route("/hook", post(handle_hook))
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    info!(addr, "webhook server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_hook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get("X-Hub-Signature-256")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !verify_signature(signature, &state.secret, &body) {
        warn!("rejected webhook delivery with invalid signature");
        return StatusCode::UNAUTHORIZED;
    }

    let event = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !ALERT_EVENTS.contains(&event.as_str()) {
        // ping, installation events and the like
        return StatusCode::OK;
    }

    let payload: AlertEvent = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(event, "ignoring undecodable webhook payload: {e}");
            return StatusCode::BAD_REQUEST;
        }
    };

    let repo_id = payload.repository.full_name;
    info!(event, action = %payload.action, repo_id, "received alert event");

    // Only code-scanning `created` events can take the single-alert fast
    // path; everything else (state changes, secret events) needs the full
    // pass to consult and update the persisted state.
    let result = if event == "code_scanning_alert" && payload.action == "created" {
        state.sync.alert_created(&repo_id, payload.alert.number).await
    } else {
        state.sync.sync_repo(&repo_id).await
    };

    match result {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            // the next scheduled or event-driven pass corrects
            error!(repo_id, "webhook-triggered sync failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
