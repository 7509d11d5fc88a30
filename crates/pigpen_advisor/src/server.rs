//! HTTP advisory service.

use crate::wire::{MoveRequest, MoveResponse};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use pigpen_board::{AdviceQuery, Advisor};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shared advisor behind the router.
pub type SharedAdvisor = Arc<dyn Advisor>;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Name of the advisor answering `/api/move`.
    pub advisor: String,
}

/// Builds the advisory router: `POST /api/move` and `GET /health`.
pub fn advisory_router(advisor: SharedAdvisor) -> Router {
    Router::new()
        .route("/api/move", post(suggest_move))
        .route("/health", get(health))
        .with_state(advisor)
}

#[instrument(skip(advisor, request), fields(pig = %request.pig_pos, walls = request.walls.len()))]
async fn suggest_move(
    State(advisor): State<SharedAdvisor>,
    Json(request): Json<MoveRequest>,
) -> (StatusCode, Json<MoveResponse>) {
    let mut thoughts = vec![
        format!("Analyzing board with {} advisor", advisor.name()),
        format!("Pig position: {}", request.pig_pos),
    ];
    let query = AdviceQuery::from(request);

    match advisor.suggest(&query).await {
        Ok(advice) => {
            let mut response = MoveResponse::from(advice);
            thoughts.append(&mut response.thoughts);
            response.thoughts = thoughts;
            let status = if response.has_move() {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            info!(status = %status, cell = ?response.cell, "Answered move request");
            (status, Json(response))
        }
        Err(e) => {
            warn!(error = %e, "Advisor failed");
            thoughts.push(format!("Advisor failed: {}", e.message));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MoveResponse {
                    cell: None,
                    thoughts,
                    error: Some(e.message),
                }),
            )
        }
    }
}

async fn health(State(advisor): State<SharedAdvisor>) -> Json<Health> {
    Json(Health {
        status: "ok",
        advisor: advisor.name().to_string(),
    })
}

/// Serves [`advisory_router`] on `listener` until the listener fails.
#[instrument(skip_all)]
pub async fn serve(listener: tokio::net::TcpListener, advisor: SharedAdvisor) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, advisor = advisor.name(), "Advisory service listening");
    axum::serve(listener, advisory_router(advisor)).await
}
