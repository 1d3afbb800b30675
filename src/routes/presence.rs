use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::presence::{HeartbeatAck, HeartbeatRequest, PresenceReport, ResumeAck, ResumeRequest},
    error::AppError,
    services::presence_service,
    state::SharedState,
};

/// Routes tracking player heartbeats and the derived pause verdict.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/games/{match_id}/activity",
            post(record_heartbeat).get(evaluate_presence),
        )
        .route("/games/{match_id}/resume", post(resume_match))
}

/// Record a heartbeat for one player of a match.
#[utoipa::path(
    post,
    path = "/games/{match_id}/activity",
    tag = "presence",
    params(("match_id" = String, Path, description = "Identifier of the match the player is in")),
    request_body = HeartbeatRequest,
    responses(
        (status = 200, description = "Heartbeat recorded", body = HeartbeatAck),
        (status = 400, description = "Missing or malformed fields")
    )
)]
pub async fn record_heartbeat(
    State(state): State<SharedState>,
    Path(match_id): Path<String>,
    Json(payload): Json<HeartbeatRequest>,
) -> Result<Json<HeartbeatAck>, AppError> {
    let ack = presence_service::record_heartbeat(&state, &match_id, payload).await?;
    Ok(Json(ack))
}

/// Report every known player's last activity and whether the match should pause.
#[utoipa::path(
    get,
    path = "/games/{match_id}/activity",
    tag = "presence",
    params(("match_id" = String, Path, description = "Identifier of the match to evaluate")),
    responses((status = 200, description = "Presence report", body = PresenceReport))
)]
pub async fn evaluate_presence(
    State(state): State<SharedState>,
    Path(match_id): Path<String>,
) -> Result<Json<PresenceReport>, AppError> {
    let report = presence_service::evaluate_presence(&state, &match_id).await?;
    Ok(Json(report))
}

/// Acknowledge a player's intent to resume a paused match.
#[utoipa::path(
    post,
    path = "/games/{match_id}/resume",
    tag = "presence",
    params(("match_id" = String, Path, description = "Identifier of the match to resume")),
    request_body = ResumeRequest,
    responses(
        (status = 200, description = "Resume acknowledged", body = ResumeAck),
        (status = 400, description = "Missing or malformed fields")
    )
)]
pub async fn resume_match(
    State(state): State<SharedState>,
    Path(match_id): Path<String>,
    Json(payload): Json<ResumeRequest>,
) -> Result<Json<ResumeAck>, AppError> {
    let ack = presence_service::resume_match(&state, &match_id, payload).await?;
    Ok(Json(ack))
}
