use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a health payload including the tracked-matches gauge.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.presence().tracked_matches())
}
