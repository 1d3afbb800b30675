use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        presence::{HeartbeatAck, HeartbeatRequest, PresenceReport, ResumeAck, ResumeRequest},
        validation::validate_identifier,
    },
    error::ServiceError,
    state::SharedState,
};

/// Record a heartbeat for one player of a match.
///
/// The upsert is last-write-wins per player, so retries are safe and simply
/// refresh the timestamp.
pub async fn record_heartbeat(
    state: &SharedState,
    match_id: &str,
    request: HeartbeatRequest,
) -> Result<HeartbeatAck, ServiceError> {
    ensure_match_id(match_id)?;
    request.validate()?;

    state
        .presence()
        .record(match_id, &request.user_id, &request.player_symbol);
    info!(
        match_id,
        user_id = %request.user_id,
        player_symbol = %request.player_symbol,
        "recorded player heartbeat"
    );

    // Piggy-back the retention sweep on the write path so abandoned matches
    // are dropped without a background timer.
    state.presence().sweep(state.config().retention());

    Ok(HeartbeatAck::recorded())
}

/// Compute the presence report for a match.
///
/// A match nobody has ever heartbeated for yields the empty report; the
/// evaluator never asserts that a match exists.
pub async fn evaluate_presence(
    state: &SharedState,
    match_id: &str,
) -> Result<PresenceReport, ServiceError> {
    let view = state
        .presence()
        .view(match_id, state.config().stale_after_minutes());
    Ok(view.into())
}

/// Acknowledge a player's intent to resume a paused match.
///
/// Deliberately leaves the presence records untouched: the resuming player's
/// next heartbeat is what clears their inactive status, so resume stays a
/// notification rather than a second writer racing on the same record.
pub async fn resume_match(
    state: &SharedState,
    match_id: &str,
    request: ResumeRequest,
) -> Result<ResumeAck, ServiceError> {
    ensure_match_id(match_id)?;
    request.validate()?;

    info!(
        match_id,
        user_id = %request.user_id,
        "player requested match resume"
    );

    Ok(ResumeAck {
        success: true,
        message: format!("resume acknowledged for match {match_id}"),
    })
}

/// Reject match identifiers the request sanitizer would not let through.
fn ensure_match_id(match_id: &str) -> Result<(), ServiceError> {
    if let Err(e) = validate_identifier(match_id) {
        let mut errors = ValidationErrors::new();
        errors.add("matchId", e);
        return Err(errors.into());
    }
    Ok(())
}
