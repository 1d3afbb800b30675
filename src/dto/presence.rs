use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{
        format_system_time,
        validation::{validate_identifier, validate_symbol},
    },
    state::{MatchPresenceView, PlayerActivity},
};

/// Heartbeat payload sent periodically on behalf of one player.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeartbeatRequest {
    /// Identifier of the player the heartbeat is for.
    #[serde(default)]
    pub user_id: String,
    /// The player's in-game role or marker (e.g. which side they play).
    #[serde(default)]
    pub player_symbol: String,
}

impl Validate for HeartbeatRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier(&self.user_id) {
            errors.add("userId", e);
        }

        if let Err(e) = validate_symbol(&self.player_symbol) {
            errors.add("playerSymbol", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Payload notifying the backend that a player wants to resume a paused match.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    /// Identifier of the player requesting the resume.
    #[serde(default)]
    pub user_id: String,
}

impl Validate for ResumeRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_identifier(&self.user_id) {
            errors.add("userId", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Acknowledgment returned once a heartbeat has been recorded.
#[derive(Debug, Serialize, ToSchema)]
pub struct HeartbeatAck {
    /// Always true on the success path.
    pub success: bool,
    /// A freshly recorded heartbeat never pauses the match for its sender.
    pub game_paused: bool,
}

impl HeartbeatAck {
    /// Acknowledgment for a recorded heartbeat.
    pub fn recorded() -> Self {
        Self {
            success: true,
            game_paused: false,
        }
    }
}

/// Acknowledgment returned for a resume notification.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResumeAck {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable confirmation for the resuming client.
    pub message: String,
}

/// Public projection of one player's presence record.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityEntry {
    /// Identifier of the player.
    pub user_id: String,
    /// The player's in-game role or marker.
    pub player_symbol: String,
    /// RFC 3339 timestamp of the player's last heartbeat.
    pub last_activity: String,
}

/// Presence report for one match, including the derived pause verdict.
#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceReport {
    /// Every known player of the match.
    pub activities: Vec<ActivityEntry>,
    /// Players whose last heartbeat exceeds the staleness threshold.
    pub inactive_players: Vec<ActivityEntry>,
    /// True iff at least one known player has gone stale.
    pub should_pause: bool,
}

impl From<PlayerActivity> for ActivityEntry {
    fn from(activity: PlayerActivity) -> Self {
        Self {
            user_id: activity.player_id,
            player_symbol: activity.symbol,
            last_activity: format_system_time(activity.last_seen),
        }
    }
}

impl From<MatchPresenceView> for PresenceReport {
    fn from(view: MatchPresenceView) -> Self {
        Self {
            activities: view.activities.into_iter().map(Into::into).collect(),
            inactive_players: view.inactive.into_iter().map(Into::into).collect(),
            should_pause: view.should_pause,
        }
    }
}
