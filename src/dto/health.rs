use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status (always "ok"; there is no storage backend to degrade).
    pub status: String,
    /// Number of matches currently holding presence records.
    pub tracked_matches: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(tracked_matches: usize) -> Self {
        Self {
            status: "ok".to_string(),
            tracked_matches,
        }
    }
}
