use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Match Pulse Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::presence::record_heartbeat,
        crate::routes::presence::evaluate_presence,
        crate::routes::presence::resume_match,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::presence::HeartbeatRequest,
            crate::dto::presence::HeartbeatAck,
            crate::dto::presence::ResumeRequest,
            crate::dto::presence::ResumeAck,
            crate::dto::presence::ActivityEntry,
            crate::dto::presence::PresenceReport,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "presence", description = "Player heartbeat tracking and pause inference"),
    )
)]
pub struct ApiDoc;
