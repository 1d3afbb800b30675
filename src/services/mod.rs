/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Heartbeat recording, staleness evaluation, and resume acknowledgment.
pub mod presence_service;
