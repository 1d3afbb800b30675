/// In-memory presence table and staleness classification.
pub mod presence;

use std::sync::Arc;

use crate::config::AppConfig;

use self::presence::PresenceTable;

pub use self::presence::{MatchPresenceView, PlayerActivity};

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

/// Central application state owning the presence table for live matches.
///
/// Presence is transient by design: the table lives for the lifetime of this
/// process and is dropped wholesale on restart.
pub struct AppState {
    config: AppConfig,
    presence: PresenceTable,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            presence: PresenceTable::new(),
        })
    }

    /// Runtime configuration snapshot.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Presence table keyed by match identifier.
    pub fn presence(&self) -> &PresenceTable {
        &self.presence
    }
}
