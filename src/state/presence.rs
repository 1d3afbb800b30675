//! Per-match player presence records and the pause verdict derived from them.

use std::time::{Duration, SystemTime};

use dashmap::DashMap;
use indexmap::IndexMap;

/// Stored last-seen timestamp and in-game role for one player in one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// The player's in-game role or marker (informational only).
    pub symbol: String,
    /// Wall-clock time of the last heartbeat received for this player.
    pub last_seen: SystemTime,
}

/// One player's activity as observed at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerActivity {
    /// Identifier of the player within the match.
    pub player_id: String,
    /// The player's in-game role or marker.
    pub symbol: String,
    /// Wall-clock time of the player's last heartbeat.
    pub last_seen: SystemTime,
}

/// Computed, non-persisted summary of all players' activity for a match.
///
/// The pause verdict is always recomputable from the records alone; it is
/// never written back anywhere.
#[derive(Debug, Clone, Default)]
pub struct MatchPresenceView {
    /// Every known player of the match, in first-heartbeat order.
    pub activities: Vec<PlayerActivity>,
    /// Subset of [`Self::activities`] whose last heartbeat is stale.
    pub inactive: Vec<PlayerActivity>,
    /// True iff at least one known player has gone stale.
    pub should_pause: bool,
}

/// In-memory presence table: match id to per-player last-seen map.
///
/// Heartbeats are last-write-wins per player and a view is computed from a
/// snapshot, so no invariant spans multiple players' records atomically.
pub struct PresenceTable {
    matches: DashMap<String, IndexMap<String, PlayerRecord>>,
}

impl PresenceTable {
    /// Create an empty presence table.
    pub fn new() -> Self {
        Self {
            matches: DashMap::new(),
        }
    }

    /// Upsert the record for `(match_id, player_id)` with the current time.
    ///
    /// A repeated heartbeat refreshes the existing record rather than
    /// creating a duplicate.
    pub fn record(&self, match_id: &str, player_id: &str, symbol: &str) {
        self.record_at(match_id, player_id, symbol, SystemTime::now());
    }

    /// Upsert the record for `(match_id, player_id)` with an explicit timestamp.
    pub fn record_at(&self, match_id: &str, player_id: &str, symbol: &str, at: SystemTime) {
        let mut players = self.matches.entry(match_id.to_owned()).or_default();
        players.insert(
            player_id.to_owned(),
            PlayerRecord {
                symbol: symbol.to_owned(),
                last_seen: at,
            },
        );
    }

    /// Compute the presence view for a match against the current time.
    ///
    /// An unknown match id yields the empty view, never an error: this table
    /// does not assert that a match exists.
    pub fn view(&self, match_id: &str, stale_after_minutes: f64) -> MatchPresenceView {
        self.view_at(match_id, stale_after_minutes, SystemTime::now())
    }

    /// Compute the presence view for a match as of `now`.
    ///
    /// A player is inactive when their elapsed minutes since the last
    /// heartbeat strictly exceed the threshold; exactly at the threshold
    /// still counts as active.
    pub fn view_at(
        &self,
        match_id: &str,
        stale_after_minutes: f64,
        now: SystemTime,
    ) -> MatchPresenceView {
        let Some(players) = self.matches.get(match_id) else {
            return MatchPresenceView::default();
        };

        let activities = players
            .iter()
            .map(|(player_id, record)| PlayerActivity {
                player_id: player_id.clone(),
                symbol: record.symbol.clone(),
                last_seen: record.last_seen,
            })
            .collect::<Vec<_>>();
        drop(players);

        let inactive = activities
            .iter()
            .filter(|activity| elapsed_minutes(activity.last_seen, now) > stale_after_minutes)
            .cloned()
            .collect::<Vec<_>>();

        let should_pause = !inactive.is_empty();

        MatchPresenceView {
            activities,
            inactive,
            should_pause,
        }
    }

    /// Drop every record for a match, typically when the match has ended.
    pub fn clear_match(&self, match_id: &str) {
        self.matches.remove(match_id);
    }

    /// Drop records idle longer than `retention` and remove emptied matches.
    ///
    /// Runs opportunistically on the heartbeat path so memory stays bounded
    /// without a background timer.
    pub fn sweep(&self, retention: Duration) {
        self.sweep_at(retention, SystemTime::now());
    }

    /// Sweep abandoned records as of `now`.
    pub fn sweep_at(&self, retention: Duration, now: SystemTime) {
        self.matches.retain(|_, players| {
            players.retain(|_, record| {
                now.duration_since(record.last_seen)
                    .map(|idle| idle <= retention)
                    .unwrap_or(true)
            });
            !players.is_empty()
        });
    }

    /// Number of matches currently holding at least one presence record.
    pub fn tracked_matches(&self) -> usize {
        self.matches.len()
    }
}

impl Default for PresenceTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Elapsed minutes between `last_seen` and `now` as a fraction, clamped at
/// zero when the clock reads backwards.
fn elapsed_minutes(last_seen: SystemTime, now: SystemTime) -> f64 {
    now.duration_since(last_seen)
        .unwrap_or_default()
        .as_secs_f64()
        / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const STALE_AFTER: f64 = 2.0;

    fn minutes(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    #[test]
    fn fresh_heartbeat_is_active() {
        let table = PresenceTable::new();
        table.record("match-1", "alice", "X");

        let view = table.view("match-1", STALE_AFTER);
        assert_eq!(view.activities.len(), 1);
        assert_eq!(view.activities[0].player_id, "alice");
        assert_eq!(view.activities[0].symbol, "X");
        assert!(view.inactive.is_empty());
        assert!(!view.should_pause);
    }

    #[test]
    fn three_minute_old_heartbeat_pauses_the_match() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("match-1", "alice", "X", now - minutes(3));

        let view = table.view_at("match-1", STALE_AFTER, now);
        assert_eq!(view.inactive.len(), 1);
        assert_eq!(view.inactive[0].player_id, "alice");
        assert!(view.should_pause);
    }

    #[test]
    fn one_minute_old_heartbeat_stays_active() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("match-1", "alice", "X", now - minutes(1));

        let view = table.view_at("match-1", STALE_AFTER, now);
        assert!(view.inactive.is_empty());
        assert!(!view.should_pause);
    }

    #[test]
    fn exactly_at_threshold_stays_active() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("match-1", "alice", "X", now - minutes(2));

        let view = table.view_at("match-1", STALE_AFTER, now);
        assert!(view.inactive.is_empty());
        assert!(!view.should_pause);
    }

    #[test]
    fn just_past_threshold_is_inactive() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("match-1", "alice", "X", now - minutes(2) - Duration::from_secs(1));

        let view = table.view_at("match-1", STALE_AFTER, now);
        assert_eq!(view.inactive.len(), 1);
        assert!(view.should_pause);
    }

    #[test]
    fn unknown_match_yields_empty_view() {
        let table = PresenceTable::new();

        let view = table.view("never-seen", STALE_AFTER);
        assert!(view.activities.is_empty());
        assert!(view.inactive.is_empty());
        assert!(!view.should_pause);
    }

    #[test]
    fn repeated_heartbeat_keeps_a_single_record() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("match-1", "alice", "X", now - minutes(1));
        table.record_at("match-1", "alice", "O", now);

        let view = table.view_at("match-1", STALE_AFTER, now);
        assert_eq!(view.activities.len(), 1);
        assert_eq!(view.activities[0].symbol, "O");
        assert_eq!(view.activities[0].last_seen, now);
    }

    #[test]
    fn one_stale_player_pauses_for_everyone() {
        let table = PresenceTable::new();
        let t0 = SystemTime::now();
        table.record_at("match-1", "alice", "X", t0);
        table.record_at("match-1", "bob", "O", t0);

        // 150 seconds later Alice has sent a fresh heartbeat, Bob has not.
        let later = t0 + Duration::from_secs(150);
        table.record_at("match-1", "alice", "X", later);

        let view = table.view_at("match-1", STALE_AFTER, later);
        assert_eq!(view.activities.len(), 2);
        assert_eq!(view.inactive.len(), 1);
        assert_eq!(view.inactive[0].player_id, "bob");
        assert!(view.should_pause);
    }

    #[test]
    fn stale_players_are_scoped_to_their_match() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("match-1", "alice", "X", now - minutes(5));
        table.record_at("match-2", "carol", "O", now);

        assert!(table.view_at("match-1", STALE_AFTER, now).should_pause);
        assert!(!table.view_at("match-2", STALE_AFTER, now).should_pause);
    }

    #[test]
    fn sweep_drops_abandoned_matches() {
        let table = PresenceTable::new();
        let now = SystemTime::now();
        table.record_at("old", "alice", "X", now - minutes(60 * 25));
        table.record_at("live", "bob", "O", now);

        table.sweep_at(minutes(60 * 24), now);

        assert_eq!(table.tracked_matches(), 1);
        assert!(table.view_at("old", STALE_AFTER, now).activities.is_empty());
        assert_eq!(table.view_at("live", STALE_AFTER, now).activities.len(), 1);
    }

    #[test]
    fn clear_match_removes_all_records() {
        let table = PresenceTable::new();
        table.record("match-1", "alice", "X");
        table.record("match-1", "bob", "O");

        table.clear_match("match-1");

        assert_eq!(table.tracked_matches(), 0);
        assert!(table.view("match-1", STALE_AFTER).activities.is_empty());
    }
}
