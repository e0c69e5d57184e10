use crate::domain::model::{Match, MatchId, MatchScore};
use crate::utils::error::{Result, StorageError, ValidationError};
use chrono::{Local, NaiveDateTime};

/// Owns id assignment and the id -> match mapping.
pub trait MatchStore: Send + Sync {
    /// Persists a new match, assigning the next id when it has none.
    fn save(&self, m: Match) -> std::result::Result<Match, StorageError>;
    /// Replaces the stored value for `m.id()`.
    fn update(&self, m: Match) -> std::result::Result<Match, StorageError>;
    fn get(&self, id: MatchId) -> std::result::Result<Match, StorageError>;
    /// Snapshot of every stored match, in no particular order.
    fn list_all(&self) -> Vec<Match>;
    fn list_in_progress(&self) -> Vec<Match>;
}

/// Builds matches and validated transitions without touching storage.
pub trait MatchFactory: Send + Sync {
    fn create_match(
        &self,
        home_team: &str,
        away_team: &str,
        start_time: NaiveDateTime,
    ) -> std::result::Result<Match, ValidationError>;

    fn update_score(&self, m: &Match, score: MatchScore) -> std::result::Result<Match, ValidationError>;

    fn finish_match(&self, m: &Match, end_time: NaiveDateTime) -> std::result::Result<Match, ValidationError>;
}

pub trait ScoreBoard {
    /// Starts a match now.
    fn create_match(&self, home_team: &str, away_team: &str) -> Result<MatchId>;
    fn create_match_at(&self, home_team: &str, away_team: &str, start_time: NaiveDateTime) -> Result<MatchId>;
    /// `false` on any failure; the cause is only logged.
    fn update_match(&self, id: MatchId, score: MatchScore) -> bool;
    fn finish_match(&self, id: MatchId) -> Result<()>;
    /// In-progress matches, highest total first, most recently started first on ties.
    fn summary(&self) -> Vec<Match>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
