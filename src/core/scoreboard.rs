use crate::core::factory::FootballMatchFactory;
use crate::core::{Clock, Match, MatchFactory, MatchId, MatchScore, MatchStore, ScoreBoard, SystemClock};
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::sync::Arc;

pub struct WorldCupScoreBoard<S: MatchStore, F: MatchFactory = FootballMatchFactory> {
    factory: F,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: MatchStore> WorldCupScoreBoard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_factory(FootballMatchFactory::new(), store)
    }
}

impl<S: MatchStore, F: MatchFactory> WorldCupScoreBoard<S, F> {
    pub fn with_factory(factory: F, store: Arc<S>) -> Self {
        Self {
            factory,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn apply_score(&self, id: MatchId, score: MatchScore) -> Result<Match> {
        let current = self.store.get(id)?;
        let updated = self.factory.update_score(&current, score)?;
        Ok(self.store.update(updated)?)
    }
}

/// Summary ordering: total score descending, then later start first. Id
/// descending closes the remaining ties so the order is total.
fn rank(a: &Match, b: &Match) -> Ordering {
    b.total_score()
        .cmp(&a.total_score())
        .then_with(|| b.start_time().cmp(&a.start_time()))
        .then_with(|| b.id().cmp(&a.id()))
}

impl<S: MatchStore, F: MatchFactory> ScoreBoard for WorldCupScoreBoard<S, F> {
    fn create_match(&self, home_team: &str, away_team: &str) -> Result<MatchId> {
        self.create_match_at(home_team, away_team, self.clock.now())
    }

    fn create_match_at(&self, home_team: &str, away_team: &str, start_time: NaiveDateTime) -> Result<MatchId> {
        let m = self.factory.create_match(home_team, away_team, start_time)?;
        let saved = self.store.save(m)?;
        tracing::info!(
            "Match {} started: {} - {} at {}",
            saved.id(),
            saved.home_team(),
            saved.away_team(),
            saved.start_time()
        );
        Ok(saved.id())
    }

    fn update_match(&self, id: MatchId, score: MatchScore) -> bool {
        match self.apply_score(id, score) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Score update for match {} rejected: {}", id, e);
                false
            }
        }
    }

    fn finish_match(&self, id: MatchId) -> Result<()> {
        let current = self.store.get(id)?;
        let finished = self.factory.finish_match(&current, self.clock.now())?;
        self.store.update(finished)?;
        tracing::info!("Match {} finished", id);
        Ok(())
    }

    fn summary(&self) -> Vec<Match> {
        let mut matches = self.store.list_in_progress();
        matches.sort_by(rank);
        matches
    }
}
