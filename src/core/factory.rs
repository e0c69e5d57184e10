use crate::core::{Match, MatchFactory, MatchScore};
use crate::utils::error::ValidationError;
use crate::utils::validation::{is_end_after_start, is_valid_name, is_valid_score};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, Default)]
pub struct FootballMatchFactory;

impl FootballMatchFactory {
    pub fn new() -> Self {
        Self
    }

    fn validate_team_names(home_team: &str, away_team: &str) -> Result<(), ValidationError> {
        match (is_valid_name(home_team), is_valid_name(away_team)) {
            (true, true) => Ok(()),
            (false, false) => Err(ValidationError::InvalidTeamNames {
                home: home_team.to_string(),
                away: away_team.to_string(),
            }),
            (false, true) => Err(ValidationError::InvalidTeamName(home_team.to_string())),
            (true, false) => Err(ValidationError::InvalidTeamName(away_team.to_string())),
        }
    }
}

impl MatchFactory for FootballMatchFactory {
    fn create_match(
        &self,
        home_team: &str,
        away_team: &str,
        start_time: NaiveDateTime,
    ) -> Result<Match, ValidationError> {
        Self::validate_team_names(home_team, away_team)?;
        Ok(Match::new(home_team, away_team, start_time))
    }

    fn update_score(&self, m: &Match, score: MatchScore) -> Result<Match, ValidationError> {
        if !is_valid_score(&score) {
            return Err(ValidationError::InvalidScore(score));
        }
        Ok(m.with_score(score))
    }

    fn finish_match(&self, m: &Match, end_time: NaiveDateTime) -> Result<Match, ValidationError> {
        // already-finished is reported before any time ordering problem
        if !m.is_in_progress() {
            return Err(ValidationError::AlreadyFinished { id: m.id() });
        }
        if !is_end_after_start(m.start_time(), end_time) {
            return Err(ValidationError::EndBeforeStart {
                start: m.start_time(),
                end: end_time,
            });
        }
        Ok(m.with_end_time(end_time))
    }
}
