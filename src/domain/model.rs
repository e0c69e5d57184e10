use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

pub type MatchId = u64;

/// Id carried by a match that no store has persisted yet.
pub const UNASSIGNED_ID: MatchId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct MatchScore {
    pub home: i32,
    pub away: i32,
}

impl MatchScore {
    pub fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> i64 {
        i64::from(self.home) + i64::from(self.away)
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

/// One tracked contest. Values are never changed in place: every transition
/// (id assignment, new score, finish) yields a fresh `Match`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    id: MatchId,
    home_team: String,
    away_team: String,
    start_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_time: Option<NaiveDateTime>,
    score: MatchScore,
}

impl Match {
    /// A fresh, unpersisted match at 0:0. Name validation is the factory's job.
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>, start_time: NaiveDateTime) -> Self {
        Self {
            id: UNASSIGNED_ID,
            home_team: home_team.into(),
            away_team: away_team.into(),
            start_time,
            end_time: None,
            score: MatchScore::default(),
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }

    pub fn score(&self) -> MatchScore {
        self.score
    }

    pub fn total_score(&self) -> i64 {
        self.score.total()
    }

    pub fn is_in_progress(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    pub fn with_id(&self, id: MatchId) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn with_score(&self, score: MatchScore) -> Self {
        Self {
            score,
            ..self.clone()
        }
    }

    pub fn with_end_time(&self, end_time: NaiveDateTime) -> Self {
        Self {
            end_time: Some(end_time),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn kickoff() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(1, 1, 1)
            .unwrap()
    }

    #[test]
    fn test_new_match_is_unpersisted_and_in_progress() {
        let m = Match::new("Spain", "Brazil", kickoff());
        assert_eq!(m.id(), UNASSIGNED_ID);
        assert!(!m.is_persisted());
        assert!(m.is_in_progress());
        assert_eq!(m.score(), MatchScore::new(0, 0));
    }

    #[test]
    fn test_transitions_leave_source_value_untouched() {
        let m = Match::new("Spain", "Brazil", kickoff());
        let scored = m.with_score(MatchScore::new(10, 2));

        assert_eq!(m.total_score(), 0);
        assert_eq!(scored.total_score(), 12);
        assert_eq!(scored.home_team(), "Spain");
    }

    #[test]
    fn test_serializes_without_end_time_while_in_progress() {
        let m = Match::new("Spain", "Brazil", kickoff()).with_id(3);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("end_time").is_none());
        assert_eq!(MatchScore::new(6, 6).to_string(), "6:6");
    }
}
