use crate::domain::model::MatchScore;
use crate::utils::error::{Result, ScoreBoardError};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII word characters only.
static TEAM_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,}$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Three or more letters, digits or underscores, nothing else.
pub fn is_valid_name(name: &str) -> bool {
    TEAM_NAME_RE.is_match(name)
}

pub fn is_end_after_start(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    end > start
}

pub fn is_valid_score(score: &MatchScore) -> bool {
    score.home >= 0 && score.away >= 0
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScoreBoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: i32) -> Result<()> {
    if value < 0 {
        return Err(ScoreBoardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be zero or positive".to_string(),
        });
    }
    Ok(())
}
