use crate::core::{MatchId, MatchScore, ScoreBoard};
use crate::utils::error::{Result, ScoreBoardError};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative, Validate};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// A board and the matches to replay onto it, read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub board: BoardConfig,
    #[serde(default)]
    pub matches: Vec<MatchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub home: String,
    pub away: String,
    /// `YYYY-MM-DDTHH:MM:SS` as a quoted string; now when absent.
    pub start: Option<NaiveDateTime>,
    /// `[home, away]`
    pub score: Option<[i32; 2]>,
    pub finished: Option<bool>,
}

impl MatchEntry {
    pub fn score(&self) -> Option<MatchScore> {
        self.score.map(|[home, away]| MatchScore::new(home, away))
    }

    pub fn is_finished(&self) -> bool {
        self.finished.unwrap_or(false)
    }
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoreBoardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoreBoardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Creates every match on `board`, applies its score and finishes it when
    /// flagged. Returns the assigned ids in file order.
    pub fn replay<B: ScoreBoard>(&self, board: &B) -> Result<Vec<MatchId>> {
        let mut ids = Vec::with_capacity(self.matches.len());

        for (index, entry) in self.matches.iter().enumerate() {
            let id = match entry.start {
                Some(start) => board.create_match_at(&entry.home, &entry.away, start)?,
                None => board.create_match(&entry.home, &entry.away)?,
            };

            if let Some(score) = entry.score() {
                if !board.update_match(id, score) {
                    return Err(ScoreBoardError::InvalidConfigValueError {
                        field: format!("matches[{}].score", index),
                        value: score.to_string(),
                        reason: "Score update was rejected".to_string(),
                    });
                }
            }

            if entry.is_finished() {
                board.finish_match(id)?;
            }

            tracing::debug!("Replayed matches[{}] as id {}", index, id);
            ids.push(id);
        }

        Ok(ids)
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("board.name", &self.board.name)?;

        // Team names are left to the match factory.
        for (index, entry) in self.matches.iter().enumerate() {
            if let Some([home, away]) = entry.score {
                let field = format!("matches[{}].score", index);
                validate_non_negative(&field, home)?;
                validate_non_negative(&field, away)?;
            }
        }

        Ok(())
    }
}
