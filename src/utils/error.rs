use crate::domain::model::{MatchId, MatchScore};
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

/// Rejections raised by the match factory. Every variant carries the offending value(s).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Given team names ({home}:{away}) are incorrect")]
    InvalidTeamNames { home: String, away: String },

    #[error("Given team name ({0}) is incorrect")]
    InvalidTeamName(String),

    #[error("Match score is incorrect: {0}")]
    InvalidScore(MatchScore),

    #[error("Match {id} has been already finished")]
    AlreadyFinished { id: MatchId },

    #[error("Match end time value ({end}) is not after start time ({start})")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Save,
    Update,
    Get,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOperation::Save => "save",
            StoreOperation::Update => "update",
            StoreOperation::Get => "get",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Match with id={id} already exists in storage ({operation})")]
    AlreadyExists { operation: StoreOperation, id: MatchId },

    #[error("No match ids left to assign ({operation})")]
    IdSpaceExhausted { operation: StoreOperation },

    #[error("There is no match with id={id} ({operation})")]
    NotFound { operation: StoreOperation, id: MatchId },
}

#[derive(Error, Debug)]
pub enum ScoreBoardError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoreBoardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoreBoardError::Validation(_) => ErrorCategory::Input,
            ScoreBoardError::Storage(_) => ErrorCategory::Storage,
            ScoreBoardError::ConfigError { .. }
            | ScoreBoardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScoreBoardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ScoreBoardError::Validation(ValidationError::AlreadyFinished { .. }) => ErrorSeverity::Low,
            ScoreBoardError::Validation(_) => ErrorSeverity::Medium,
            ScoreBoardError::Storage(_)
            | ScoreBoardError::ConfigError { .. }
            | ScoreBoardError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ScoreBoardError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoreBoardError::Validation(ValidationError::InvalidTeamName(_))
            | ScoreBoardError::Validation(ValidationError::InvalidTeamNames { .. }) => {
                "Team names need at least three letters, digits or underscores"
            }
            ScoreBoardError::Validation(ValidationError::InvalidScore(_)) => {
                "Scores must be zero or positive"
            }
            ScoreBoardError::Validation(ValidationError::AlreadyFinished { .. }) => {
                "The match is already off the board, nothing to do"
            }
            ScoreBoardError::Validation(ValidationError::EndBeforeStart { .. }) => {
                "Check the match start time, it must be in the past"
            }
            ScoreBoardError::Storage(StorageError::NotFound { .. }) => {
                "Use an id returned by create_match"
            }
            ScoreBoardError::Storage(StorageError::AlreadyExists { .. }) => {
                "Save only new matches, use update for existing ones"
            }
            ScoreBoardError::Storage(StorageError::IdSpaceExhausted { .. }) => {
                "Start a new board, this one has issued every id"
            }
            ScoreBoardError::IoError(_) => "Check that the file exists and is readable",
            ScoreBoardError::ConfigError { .. }
            | ScoreBoardError::InvalidConfigValueError { .. } => {
                "Fix the scenario file and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Rejected input: {}", self),
            ErrorCategory::Storage => format!("Scoreboard lookup failed: {}", self),
            ErrorCategory::Configuration => format!("Bad scenario: {}", self),
            ErrorCategory::System => format!("System failure: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreBoardError>;
