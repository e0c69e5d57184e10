pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::memory::InMemoryStorage;
pub use config::scenario::ScenarioConfig;
pub use core::{
    factory::FootballMatchFactory, scoreboard::WorldCupScoreBoard, Clock, Match, MatchFactory, MatchId,
    MatchScore, MatchStore, ScoreBoard, SystemClock,
};
pub use utils::error::{Result, ScoreBoardError, StorageError, StoreOperation, ValidationError};
