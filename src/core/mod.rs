pub mod factory;
pub mod scoreboard;

pub use crate::domain::model::{Match, MatchId, MatchScore, UNASSIGNED_ID};
pub use crate::domain::ports::{Clock, MatchFactory, MatchStore, ScoreBoard, SystemClock};
pub use crate::utils::error::Result;
