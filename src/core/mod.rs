pub mod engine;
pub mod group_stage;
pub mod knockout;
pub mod match_sim;
pub mod pots;
pub mod random;
pub mod standings;

pub use crate::domain::model::{KnockoutPairing, MatchResult, Roster, Team, TournamentReport};
pub use crate::domain::ports::{ConfigProvider, RandomSource, RosterSource, Storage};
pub use crate::utils::error::Result;
