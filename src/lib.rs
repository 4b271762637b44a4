pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::report::{render, ReportFormat};
pub use app::runner::{RunOutcome, TournamentRunner};
pub use config::{cli::LocalStorage, roster::JsonFileRoster, toml_config::TomlConfig};
pub use crate::core::{engine::TournamentEngine, random::RngSource, random::ScriptedSource};
pub use domain::model::{Roster, Team, TournamentReport};
pub use utils::error::{Result, TournamentError};
