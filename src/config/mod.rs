pub mod cli;
pub mod roster;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bracket-sim")]
#[command(about = "Simulate a group stage and knockout bracket from a ranked roster")]
pub struct CliConfig {
    /// Roster file: group name -> list of teams
    #[arg(long, default_value = "groups.json")]
    pub roster: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Report files to write (text, json, csv); empty prints to the console only
    #[arg(long, value_delimiter = ',')]
    pub output_formats: Vec<String>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log time and memory per stage")]
    pub monitor: bool,

    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub log_format: String,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn roster_path(&self) -> &str {
        &self.roster
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("roster", &self.roster)?;
        validation::validate_file_extension("roster", &self.roster, &["json"])?;

        if !self.output_formats.is_empty() {
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_output_formats("output_formats", &self.output_formats)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_arguments() {
        let config = CliConfig::parse_from([
            "bracket-sim",
            "--roster",
            "data/groups.json",
            "--output-formats",
            "json,csv",
            "--seed",
            "42",
        ]);

        assert_eq!(config.roster_path(), "data/groups.json");
        assert_eq!(config.output_formats(), ["json".to_string(), "csv".to_string()]);
        assert_eq!(config.seed(), Some(42));
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_console_only_run_skips_format_validation() {
        let config = CliConfig::parse_from(["bracket-sim", "--output-path", ""]);

        assert!(config.output_formats().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_format_and_non_json_roster() {
        let config = CliConfig::parse_from(["bracket-sim", "--output-formats", "xml"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["bracket-sim", "--roster", "groups.yaml"]);
        assert!(config.validate().is_err());
    }
}
