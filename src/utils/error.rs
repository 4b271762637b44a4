use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 淘汰賽中需要通過人數閘門的階段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutStage {
    QuarterFinal,
    SemiFinal,
    Final,
}

impl fmt::Display for KnockoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KnockoutStage::QuarterFinal => "quarter-finals",
            KnockoutStage::SemiFinal => "semi-finals",
            KnockoutStage::Final => "final",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Team missing ranking: {} (match {} vs {})", .missing.join(", "), .team_a, .team_b)]
    MissingRanking {
        team_a: String,
        team_b: String,
        missing: Vec<String>,
    },

    #[error("Not enough teams qualified for the {stage}: required {required}, found {found}")]
    InsufficientQualifiers {
        stage: KnockoutStage,
        required: usize,
        found: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Roster error: {message}")]
    RosterError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Simulation,
    Input,
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

impl TournamentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TournamentError::MissingRanking { .. }
            | TournamentError::InsufficientQualifiers { .. } => ErrorCategory::Simulation,
            TournamentError::RosterError { .. }
            | TournamentError::SerializationError(_)
            | TournamentError::CsvError(_) => ErrorCategory::Input,
            TournamentError::ConfigValidationError { .. }
            | TournamentError::InvalidConfigValueError { .. }
            | TournamentError::MissingConfigError { .. } => ErrorCategory::Configuration,
            TournamentError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Simulation => ErrorSeverity::Critical,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 行程結束代碼；晉級人數不足使用獨立的代碼
    pub fn exit_code(&self) -> i32 {
        match self {
            TournamentError::InsufficientQualifiers { .. } => 2,
            TournamentError::MissingRanking { .. } => 3,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TournamentError::MissingRanking { team_a, team_b, missing } => format!(
                "Cannot simulate {} vs {}: no ranking for {}",
                team_a,
                team_b,
                missing.join(", ")
            ),
            TournamentError::InsufficientQualifiers { stage, .. } => {
                format!("Not enough teams qualified for the {}.", stage)
            }
            TournamentError::IoError(e) => format!("Could not read or write a file: {}", e),
            TournamentError::SerializationError(e) => format!("Invalid JSON data: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TournamentError::MissingRanking { .. } => {
                "Add a FIBARanking value for every team in the roster file"
            }
            TournamentError::InsufficientQualifiers { .. } => {
                "Provide more groups or larger groups so at least four knockout pairs can be drawn"
            }
            TournamentError::RosterError { .. } | TournamentError::SerializationError(_) => {
                "Check that the roster file maps group names to lists of teams"
            }
            TournamentError::CsvError(_) => "Check the output path and CSV settings",
            TournamentError::IoError(_) => "Make sure the file exists and the output path is writable",
            TournamentError::ConfigValidationError { .. }
            | TournamentError::InvalidConfigValueError { .. }
            | TournamentError::MissingConfigError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
