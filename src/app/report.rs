use crate::domain::model::{MatchRecord, RoundResult, TournamentReport};
use crate::utils::error::{Result, TournamentError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(TournamentError::InvalidConfigValueError {
                field: "output_formats".to_string(),
                value: other.to_string(),
                reason: "Valid formats: text, json, csv".to_string(),
            }),
        }
    }
}

pub fn render(report: &TournamentReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(TextReport(report).to_string()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Csv => render_csv(report),
    }
}

/// 主控台格式的報表
pub struct TextReport<'a>(pub &'a TournamentReport);

fn write_round(f: &mut fmt::Formatter<'_>, title: &str, round: &RoundResult) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}:", title)?;
    for result in &round.results {
        writeln!(
            f,
            "  {} vs {} ({}:{})",
            result.team_a, result.team_b, result.team_a_score, result.team_b_score
        )?;
    }
    Ok(())
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Group Stage Results:")?;
        for (group_name, results) in &report.group_results {
            writeln!(f, "  Group {}:", group_name)?;
            for result in results {
                writeln!(
                    f,
                    "    {} - {} ({}:{})",
                    result.team_a, result.team_b, result.team_a_score, result.team_b_score
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Final Standings:")?;
        for (group_name, entries) in &report.standings {
            writeln!(f, "  Group {}:", group_name)?;
            for entry in entries {
                writeln!(
                    f,
                    "    {}. {} {} points",
                    entry.position, entry.team.name, entry.points
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Draw Pots:")?;
        for pot in &report.pots {
            writeln!(f, "  Pot {}:", pot.label)?;
            for team in &pot.teams {
                writeln!(f, "    {}", team.name)?;
            }
        }

        write_round(f, "Quarter-Final Matches", &report.quarter_finals)?;
        write_round(f, "Semi-Final Matches", &report.semi_finals)?;
        write_round(f, "Third Place Match", &report.third_place)?;
        write_round(f, "Final Match", &report.final_match)?;

        writeln!(f)?;
        writeln!(f, "Medal Winners:")?;
        if let Some(gold) = &report.medals.gold {
            writeln!(f, "  Gold Medal: {}", gold.name)?;
        }
        if let Some(silver) = &report.medals.silver {
            writeln!(f, "  Silver Medal: {}", silver.name)?;
        }
        if let Some(bronze) = &report.medals.bronze {
            writeln!(f, "  Bronze Medal: {}", bronze.name)?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    stage: &'a str,
    group: &'a str,
    team_a: &'a str,
    team_b: &'a str,
    team_a_score: u32,
    team_b_score: u32,
    winner: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(stage: &'a str, record: &'a MatchRecord) -> Self {
        Self {
            stage,
            group: record.group.as_deref().unwrap_or(""),
            team_a: &record.team_a,
            team_b: &record.team_b,
            team_a_score: record.team_a_score,
            team_b_score: record.team_b_score,
            winner: &record.winner,
        }
    }
}

/// 每場比賽一列，依賽程順序
pub fn render_csv(report: &TournamentReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for results in report.group_results.values() {
        for record in results {
            writer.serialize(CsvRow::new("group", record))?;
        }
    }

    let rounds = [
        ("quarter_final", &report.quarter_finals),
        ("semi_final", &report.semi_finals),
        ("third_place", &report.third_place),
        ("final", &report.final_match),
    ];
    for (stage, round) in rounds {
        for record in &round.results {
            writer.serialize(CsvRow::new(stage, record))?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        TournamentError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
