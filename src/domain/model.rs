use crate::utils::error::{Result, TournamentError};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// 參賽隊伍，欄位名稱沿用 groups.json 的格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "Team", alias = "name")]
    pub name: String,

    #[serde(
        rename = "ISOCode",
        alias = "iso_code",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub iso_code: Option<String>,

    /// 數字越小越強；缺少排名時要到比賽模擬才會失敗
    #[serde(rename = "FIBARanking", alias = "ranking", default)]
    pub ranking: Option<f64>,

    #[serde(rename = "Group", alias = "group", default)]
    pub group: String,
}

impl Team {
    pub fn new(name: impl Into<String>, ranking: Option<f64>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iso_code: None,
            ranking,
            group: group.into(),
        }
    }
}

/// 分組名稱 -> 隊伍，分組與隊伍都保留檔案中的順序
pub type GroupMap<T> = IndexMap<String, Vec<T>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "GroupMap<Team>")]
pub struct Roster {
    pub groups: GroupMap<Team>,
}

impl From<GroupMap<Team>> for Roster {
    fn from(groups: GroupMap<Team>) -> Self {
        Self::new(groups)
    }
}

impl Roster {
    pub fn new(groups: impl IntoIterator<Item = (String, Vec<Team>)>) -> Self {
        let mut roster = Self {
            groups: groups.into_iter().collect(),
        };
        roster.fill_group_labels();
        roster
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 檔案中沒有 Group 欄位時，以外層的分組名稱補上
    fn fill_group_labels(&mut self) {
        for (group_name, teams) in self.groups.iter_mut() {
            for team in teams.iter_mut() {
                if team.group.trim().is_empty() {
                    team.group = group_name.clone();
                }
            }
        }
    }

    pub fn team_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.groups.values().flatten()
    }

    /// 結構檢查：至少一個分組、分組不可為空、隊名全域唯一
    pub fn validate_structure(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(TournamentError::RosterError {
                message: "roster contains no groups".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for (group_name, teams) in &self.groups {
            if teams.is_empty() {
                return Err(TournamentError::RosterError {
                    message: format!("group '{}' has no teams", group_name),
                });
            }
            for team in teams {
                if team.name.trim().is_empty() {
                    return Err(TournamentError::RosterError {
                        message: format!("group '{}' contains a team without a name", group_name),
                    });
                }
                if !seen.insert(team.name.as_str()) {
                    return Err(TournamentError::RosterError {
                        message: format!("team '{}' appears more than once", team.name),
                    });
                }
            }
        }

        Ok(())
    }
}

/// 每次模擬各自擁有的積分表，不寫回 Team
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointsTable {
    points: HashMap<String, u32>,
}

impl PointsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, team: &Team) {
        self.points.insert(team.name.clone(), 0);
    }

    pub fn add(&mut self, team: &Team, points: u32) {
        *self.points.entry(team.name.clone()).or_insert(0) += points;
    }

    pub fn get(&self, team: &Team) -> u32 {
        self.points.get(&team.name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.points.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    A,
    B,
}

/// 單場比賽結果，比分不會相同
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub team_a: Team,
    pub team_b: Team,
    pub team_a_score: u32,
    pub team_b_score: u32,
    pub winner: Side,
    /// 依排名差計算的 A 隊勝率，目前不影響比分抽樣
    pub team_a_win_probability: f64,
}

impl MatchResult {
    pub fn winner(&self) -> &Team {
        match self.winner {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn loser(&self) -> &Team {
        match self.winner {
            Side::A => &self.team_b,
            Side::B => &self.team_a,
        }
    }

    pub fn to_record(&self, group: Option<&str>) -> MatchRecord {
        MatchRecord {
            group: group.map(str::to_string),
            team_a: self.team_a.name.clone(),
            team_b: self.team_b.name.clone(),
            team_a_score: self.team_a_score,
            team_b_score: self.team_b_score,
            winner: self.winner().name.clone(),
        }
    }
}

/// 報表用的比賽紀錄，只保留隊名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub team_a: String,
    pub team_b: String,
    pub team_a_score: u32,
    pub team_b_score: u32,
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsEntry {
    pub position: usize,
    pub team: Team,
    pub points: u32,
}

pub type Standings = GroupMap<StandingsEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PotLabel {
    #[serde(rename = "1st-place")]
    First,
    #[serde(rename = "2nd-place")]
    Second,
    #[serde(rename = "3rd-place")]
    Third,
    #[serde(rename = "4th-place")]
    Fourth,
}

impl PotLabel {
    /// 分組排名（1 起算）對應的籤筒
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(PotLabel::First),
            2 => Some(PotLabel::Second),
            3 => Some(PotLabel::Third),
            4 => Some(PotLabel::Fourth),
            _ => None,
        }
    }
}

impl fmt::Display for PotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PotLabel::First => "1st-place",
            PotLabel::Second => "2nd-place",
            PotLabel::Third => "3rd-place",
            PotLabel::Fourth => "4th-place",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pot {
    pub label: PotLabel,
    pub teams: Vec<Team>,
}

impl Pot {
    pub fn new(label: PotLabel) -> Self {
        Self {
            label,
            teams: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// 淘汰賽對陣；由勝者名單組成時可能缺一邊
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnockoutPairing {
    pub team_a: Option<Team>,
    pub team_b: Option<Team>,
}

impl KnockoutPairing {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self {
            team_a: Some(team_a),
            team_b: Some(team_b),
        }
    }

    pub fn from_slots(team_a: Option<&Team>, team_b: Option<&Team>) -> Self {
        Self {
            team_a: team_a.cloned(),
            team_b: team_b.cloned(),
        }
    }

    pub fn is_same_group(&self) -> bool {
        match (&self.team_a, &self.team_b) {
            (Some(a), Some(b)) => a.group == b.group,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoundResult {
    pub winners: Vec<Team>,
    pub losers: Vec<Team>,
    pub results: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Medals {
    pub gold: Option<Team>,
    pub silver: Option<Team>,
    pub bronze: Option<Team>,
}

/// 各報表格式的預設檔名
pub fn default_report_filename(format: &str) -> &'static str {
    match format {
        "json" => "report.json",
        "csv" => "matches.csv",
        _ => "report.txt",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TournamentReport {
    pub group_results: GroupMap<MatchRecord>,
    pub standings: Standings,
    pub pots: Vec<Pot>,
    pub quarter_final_pairings: Vec<KnockoutPairing>,
    pub quarter_finals: RoundResult,
    pub semi_finals: RoundResult,
    pub third_place: RoundResult,
    pub final_match: RoundResult,
    pub medals: Medals,
    pub generated_at: DateTime<Utc>,
}

impl TournamentReport {
    pub fn group_match_count(&self) -> usize {
        self.group_results.values().map(Vec::len).sum()
    }
}
