use crate::core::match_sim::simulate_match;
use crate::domain::model::{GroupMap, MatchRecord, PointsTable, Roster, Team};
use crate::domain::ports::RandomSource;
use crate::utils::error::Result;

pub const WIN_POINTS: u32 = 2;
pub const LOSS_POINTS: u32 = 1;

/// 小組賽的輸出：各組比賽紀錄與本次模擬的積分表
#[derive(Debug, Clone, Default)]
pub struct GroupStageOutcome {
    pub results: GroupMap<MatchRecord>,
    pub points: PointsTable,
}

impl GroupStageOutcome {
    pub fn match_count(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}

/// 單一小組循環賽：i 對所有 j > i 各賽一場
pub fn simulate_group_matches<R: RandomSource + ?Sized>(
    group_name: &str,
    teams: &[Team],
    points: &mut PointsTable,
    rng: &mut R,
) -> Result<Vec<MatchRecord>> {
    let mut results = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);

    for (i, team_a) in teams.iter().enumerate() {
        for team_b in &teams[i + 1..] {
            let result = simulate_match(team_a, team_b, rng).inspect_err(|_| {
                tracing::error!(
                    "❌ Error simulating group {} match between {} and {}",
                    group_name,
                    team_a.name,
                    team_b.name
                );
            })?;

            points.add(result.winner(), WIN_POINTS);
            points.add(result.loser(), LOSS_POINTS);

            results.push(result.to_record(Some(group_name)));
        }
    }

    Ok(results)
}

/// 整個小組賽階段：先將所有隊伍積分歸零，再依分組順序比賽
pub fn simulate_group_stage<R: RandomSource + ?Sized>(
    roster: &Roster,
    rng: &mut R,
) -> Result<GroupStageOutcome> {
    let mut points = PointsTable::new();
    for team in roster.teams() {
        points.reset(team);
    }

    let mut results = GroupMap::new();
    for (group_name, teams) in &roster.groups {
        let group_results = simulate_group_matches(group_name, teams, &mut points, rng)?;
        tracing::debug!("Group {}: {} matches played", group_name, group_results.len());
        results.insert(group_name.clone(), group_results);
    }

    Ok(GroupStageOutcome { results, points })
}
