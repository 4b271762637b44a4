use crate::domain::model::{GroupMap, PointsTable, Standings, StandingsEntry, Team};

/// 依積分由高到低排序。
///
/// 使用穩定排序，同分時保留名單中的原始順序；沒有勝負關係或得失分等第二順位。
pub fn calculate_standings(groups: &GroupMap<Team>, points: &PointsTable) -> Standings {
    groups
        .iter()
        .map(|(group_name, teams)| (group_name.clone(), rank_group(teams, points)))
        .collect()
}

pub fn rank_group(teams: &[Team], points: &PointsTable) -> Vec<StandingsEntry> {
    let mut sorted: Vec<&Team> = teams.iter().collect();
    sorted.sort_by(|a, b| points.get(b).cmp(&points.get(a)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, team)| StandingsEntry {
            position: index + 1,
            team: team.clone(),
            points: points.get(team),
        })
        .collect()
}
