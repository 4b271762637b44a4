use crate::core::group_stage::simulate_group_stage;
use crate::core::knockout::run_knockout;
use crate::core::pots::Pots;
use crate::core::standings::calculate_standings;
use crate::domain::model::{Roster, TournamentReport};
use crate::domain::ports::RandomSource;
use crate::utils::error::Result;
use crate::utils::monitor::StageMonitor;

/// 依序驅動小組賽、排名、分籤、淘汰賽
pub struct TournamentEngine<R: RandomSource> {
    rng: R,
    monitor: StageMonitor,
}

impl<R: RandomSource> TournamentEngine<R> {
    pub fn new(rng: R) -> Self {
        Self::new_with_monitoring(rng, false)
    }

    pub fn new_with_monitoring(rng: R, monitor_enabled: bool) -> Self {
        Self {
            rng,
            monitor: StageMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&mut self, roster: &Roster) -> Result<TournamentReport> {
        // 積分表以隊名為鍵，隊名重複會互相覆蓋
        roster.validate_structure()?;

        tracing::info!(
            "🏀 Starting tournament with {} teams in {} groups",
            roster.team_count(),
            roster.groups.len()
        );

        // 小組賽
        let group_stage = simulate_group_stage(roster, &mut self.rng)?;
        tracing::info!("✅ Group stage complete: {} matches", group_stage.match_count());
        self.monitor.mark("Group stage");

        // 排名
        let standings = calculate_standings(&roster.groups, &group_stage.points);
        for (group_name, entries) in &standings {
            if let Some(leader) = entries.first() {
                tracing::debug!(
                    "Group {} leader: {} ({} points)",
                    group_name,
                    leader.team.name,
                    leader.points
                );
            }
        }

        // 分籤與八強對陣
        let pots = Pots::from_standings(&standings);
        tracing::info!(
            "🎯 Draw pots: {} / {} / {} / {} teams",
            pots.first.len(),
            pots.second.len(),
            pots.third.len(),
            pots.fourth.len()
        );
        let quarter_final_pairings = pots.draw_quarter_finals()?;
        self.monitor.mark("Draw");

        // 淘汰賽
        let knockout = run_knockout(&quarter_final_pairings, &mut self.rng)?;
        self.monitor.mark("Knockout stage");

        if let Some(gold) = &knockout.medals.gold {
            tracing::info!("🥇 Gold medal: {}", gold.name);
        }
        self.monitor.log_final_stats();

        Ok(TournamentReport {
            group_results: group_stage.results,
            standings,
            pots: pots.into_vec(),
            quarter_final_pairings,
            quarter_finals: knockout.quarter_finals,
            semi_finals: knockout.semi_finals,
            third_place: knockout.third_place,
            final_match: knockout.final_match,
            medals: knockout.medals,
            generated_at: chrono::Utc::now(),
        })
    }
}
