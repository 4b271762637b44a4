use crate::domain::model::{KnockoutPairing, Pot, PotLabel, Standings, Team};
use crate::utils::error::{KnockoutStage, Result, TournamentError};

pub const QUARTER_FINAL_PAIRS: usize = 4;

/// 四個籤筒，依小組名次分配
#[derive(Debug, Clone, PartialEq)]
pub struct Pots {
    pub first: Pot,
    pub second: Pot,
    pub third: Pot,
    pub fourth: Pot,
}

impl Pots {
    /// 每組第 N 名進入第 N 個籤筒；隊伍不足的分組不貢獻該籤筒
    pub fn from_standings(standings: &Standings) -> Self {
        let mut pots = Self {
            first: Pot::new(PotLabel::First),
            second: Pot::new(PotLabel::Second),
            third: Pot::new(PotLabel::Third),
            fourth: Pot::new(PotLabel::Fourth),
        };

        for entries in standings.values() {
            for entry in entries {
                if let Some(label) = PotLabel::for_position(entry.position) {
                    pots.get_mut(label).teams.push(entry.team.clone());
                }
            }
        }

        pots
    }

    pub fn get(&self, label: PotLabel) -> &Pot {
        match label {
            PotLabel::First => &self.first,
            PotLabel::Second => &self.second,
            PotLabel::Third => &self.third,
            PotLabel::Fourth => &self.fourth,
        }
    }

    fn get_mut(&mut self, label: PotLabel) -> &mut Pot {
        match label {
            PotLabel::First => &mut self.first,
            PotLabel::Second => &mut self.second,
            PotLabel::Third => &mut self.third,
            PotLabel::Fourth => &mut self.fourth,
        }
    }

    pub fn into_vec(self) -> Vec<Pot> {
        vec![self.first, self.second, self.third, self.fourth]
    }

    /// 八強對陣：1 號籤筒對 4 號、2 號對 3 號
    pub fn quarter_final_pairings(&self) -> Vec<KnockoutPairing> {
        let mut pairings = generate_knockout_pairs(&self.first.teams, &self.fourth.teams);
        pairings.extend(generate_knockout_pairs(&self.second.teams, &self.third.teams));
        pairings
    }

    /// 同 [`Pots::quarter_final_pairings`]，但不足四組時直接失敗
    pub fn draw_quarter_finals(&self) -> Result<Vec<KnockoutPairing>> {
        let pairings = self.quarter_final_pairings();

        if pairings.len() < QUARTER_FINAL_PAIRS {
            return Err(TournamentError::InsufficientQualifiers {
                stage: KnockoutStage::QuarterFinal,
                required: QUARTER_FINAL_PAIRS,
                found: pairings.len(),
            });
        }

        Ok(pairings)
    }
}

/// 依序取出 pot_a 的隊伍，在 pot_b 中找第一支不同組的對手；
/// 找不到時才退而接受同組對手。任一籤筒用完即停止。
pub fn generate_knockout_pairs(pot_a: &[Team], pot_b: &[Team]) -> Vec<KnockoutPairing> {
    let mut remaining: Vec<&Team> = pot_b.iter().collect();
    let mut pairs = Vec::with_capacity(pot_a.len().min(pot_b.len()));

    for team_a in pot_a {
        if remaining.is_empty() {
            break;
        }

        let index = remaining
            .iter()
            .position(|team_b| team_b.group != team_a.group)
            .unwrap_or(0);
        let team_b = remaining.remove(index);

        if team_b.group == team_a.group {
            tracing::debug!(
                "No cross-group opponent left for {}, pairing with {} from group {}",
                team_a.name,
                team_b.name,
                team_b.group
            );
        }

        pairs.push(KnockoutPairing::new(team_a.clone(), team_b.clone()));
    }

    pairs
}
