use crate::domain::model::{MatchResult, Side, Team};
use crate::domain::ports::RandomSource;
use crate::utils::error::{Result, TournamentError};

pub const MIN_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 99;
const RANKING_WEIGHT: f64 = 0.02;

/// 依排名差計算 A 隊的勝率
pub fn win_probability(ranking_a: f64, ranking_b: f64) -> f64 {
    0.5 + (ranking_a - ranking_b) * RANKING_WEIGHT
}

/// 模擬單場比賽。
///
/// 兩隊比分各自在 [50, 99] 均勻抽樣；勝率只記錄在結果中，不影響抽樣。
/// 平手時隨機挑一邊加一分，因此結果一定分出勝負。
pub fn simulate_match<R: RandomSource + ?Sized>(
    team_a: &Team,
    team_b: &Team,
    rng: &mut R,
) -> Result<MatchResult> {
    let (ranking_a, ranking_b) = match (team_a.ranking, team_b.ranking) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            let missing = [team_a, team_b]
                .iter()
                .filter(|team| team.ranking.is_none())
                .map(|team| team.name.clone())
                .collect();
            tracing::error!("❌ Team missing ranking: {:?} / {:?}", team_a, team_b);
            return Err(TournamentError::MissingRanking {
                team_a: team_a.name.clone(),
                team_b: team_b.name.clone(),
                missing,
            });
        }
    };

    let team_a_win_probability = win_probability(ranking_a, ranking_b);
    let mut team_a_score = rng.next_score(MIN_SCORE, MAX_SCORE);
    let mut team_b_score = rng.next_score(MIN_SCORE, MAX_SCORE);

    // 避免平手
    if team_a_score == team_b_score {
        if rng.next_bool() {
            team_a_score += 1;
        } else {
            team_b_score += 1;
        }
    }

    let winner = if team_a_score > team_b_score {
        Side::A
    } else {
        Side::B
    };

    tracing::debug!(
        "{} {}:{} {} (p={:.2})",
        team_a.name,
        team_a_score,
        team_b_score,
        team_b.name,
        team_a_win_probability
    );

    Ok(MatchResult {
        team_a: team_a.clone(),
        team_b: team_b.clone(),
        team_a_score,
        team_b_score,
        winner,
        team_a_win_probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::{RngSource, ScriptedSource};

    fn team(name: &str, ranking: Option<f64>) -> Team {
        Team::new(name, ranking, "A")
    }

    #[test]
    fn test_higher_score_wins() {
        let serbia = team("Serbia", Some(4.0));
        let brazil = team("Brazil", Some(12.0));
        let mut rng = ScriptedSource::scores([71, 88]);

        let result = simulate_match(&serbia, &brazil, &mut rng).unwrap();

        assert_eq!(result.team_a_score, 71);
        assert_eq!(result.team_b_score, 88);
        assert_eq!(result.winner(), &brazil);
        assert_eq!(result.loser(), &serbia);
    }

    #[test]
    fn test_tie_is_broken_for_team_a() {
        let mut rng = ScriptedSource::new([80, 80], [true]);
        let result = simulate_match(&team("A1", Some(1.0)), &team("A2", Some(2.0)), &mut rng).unwrap();

        assert_eq!((result.team_a_score, result.team_b_score), (81, 80));
        assert_eq!(result.winner, Side::A);
    }

    #[test]
    fn test_tie_is_broken_for_team_b() {
        let mut rng = ScriptedSource::new([99, 99], [false]);
        let result = simulate_match(&team("A1", Some(1.0)), &team("A2", Some(2.0)), &mut rng).unwrap();

        assert_eq!((result.team_a_score, result.team_b_score), (99, 100));
        assert_eq!(result.winner, Side::B);
    }

    #[test]
    fn test_scores_never_equal_and_stay_in_range() {
        let mut rng = RngSource::seeded(7);
        let a = team("A1", Some(3.0));
        let b = team("A2", Some(30.0));

        for _ in 0..500 {
            let result = simulate_match(&a, &b, &mut rng).unwrap();
            assert_ne!(result.team_a_score, result.team_b_score);
            assert!(result.team_a_score >= MIN_SCORE && result.team_a_score <= MAX_SCORE + 1);
            assert!(result.team_b_score >= MIN_SCORE && result.team_b_score <= MAX_SCORE + 1);
        }
    }

    #[test]
    fn test_missing_ranking_fails_in_both_positions() {
        let ranked = team("Ranked", Some(5.0));
        let unranked = team("Unranked", None);
        let mut rng = ScriptedSource::scores([60, 70]);

        for (a, b) in [(&unranked, &ranked), (&ranked, &unranked)] {
            match simulate_match(a, b, &mut rng) {
                Err(TournamentError::MissingRanking { missing, .. }) => {
                    assert_eq!(missing, vec!["Unranked".to_string()]);
                }
                other => panic!("expected MissingRanking, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_win_probability_follows_ranking_difference() {
        assert!((win_probability(10.0, 10.0) - 0.5).abs() < f64::EPSILON);
        assert!((win_probability(12.0, 2.0) - 0.7).abs() < 1e-9);
        assert!((win_probability(2.0, 12.0) - 0.3).abs() < 1e-9);
        assert!((win_probability(7.5, 2.5) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_probability_does_not_bias_scores() {
        // 相同的抽樣序列，排名差再大比分也一樣
        let mut first = ScriptedSource::scores([66, 77]);
        let mut second = ScriptedSource::scores([66, 77]);

        let even = simulate_match(&team("X", Some(1.0)), &team("Y", Some(1.0)), &mut first).unwrap();
        let lopsided = simulate_match(&team("X", Some(1.0)), &team("Y", Some(80.0)), &mut second).unwrap();

        assert_eq!(even.team_a_score, lopsided.team_a_score);
        assert_eq!(even.team_b_score, lopsided.team_b_score);
        assert_ne!(even.team_a_win_probability, lopsided.team_a_win_probability);
    }
}
