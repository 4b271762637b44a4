use crate::core::match_sim::simulate_match;
use crate::domain::model::{KnockoutPairing, Medals, RoundResult};
use crate::domain::ports::RandomSource;
use crate::utils::error::{KnockoutStage, Result, TournamentError};

pub const SEMI_FINAL_QUALIFIERS: usize = 4;
pub const FINAL_QUALIFIERS: usize = 2;

/// 淘汰賽各輪結果與獎牌
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnockoutOutcome {
    pub quarter_finals: RoundResult,
    pub semi_finals: RoundResult,
    pub third_place: RoundResult,
    pub final_match: RoundResult,
    pub medals: Medals,
}

/// 依對陣順序模擬一輪；缺一邊的對陣直接略過
pub fn simulate_knockout_stage<R: RandomSource + ?Sized>(
    pairings: &[KnockoutPairing],
    rng: &mut R,
) -> Result<RoundResult> {
    let mut round = RoundResult::default();

    for pairing in pairings {
        let (team_a, team_b) = match (&pairing.team_a, &pairing.team_b) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                tracing::debug!("Skipping incomplete pairing: {:?}", pairing);
                continue;
            }
        };

        let result = simulate_match(team_a, team_b, rng).inspect_err(|_| {
            tracing::error!(
                "❌ Error simulating knockout match between {} and {}",
                team_a.name,
                team_b.name
            );
        })?;

        round.winners.push(result.winner().clone());
        round.losers.push(result.loser().clone());
        round.results.push(result.to_record(None));
    }

    Ok(round)
}

fn require(stage: KnockoutStage, required: usize, found: usize) -> Result<()> {
    if found < required {
        tracing::error!(
            "❌ Not enough teams qualified for the {} ({} of {})",
            stage,
            found,
            required
        );
        return Err(TournamentError::InsufficientQualifiers {
            stage,
            required,
            found,
        });
    }
    Ok(())
}

/// 八強 -> 四強 -> 決賽與季軍戰，最後頒發獎牌
pub fn run_knockout<R: RandomSource + ?Sized>(
    quarter_final_pairings: &[KnockoutPairing],
    rng: &mut R,
) -> Result<KnockoutOutcome> {
    let quarter_finals = simulate_knockout_stage(quarter_final_pairings, rng)?;
    require(
        KnockoutStage::SemiFinal,
        SEMI_FINAL_QUALIFIERS,
        quarter_finals.winners.len(),
    )?;

    let qf_winners = &quarter_finals.winners;
    let semi_final_pairings = [
        KnockoutPairing::from_slots(qf_winners.first(), qf_winners.get(1)),
        KnockoutPairing::from_slots(qf_winners.get(2), qf_winners.get(3)),
    ];
    let semi_finals = simulate_knockout_stage(&semi_final_pairings, rng)?;
    require(
        KnockoutStage::Final,
        FINAL_QUALIFIERS,
        semi_finals.winners.len(),
    )?;

    let final_pairing = [KnockoutPairing::from_slots(
        semi_finals.winners.first(),
        semi_finals.winners.get(1),
    )];
    let third_place_pairing = [KnockoutPairing::from_slots(
        semi_finals.losers.first(),
        semi_finals.losers.get(1),
    )];

    let final_match = simulate_knockout_stage(&final_pairing, rng)?;
    let third_place = simulate_knockout_stage(&third_place_pairing, rng)?;

    let medals = award_medals(&final_match, &third_place);

    Ok(KnockoutOutcome {
        quarter_finals,
        semi_finals,
        third_place,
        final_match,
        medals,
    })
}

/// 該輪沒有產生勝者時不頒發對應獎牌
pub fn award_medals(final_match: &RoundResult, third_place: &RoundResult) -> Medals {
    let (gold, silver) = match final_match.winners.first() {
        Some(winner) => (Some(winner.clone()), final_match.losers.first().cloned()),
        None => (None, None),
    };

    Medals {
        gold,
        silver,
        bronze: third_place.winners.first().cloned(),
    }
}
