use crate::domain::ports::RandomSource;
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// 以 `rand::Rng` 為底的亂數來源
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    /// 行程共用的亂數產生器，不保證可重現
    pub fn thread_local() -> Self {
        Self::new(rand::rng())
    }
}

impl RngSource<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_score(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }

    fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// 依序回傳預先給定的數值，用完後循環使用
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    scores: VecDeque<u32>,
    flips: VecDeque<bool>,
}

impl ScriptedSource {
    pub fn new(scores: impl IntoIterator<Item = u32>, flips: impl IntoIterator<Item = bool>) -> Self {
        Self {
            scores: scores.into_iter().collect(),
            flips: flips.into_iter().collect(),
        }
    }

    pub fn scores(scores: impl IntoIterator<Item = u32>) -> Self {
        Self::new(scores, std::iter::empty())
    }
}

impl RandomSource for ScriptedSource {
    fn next_score(&mut self, low: u32, high: u32) -> u32 {
        match self.scores.pop_front() {
            Some(score) => {
                self.scores.push_back(score);
                score.clamp(low, high)
            }
            None => low,
        }
    }

    fn next_bool(&mut self) -> bool {
        match self.flips.pop_front() {
            Some(flip) => {
                self.flips.push_back(flip);
                flip
            }
            None => false,
        }
    }
}
