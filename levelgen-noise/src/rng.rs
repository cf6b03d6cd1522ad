//! Sequential noise-based RNG
//!
//! A stream is just a cursor into the 1D bit noise: `roll()` samples the noise
//! at the cursor and advances it by one. Two streams with the same seed and
//! cursor always yield the same values, and a stream can be rewound to replay
//! its sequence.

use crate::bit_noise::{noise_u32_1d, noise_unit_1d};
use crate::NoiseError;

/// 1D noise sampled by a stream: `(position, seed) -> value`
pub type NoiseFn = fn(i32, u32) -> f64;

/// Construction options for [`SequentialRng`]
#[derive(Debug, Clone, Copy)]
pub struct RngOptions {
    pub position: i32,
    pub seed: u32,
    pub noise: NoiseFn,
}

impl Default for RngOptions {
    fn default() -> Self {
        Self {
            position: 0,
            seed: 0,
            noise: noise_unit_1d,
        }
    }
}

/// Snapshot of a stream's cursor and seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RngState {
    pub position: i32,
    pub seed: u32,
}

/// A choice for [`SequentialRng::select_weighted`]
#[derive(Debug, Clone, PartialEq)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }
}

#[derive(Debug, Clone)]
pub struct SequentialRng {
    seed: u32,
    initial_position: i32,
    position: i32,
    noise: NoiseFn,
}

impl SequentialRng {
    pub fn new(seed: u32) -> Self {
        Self::with_options(RngOptions { seed, ..Default::default() })
    }

    pub fn with_options(options: RngOptions) -> Self {
        Self {
            seed: options.seed,
            initial_position: options.position,
            position: options.position,
            noise: options.noise,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn state(&self) -> RngState {
        RngState { position: self.position, seed: self.seed }
    }

    /// Rewind to the initial position, or make `position` the new initial
    /// position and rewind there.
    pub fn reset_position(&mut self, position: Option<i32>) {
        if let Some(position) = position {
            self.initial_position = position;
        }
        self.position = self.initial_position;
    }

    /// Sample the configured noise at the cursor, then advance it.
    pub fn roll(&mut self) -> f64 {
        let value = (self.noise)(self.position, self.seed);
        self.position = self.position.wrapping_add(1);
        value
    }

    /// Raw 32-bit hash at the cursor, then advance it.
    ///
    /// Always reads the bit noise directly, whatever noise function the
    /// stream was configured with.
    pub fn roll_bits(&mut self) -> u32 {
        let bits = noise_u32_1d(self.position, self.seed);
        self.position = self.position.wrapping_add(1);
        bits
    }

    /// One draw: `roll() < probability`
    pub fn is_chance(&mut self, probability: f64) -> bool {
        self.roll() < probability
    }

    /// Pick the choice with the highest `roll() * weight`.
    ///
    /// One draw is consumed per choice, in order. Ties keep the earliest
    /// choice. This is a max-of-scaled-draws scheme, not cumulative-weight
    /// sampling, so it does not pick values in exact proportion to weight.
    pub fn select_weighted<'a, T>(&mut self, choices: &'a [Weighted<T>]) -> Result<&'a T, NoiseError> {
        let mut best: Option<(&'a T, f64)> = None;
        for choice in choices {
            let score = self.roll() * choice.weight;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((&choice.value, score)),
            }
        }
        best.map(|(value, _)| value).ok_or(NoiseError::EmptyChoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        for seed in [0u32, 1, 42, 0xdead_beef] {
            let mut a = SequentialRng::new(seed);
            let mut b = SequentialRng::new(seed);
            let seq_a: Vec<f64> = (0..100).map(|_| a.roll()).collect();
            let seq_b: Vec<f64> = (0..100).map(|_| b.roll()).collect();
            assert_eq!(seq_a, seq_b);
        }
    }

    #[test]
    fn test_roll_reads_noise_at_cursor() {
        let mut rng = SequentialRng::with_options(RngOptions { position: 10, seed: 5, ..Default::default() });
        assert_eq!(rng.roll(), noise_unit_1d(10, 5));
        assert_eq!(rng.roll(), noise_unit_1d(11, 5));
        assert_eq!(rng.position(), 12);
    }

    #[test]
    fn test_reset_replays_sequence() {
        let mut rng = SequentialRng::with_options(RngOptions { position: 3, seed: 9, ..Default::default() });
        let first: Vec<f64> = (0..20).map(|_| rng.roll()).collect();
        rng.reset_position(None);
        assert_eq!(rng.position(), 3);
        let replay: Vec<f64> = (0..20).map(|_| rng.roll()).collect();
        assert_eq!(first, replay);
    }

    #[test]
    fn test_reset_rebases_initial_position() {
        let mut rng = SequentialRng::new(9);
        rng.reset_position(Some(50));
        let a = rng.roll();
        rng.roll();
        rng.reset_position(None);
        assert_eq!(rng.position(), 50);
        assert_eq!(rng.roll(), a);
    }

    #[test]
    fn test_roll_bits_advances_cursor() {
        let mut rng = SequentialRng::new(77);
        assert_eq!(rng.roll_bits(), noise_u32_1d(0, 77));
        assert_eq!(rng.state(), RngState { position: 1, seed: 77 });
    }

    #[test]
    fn test_is_chance_bounds() {
        let mut rng = SequentialRng::new(1);
        assert!((0..100).all(|_| !rng.is_chance(0.0)));
        // roll() can reach exactly 1.0, so anything above it always passes
        assert!((0..100).all(|_| rng.is_chance(1.01)));
    }

    #[test]
    fn test_is_chance_compares_one_draw() {
        let mut rng = SequentialRng::new(31);
        let mut replay = SequentialRng::new(31);
        for p in [0.0005, 0.02, 0.25, 0.5, 0.75, 0.99] {
            for _ in 0..200 {
                let before = rng.position();
                assert_eq!(rng.is_chance(p), replay.roll() < p);
                assert_eq!(rng.position(), before + 1);
            }
        }
        assert_eq!(rng.state(), replay.state());
    }

    #[test]
    fn test_select_weighted_empty() {
        let mut rng = SequentialRng::new(1);
        let choices: Vec<Weighted<u8>> = Vec::new();
        assert!(matches!(rng.select_weighted(&choices), Err(NoiseError::EmptyChoices)));
        assert_eq!(rng.position(), 0);
    }

    #[test]
    fn test_select_weighted_is_max_of_scaled_draws() {
        let choices = [Weighted::new("a", 2.0), Weighted::new("b", 1.0), Weighted::new("c", 1.0)];
        let mut rng = SequentialRng::new(123);
        let mut replay = SequentialRng::new(123);
        for _ in 0..50 {
            let picked = *rng.select_weighted(&choices).unwrap();
            let scores: Vec<f64> = choices.iter().map(|c| replay.roll() * c.weight).collect();
            let mut expected = 0;
            for (i, &score) in scores.iter().enumerate() {
                if score > scores[expected] {
                    expected = i;
                }
            }
            assert_eq!(picked, choices[expected].value);
        }
        assert_eq!(rng.position(), 150);
    }

    #[test]
    fn test_select_weighted_ties_keep_first() {
        let choices = [Weighted::new(1, 0.0), Weighted::new(2, 0.0)];
        let mut rng = SequentialRng::new(5);
        assert_eq!(*rng.select_weighted(&choices).unwrap(), 1);
    }

    #[test]
    fn test_select_weighted_favours_heavier_choice() {
        let choices = [Weighted::new(true, 2.0), Weighted::new(false, 1.0)];
        let mut rng = SequentialRng::new(2024);
        let heavy = (0..2000).filter(|_| *rng.select_weighted(&choices).unwrap()).count();
        // P(2u > v) = 3/4 for independent uniforms
        assert!(heavy > 1350 && heavy < 1650, "heavy picked {} times", heavy);
    }
}
