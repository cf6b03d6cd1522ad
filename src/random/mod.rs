//! RNG registry ("RNGG")
//!
//! Mints sub-seeds for named random streams and named Perlin fields from a
//! single master seed. Each name is resolved once and cached; its first lookup
//! consumes exactly one draw from the master seed stream. The order of first
//! lookups is therefore part of a world's identity: the same master seed and
//! the same lookup order always yield the same streams.

mod seed;

use indexmap::IndexMap;
use levelgen_noise::{Perlin2D, PerlinOptions, RngOptions, SequentialRng};

pub use seed::{nondeterministic_seed, resolve_seed, seed_from_i64, seed_from_query, SeedSource};

#[derive(Debug, Clone)]
pub struct RngRegistry {
    seed: u32,
    seed_generator: SequentialRng,
    seed_draws: u64,
    rngs: IndexMap<String, SequentialRng>,
    perlins: IndexMap<String, Perlin2D>,
}

impl RngRegistry {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            seed_generator: SequentialRng::new(seed),
            seed_draws: 0,
            rngs: IndexMap::new(),
            perlins: IndexMap::new(),
        }
    }

    pub fn from_source(source: SeedSource) -> Self {
        tracing::info!(seed = source.seed(), ?source, "rngg seed");
        Self::new(source.seed())
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Draws taken from the master seed stream so far
    pub fn seed_draws(&self) -> u64 {
        self.seed_draws
    }

    fn next_seed(seed_generator: &mut SequentialRng, seed_draws: &mut u64) -> u32 {
        *seed_draws += 1;
        seed_generator.roll_bits()
    }

    /// An unnamed stream. Only consumes a master draw when `seed` is `None`.
    pub fn new_rng(&mut self, seed: Option<u32>) -> SequentialRng {
        let seed = match seed {
            Some(seed) => seed,
            None => Self::next_seed(&mut self.seed_generator, &mut self.seed_draws),
        };
        SequentialRng::with_options(RngOptions { seed, ..Default::default() })
    }

    /// The stream registered under `name`, created on first use.
    pub fn named_rng(&mut self, name: &str) -> &mut SequentialRng {
        let Self { rngs, seed_generator, seed_draws, .. } = self;
        rngs.entry(name.to_string()).or_insert_with(|| {
            let seed = Self::next_seed(seed_generator, seed_draws);
            tracing::debug!(name, seed, "minted rng stream");
            SequentialRng::new(seed)
        })
    }

    /// The Perlin field registered under `name`, created on first use with
    /// `options` and a minted seed. Later lookups ignore `options`.
    pub fn named_perlin(&mut self, name: &str, options: PerlinOptions) -> &Perlin2D {
        let Self { perlins, seed_generator, seed_draws, .. } = self;
        perlins.entry(name.to_string()).or_insert_with(|| {
            let seed = Self::next_seed(seed_generator, seed_draws);
            tracing::debug!(name, seed, "minted perlin field");
            Perlin2D::with_options(PerlinOptions { seed, ..options })
        })
    }

    /// Names of the streams created so far, in creation order
    pub fn rng_names(&self) -> impl Iterator<Item = &str> {
        self.rngs.keys().map(String::as_str)
    }

    pub fn perlin_names(&self) -> impl Iterator<Item = &str> {
        self.perlins.keys().map(String::as_str)
    }
}
