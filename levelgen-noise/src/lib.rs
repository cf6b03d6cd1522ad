//! Deterministic noise and random streams for level generation
//!
//! Architecture:
//! 1. `bit_noise` - SquirrelNoise5 integer hash, folded to 2D/3D/4D
//! 2. `interpolation` - saturating lerp/smoothstep/smootherstep
//! 3. `rng` - sequential streams over the 1D noise, weighted selection
//! 4. `perlin` - 2D gradient noise with hash-derived gradients
//!
//! Everything here is a pure function of its seed and inputs.

pub mod bit_noise;
pub mod interpolation;
pub mod perlin;
pub mod rng;

pub use bit_noise::{
    squirrel_noise5, noise_u32_1d, noise_u32_2d, noise_u32_3d, noise_u32_4d,
    noise_unit_1d, noise_unit_2d, noise_unit_3d, noise_unit_4d, MAX_INT32,
};
pub use interpolation::{lerp, lerp_between, smoothstep, smootherstep, InterpolateFn};
pub use perlin::{Perlin2D, PerlinOptions, Point, SpatialScale, GradientNoiseFn};
pub use rng::{SequentialRng, RngOptions, RngState, Weighted, NoiseFn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoiseError {
    #[error("cannot select from an empty list of choices")]
    EmptyChoices,
}
