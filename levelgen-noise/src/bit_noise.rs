//! Raw bit-noise hashing (SquirrelNoise5)
//!
//! Stateless, random-access hash of an integer position and a seed into 32
//! scrambled bits. Every other generator in this crate is built on it, so the
//! constants and the operation order are fixed: changing either changes every
//! generated level.
//!
//! Multi-dimensional variants fold their coordinates into one index with large
//! primes before hashing. Distinct coordinates may collide after folding; that
//! is accepted.

const BIT_NOISE1: u32 = 0xd2a8_0a3f;
const BIT_NOISE2: u32 = 0xa884_f197;
const BIT_NOISE3: u32 = 0x6c73_6f4b;
const BIT_NOISE4: u32 = 0xb79f_3abb;
const BIT_NOISE5: u32 = 0x1b56_c4f5;

/// Multiplier folding the Y coordinate
pub const PRIME1: i32 = 198_491_317;
/// Multiplier folding the Z coordinate
pub const PRIME2: i32 = 6_542_989;
/// Multiplier folding the T coordinate
pub const PRIME3: i32 = 357_239;

/// Largest signed 32-bit value, used as the float normalization divisor
pub const MAX_INT32: u32 = i32::MAX as u32;

/// Hash `index` with `seed` into 32 well-scrambled bits.
///
/// All arithmetic wraps at 32 bits and every shift is logical.
#[inline]
pub fn squirrel_noise5(index: i32, seed: u32) -> u32 {
    let mut bits = index as u32;
    bits = bits.wrapping_mul(BIT_NOISE1);
    bits = bits.wrapping_add(seed);
    bits ^= bits >> 9;
    bits = bits.wrapping_add(BIT_NOISE2);
    bits ^= bits >> 11;
    bits = bits.wrapping_mul(BIT_NOISE3);
    bits ^= bits >> 13;
    bits = bits.wrapping_add(BIT_NOISE4);
    bits ^= bits >> 15;
    bits = bits.wrapping_mul(BIT_NOISE5);
    bits ^= bits >> 17;
    bits
}

#[inline]
fn fold_2d(x: i32, y: i32) -> i32 {
    x.wrapping_add(PRIME1.wrapping_mul(y))
}

#[inline]
fn fold_3d(x: i32, y: i32, z: i32) -> i32 {
    fold_2d(x, y).wrapping_add(PRIME2.wrapping_mul(z))
}

#[inline]
fn fold_4d(x: i32, y: i32, z: i32, t: i32) -> i32 {
    fold_3d(x, y, z).wrapping_add(PRIME3.wrapping_mul(t))
}

/// Map raw bits into `[0, 1]`.
///
/// Only the low 31 bits are kept so the quotient never exceeds 1.0; the top
/// value `MAX_INT32` maps to exactly 1.0.
#[inline]
pub fn bits_to_unit(bits: u32) -> f64 {
    (bits & MAX_INT32) as f64 / MAX_INT32 as f64
}

#[inline]
pub fn noise_u32_1d(index: i32, seed: u32) -> u32 {
    squirrel_noise5(index, seed)
}

#[inline]
pub fn noise_u32_2d(x: i32, y: i32, seed: u32) -> u32 {
    squirrel_noise5(fold_2d(x, y), seed)
}

#[inline]
pub fn noise_u32_3d(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    squirrel_noise5(fold_3d(x, y, z), seed)
}

#[inline]
pub fn noise_u32_4d(x: i32, y: i32, z: i32, t: i32, seed: u32) -> u32 {
    squirrel_noise5(fold_4d(x, y, z, t), seed)
}

#[inline]
pub fn noise_unit_1d(index: i32, seed: u32) -> f64 {
    bits_to_unit(noise_u32_1d(index, seed))
}

#[inline]
pub fn noise_unit_2d(x: i32, y: i32, seed: u32) -> f64 {
    bits_to_unit(noise_u32_2d(x, y, seed))
}

#[inline]
pub fn noise_unit_3d(x: i32, y: i32, z: i32, seed: u32) -> f64 {
    bits_to_unit(noise_u32_3d(x, y, z, seed))
}

#[inline]
pub fn noise_unit_4d(x: i32, y: i32, z: i32, t: i32, seed: u32) -> f64 {
    bits_to_unit(noise_u32_4d(x, y, z, t, seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        for index in [-1_000_000, -1, 0, 1, 42, i32::MAX, i32::MIN] {
            for seed in [0u32, 1, 42, u32::MAX] {
                assert_eq!(squirrel_noise5(index, seed), squirrel_noise5(index, seed));
            }
        }
    }

    #[test]
    fn test_seed_changes_output() {
        let a: Vec<u32> = (0..64).map(|i| squirrel_noise5(i, 1)).collect();
        let b: Vec<u32> = (0..64).map(|i| squirrel_noise5(i, 2)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bits_are_balanced() {
        const SAMPLES: i32 = 20_000;
        let mut ones = [0u32; 32];
        for i in 0..SAMPLES {
            let bits = squirrel_noise5(i, 7);
            for (bit, count) in ones.iter_mut().enumerate() {
                *count += (bits >> bit) & 1;
            }
        }
        for (bit, &count) in ones.iter().enumerate() {
            let ratio = count as f64 / SAMPLES as f64;
            assert!((ratio - 0.5).abs() < 0.03, "bit {} set {:.3} of the time", bit, ratio);
        }
    }

    #[test]
    fn test_no_short_range_correlation() {
        let values: Vec<f64> = (0..10_000).map(|i| noise_unit_1d(i, 3)).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean {}", mean);

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        let covariance: f64 = values.windows(2).map(|w| (w[0] - mean) * (w[1] - mean)).sum();
        let correlation = covariance / variance;
        assert!(correlation.abs() < 0.05, "lag-1 correlation {}", correlation);
    }

    #[test]
    fn test_unit_range() {
        assert_eq!(bits_to_unit(0), 0.0);
        assert_eq!(bits_to_unit(MAX_INT32), 1.0);
        assert_eq!(bits_to_unit(u32::MAX), 1.0);
        for i in -500..500 {
            let v = noise_unit_2d(i, -i, 99);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_multi_dimensional_folding() {
        // y = 0 folds to the plain index
        assert_eq!(noise_u32_2d(17, 0, 5), noise_u32_1d(17, 5));
        assert_eq!(noise_u32_3d(17, 3, 0, 5), noise_u32_2d(17, 3, 5));
        assert_eq!(noise_u32_4d(17, 3, 2, 0, 5), noise_u32_3d(17, 3, 2, 5));
        assert_ne!(noise_u32_2d(1, 2, 5), noise_u32_2d(2, 1, 5));
        // Folding wraps instead of overflowing
        let _ = noise_u32_4d(i32::MAX, i32::MAX, i32::MAX, i32::MAX, 0);
    }
}
