//! Interpolation helpers shared by the noise generators and the map builder.
//!
//! Every function takes `t` relative to an `[edge0, edge1]` interval, rebases
//! it to `[0, 1]` and saturates it before blending `v0` and `v1`.

/// Interpolation between two values for a parameter in `[0, 1]`
pub type InterpolateFn = fn(f64, f64, f64) -> f64;

pub fn clamp(x: f64, lower: f64, upper: f64) -> f64 {
    if x < lower {
        lower
    } else if x > upper {
        upper
    } else {
        x
    }
}

#[inline]
fn rebase(t: f64, edge0: f64, edge1: f64) -> f64 {
    clamp((t - edge0) / (edge1 - edge0), 0.0, 1.0)
}

/// Linear interpolation for `t` in `[0, 1]`
pub fn lerp(v0: f64, v1: f64, t: f64) -> f64 {
    lerp_between(v0, v1, t, 0.0, 1.0)
}

/// Linear interpolation for `t` in `[edge0, edge1]`, saturating outside it
pub fn lerp_between(v0: f64, v1: f64, t: f64, edge0: f64, edge1: f64) -> f64 {
    let t = rebase(t, edge0, edge1);
    (1.0 - t) * v0 + t * v1
}

/// Cubic Hermite blend (`3t^2 - 2t^3`)
pub fn smoothstep(v0: f64, v1: f64, t: f64) -> f64 {
    smoothstep_between(v0, v1, t, 0.0, 1.0)
}

pub fn smoothstep_between(v0: f64, v1: f64, t: f64, edge0: f64, edge1: f64) -> f64 {
    let t = rebase(t, edge0, edge1);
    v0 + (v1 - v0) * t * t * (3.0 - 2.0 * t)
}

/// Quintic blend (`6t^5 - 15t^4 + 10t^3`), the default for gradient noise
pub fn smootherstep(v0: f64, v1: f64, t: f64) -> f64 {
    smootherstep_between(v0, v1, t, 0.0, 1.0)
}

pub fn smootherstep_between(v0: f64, v1: f64, t: f64, edge0: f64, edge1: f64) -> f64 {
    let t = rebase(t, edge0, edge1);
    v0 + (v1 - v0) * t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}
