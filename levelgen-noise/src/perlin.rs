//! 2D gradient (Perlin) noise
//!
//! Gradients are not stored: each lattice corner derives its unit gradient
//! from the 2D bit noise, so a field is a pure function of its seed and
//! options. Output is not clamped; it stays within
//! `[-theoretical_amplitude, theoretical_amplitude]` and callers rescale it
//! themselves.

use crate::bit_noise::noise_unit_2d;
use crate::interpolation::{lerp_between, smootherstep, InterpolateFn};

/// Maps a lattice corner and a seed to a value in `[0, 1]`
pub type GradientNoiseFn = fn(i32, i32, u32) -> f64;

const DIMENSIONS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Stretch applied to sample positions before the lattice lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialScale {
    pub x: f64,
    pub y: f64,
}

impl Default for SpatialScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PerlinOptions {
    pub seed: u32,
    pub spatial_scale: SpatialScale,
    pub interpolate: InterpolateFn,
    pub gradient_noise: GradientNoiseFn,
}

impl Default for PerlinOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            spatial_scale: SpatialScale::default(),
            interpolate: smootherstep,
            gradient_noise: noise_unit_2d,
        }
    }
}

impl PerlinOptions {
    pub fn with_scale(mut self, x: f64, y: f64) -> Self {
        self.spatial_scale = SpatialScale { x, y };
        self
    }

    pub fn with_interpolation(mut self, interpolate: InterpolateFn) -> Self {
        self.interpolate = interpolate;
        self
    }

    pub fn with_gradient_noise(mut self, gradient_noise: GradientNoiseFn) -> Self {
        self.gradient_noise = gradient_noise;
        self
    }
}

/// Integer cell of the lattice surrounding a sample
struct LatticeCell {
    left: i32,
    right: i32,
    bottom: i32,
    top: i32,
}

#[derive(Debug, Clone)]
pub struct Perlin2D {
    seed: u32,
    spatial_scale: SpatialScale,
    interpolate: InterpolateFn,
    gradient_noise: GradientNoiseFn,
    theoretical_amplitude: f64,
}

impl Perlin2D {
    pub fn new(seed: u32) -> Self {
        Self::with_options(PerlinOptions { seed, ..Default::default() })
    }

    pub fn with_options(options: PerlinOptions) -> Self {
        Self {
            seed: options.seed,
            spatial_scale: options.spatial_scale,
            interpolate: options.interpolate,
            gradient_noise: options.gradient_noise,
            // sqrt(N/4) bounds N-dimensional Perlin noise
            theoretical_amplitude: (DIMENSIONS / 4.0).sqrt(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn spatial_scale(&self) -> SpatialScale {
        self.spatial_scale
    }

    pub fn theoretical_amplitude(&self) -> f64 {
        self.theoretical_amplitude
    }

    /// Noise at `position` after spatial scaling
    pub fn value_at(&self, position: Point) -> f64 {
        self.raw_at(Point {
            x: position.x / self.spatial_scale.x,
            y: position.y / self.spatial_scale.y,
        })
    }

    /// Noise at `position` rescaled from the theoretical range into `[-1, 1]`
    pub fn value_saturated_at(&self, position: Point) -> f64 {
        self.value_in_range(position, -1.0, 1.0)
    }

    /// Noise at `position` rescaled from the theoretical range into `[low, high]`
    pub fn value_in_range(&self, position: Point, low: f64, high: f64) -> f64 {
        lerp_between(
            low,
            high,
            self.value_at(position),
            -self.theoretical_amplitude,
            self.theoretical_amplitude,
        )
    }

    /// Unscaled noise: interpolate the bottom pair, then the top pair, then
    /// between the two.
    pub fn raw_at(&self, position: Point) -> f64 {
        let cell = Self::lattice_cell(position);
        let weight_x = position.x - cell.left as f64;
        let weight_y = position.y - cell.bottom as f64;

        let bottom_left = self.dot_with_gradient(cell.left, cell.bottom, position);
        let bottom_right = self.dot_with_gradient(cell.right, cell.bottom, position);
        let bottom = (self.interpolate)(bottom_left, bottom_right, weight_x);

        let top_left = self.dot_with_gradient(cell.left, cell.top, position);
        let top_right = self.dot_with_gradient(cell.right, cell.top, position);
        let top = (self.interpolate)(top_left, top_right, weight_x);

        (self.interpolate)(bottom, top, weight_y)
    }

    fn lattice_cell(position: Point) -> LatticeCell {
        let left = position.x.floor() as i32;
        let bottom = position.y.floor() as i32;
        LatticeCell {
            left,
            right: left.wrapping_add(1),
            bottom,
            top: bottom.wrapping_add(1),
        }
    }

    /// Pseudo-random unit gradient at a lattice corner
    pub fn gradient_at(&self, i: i32, j: i32) -> Point {
        let angle = std::f64::consts::TAU * (self.gradient_noise)(i, j, self.seed);
        Point { x: angle.sin(), y: angle.cos() }
    }

    fn dot_with_gradient(&self, i: i32, j: i32, position: Point) -> f64 {
        let gradient = self.gradient_at(i, j);
        let dx = position.x - i as f64;
        let dy = position.y - j as f64;
        dx * gradient.x + dy * gradient.y
    }
}
