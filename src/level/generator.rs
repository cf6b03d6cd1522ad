use levelgen_noise::{lerp_between, Perlin2D, Point};

use super::{classify, classify_matched, Grid, MapCell, Thresholds, TileType};
use crate::config::LevelConfig;

/// Builds a grid by sampling a Perlin field per cell
pub struct MapGenerator<'a> {
    perlin: &'a Perlin2D,
    thresholds: &'a Thresholds,
    amplitude: f64,
}

/// Counters collected while generating a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub interior: usize,
    pub unclassified: usize,
}

impl<'a> MapGenerator<'a> {
    pub fn new(perlin: &'a Perlin2D, thresholds: &'a Thresholds, amplitude: f64) -> Self {
        Self { perlin, thresholds, amplitude }
    }

    /// Noise at a cell, rescaled from the field's theoretical range into
    /// `[0, amplitude]`
    pub fn scaled_noise_at(&self, column: usize, row: usize) -> f64 {
        let theoretical = self.perlin.theoretical_amplitude();
        let noise = self.perlin.value_at(Point::new(column as f64, row as f64));
        lerp_between(0.0, self.amplitude, noise, -theoretical, theoretical)
    }

    fn is_border(column: usize, row: usize, width: usize, height: usize) -> bool {
        row == 0 || column == 0 || row + 1 == height || column + 1 == width
    }

    /// Border cells are always edge walls and never sample noise.
    pub fn cell_at(&self, column: usize, row: usize, width: usize, height: usize) -> MapCell {
        if Self::is_border(column, row, width, height) {
            return MapCell::new(TileType::EdgeWall);
        }
        classify(self.scaled_noise_at(column, row), self.thresholds)
    }

    pub fn generate(&self, width: usize, height: usize) -> Grid {
        self.generate_with_stats(width, height).0
    }

    pub fn generate_with_stats(&self, width: usize, height: usize) -> (Grid, GenerationStats) {
        let mut stats = GenerationStats::default();
        let grid = (0..height)
            .map(|row| {
                (0..width)
                    .map(|column| {
                        if Self::is_border(column, row, width, height) {
                            return MapCell::new(TileType::EdgeWall);
                        }
                        stats.interior += 1;
                        let value = self.scaled_noise_at(column, row);
                        let (cell, matched) = classify_matched(value, self.thresholds);
                        if !matched {
                            stats.unclassified += 1;
                        }
                        cell
                    })
                    .collect()
            })
            .collect();
        (grid, stats)
    }
}

pub fn generate_grid(
    width: usize,
    height: usize,
    perlin: &Perlin2D,
    thresholds: &Thresholds,
    amplitude: f64,
) -> Grid {
    MapGenerator::new(perlin, thresholds, amplitude).generate(width, height)
}

/// A generated level, fixed for the level's lifetime
#[derive(Debug, Clone)]
pub struct LevelMap {
    grid: Grid,
    grid_width: usize,
    grid_height: usize,
    tile_width: u32,
    tile_height: u32,
    unclassified: usize,
}

impl LevelMap {
    pub fn generate(config: &LevelConfig, perlin: &Perlin2D) -> Self {
        let generation = &config.map_generation;
        let generator = MapGenerator::new(perlin, &generation.thresholds, generation.amplitude);
        let (grid, stats) = generator.generate_with_stats(config.grid_width, config.grid_height);
        if stats.unclassified > 0 {
            tracing::warn!(
                unclassified = stats.unclassified,
                interior = stats.interior,
                "cells above every threshold defaulted to none"
            );
        }
        tracing::info!(
            width = config.grid_width,
            height = config.grid_height,
            seed = perlin.seed(),
            "generated level map"
        );
        Self {
            grid,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            unclassified: stats.unclassified,
        }
    }

    /// Wrap an existing grid. Rows are expected to share one width.
    pub fn from_grid(grid: Grid, tile_width: u32, tile_height: u32) -> Self {
        let grid_height = grid.len();
        let grid_width = grid.first().map_or(0, Vec::len);
        Self { grid, grid_width, grid_height, tile_width, tile_height, unclassified: 0 }
    }

    pub fn rows(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Width in pixels
    pub fn width(&self) -> u64 {
        self.grid_width as u64 * self.tile_width as u64
    }

    /// Height in pixels
    pub fn height(&self) -> u64 {
        self.grid_height as u64 * self.tile_height as u64
    }

    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&MapCell> {
        self.grid.get(row).and_then(|r| r.get(column))
    }

    /// Cell under a pixel position. Non-finite positions are off the map.
    pub fn cell_at_position(&self, x: f64, y: f64) -> Option<&MapCell> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let column = (x / self.tile_width as f64).floor();
        let row = (y / self.tile_height as f64).floor();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        self.cell(column as usize, row as usize)
    }

    /// Pixel center of a cell, rounded down like the sprite grid
    pub fn tile_center(&self, column: usize, row: usize) -> Point {
        Point::new(
            (column as u64 * self.tile_width as u64 + (self.tile_width / 2) as u64) as f64,
            (row as u64 * self.tile_height as u64 + (self.tile_height / 2) as u64) as f64,
        )
    }

    /// Cells in row-major order with their coordinates
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &MapCell)> {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(column, cell)| (column, row, cell))
        })
    }

    /// CRC32 over dimensions, tile types and contents
    pub fn checksum(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&(self.grid_width as u32).to_le_bytes());
        hasher.update(&(self.grid_height as u32).to_le_bytes());
        for (_, _, cell) in self.cells() {
            hasher.update(&[cell.cell_type.id()]);
            hasher.update(&(cell.content.len() as u32).to_le_bytes());
            for content in &cell.content {
                hasher.update(&[content.kind.id()]);
            }
        }
        hasher.finalize()
    }

    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.grid_width + 1) * self.grid_height);
        for row in &self.grid {
            for cell in row {
                let glyph = if cell.content.is_empty() { cell.cell_type.glyph() } else { '*' };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
