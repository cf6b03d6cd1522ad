//! Neighbor-aware tile selection
//!
//! Every rule whose type equals the center cell is scored against the
//! cell's eight neighbors:
//! - no constraint in a direction: 0
//! - neighbor accepted: +1, minus `2 * index / len` when it is not the
//!   first (preferred) entry
//! - neighbor rejected: -2
//!
//! Rules must beat [`NO_MATCH_SCORE`]. All rules tied at the best score are
//! returned; callers draw the first.

use ahash::AHashMap;

use super::neighbors::NeighborSignature;
use super::sheet::SheetCellRule;
use crate::level::{LevelMap, TileType};

/// Scores at or below this never select a rule
pub const NO_MATCH_SCORE: f64 = -10.0;

pub fn score(rule: &SheetCellRule, signature: &NeighborSignature) -> f64 {
    signature
        .iter()
        .map(|(direction, neighbor)| {
            let Some(accepted) = rule.constraint(direction) else {
                return 0.0;
            };
            match accepted.iter().position(|t| *t == neighbor) {
                Some(0) => 1.0,
                Some(index) => 1.0 - index as f64 * 2.0 / accepted.len() as f64,
                None => -2.0,
            }
        })
        .sum()
}

/// Best rules among `rules` for a signature, in declaration order
pub fn best_tile_for<'a>(
    signature: &NeighborSignature,
    rules: impl IntoIterator<Item = &'a SheetCellRule>,
) -> Option<Vec<&'a SheetCellRule>> {
    let mut best: Vec<&SheetCellRule> = Vec::new();
    let mut best_score = NO_MATCH_SCORE;
    for rule in rules {
        if rule.tile_type != signature.center {
            continue;
        }
        let s = score(rule, signature);
        if s > best_score {
            best_score = s;
            best.clear();
            best.push(rule);
        } else if s == best_score && !best.is_empty() {
            best.push(rule);
        }
    }
    (!best.is_empty()).then_some(best)
}

/// A matched map cell
#[derive(Debug, Clone)]
pub struct TileMatch<'a> {
    pub column: usize,
    pub row: usize,
    pub rule: &'a SheetCellRule,
    /// Number of rules tied with `rule`, itself included
    pub alternatives: usize,
}

/// Sheet rules indexed by center tile type
#[derive(Debug, Clone, Default)]
pub struct TileMatcher {
    rules: Vec<SheetCellRule>,
    by_type: AHashMap<TileType, Vec<usize>>,
}

impl TileMatcher {
    pub fn new(rules: Vec<SheetCellRule>) -> Self {
        let mut by_type: AHashMap<TileType, Vec<usize>> = AHashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            by_type.entry(rule.tile_type).or_default().push(index);
        }
        Self { rules, by_type }
    }

    pub fn rules(&self) -> &[SheetCellRule] {
        &self.rules
    }

    pub fn rules_for(&self, tile_type: TileType) -> impl Iterator<Item = &SheetCellRule> {
        self.by_type
            .get(&tile_type)
            .into_iter()
            .flatten()
            .map(|&index| &self.rules[index])
    }

    pub fn best_tile_for(&self, signature: &NeighborSignature) -> Option<Vec<&SheetCellRule>> {
        best_tile_for(signature, self.rules_for(signature.center))
    }

    /// Match every drawable cell. `none` cells are skipped silently; cells
    /// with no usable rule are skipped with a warning.
    pub fn match_map(&self, map: &LevelMap) -> Vec<TileMatch<'_>> {
        let mut matches = Vec::new();
        let mut missing = 0usize;
        for (column, row, cell) in map.cells() {
            if cell.cell_type == TileType::None {
                continue;
            }
            let signature = NeighborSignature::at(map.rows(), column, row);
            match self.best_tile_for(&signature) {
                Some(best) => matches.push(TileMatch {
                    column,
                    row,
                    rule: best[0],
                    alternatives: best.len(),
                }),
                None => {
                    missing += 1;
                    tracing::warn!(column, row, tile = ?cell.cell_type, "no sheet cell fits this tile");
                }
            }
        }
        tracing::debug!(matched = matches.len(), missing, "matched level tiles");
        matches
    }
}
