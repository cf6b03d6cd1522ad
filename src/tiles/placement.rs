use levelgen_noise::Point;
use serde::Serialize;

use super::matcher::TileMatch;
use super::sheet::SheetCellRule;
use crate::level::LevelMap;

/// Pixel rectangle inside the sheet image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned box given by its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub center: Point,
    pub size: Point,
}

impl Rect {
    pub fn min(&self) -> Point {
        Point::new(self.center.x - self.size.x / 2.0, self.center.y - self.size.y / 2.0)
    }

    pub fn max(&self) -> Point {
        Point::new(self.center.x + self.size.x / 2.0, self.center.y + self.size.y / 2.0)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a0, a1, b0, b1) = (self.min(), self.max(), other.min(), other.max());
        a0.x < b1.x && b0.x < a1.x && a0.y < b1.y && b0.y < a1.y
    }
}

/// Where and what to draw for one matched tile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TilePlacement {
    pub column: usize,
    pub row: usize,
    /// Sprite anchor in world pixels
    pub world_position: Point,
    pub draw_center: Point,
    pub source: SourceRect,
    /// Collision boxes in world pixels
    pub collision: Vec<Rect>,
}

impl TilePlacement {
    pub fn new(rule: &SheetCellRule, column: usize, row: usize, tile_center: Point) -> Self {
        let anchor = rule.tile_center();
        let draw_center: Point = rule.draw_center.into();
        let world_position = Point::new(
            tile_center.x - anchor.x + draw_center.x,
            tile_center.y - anchor.y + draw_center.y,
        );
        let collision = rule
            .collision_rectangles
            .iter()
            .map(|r| {
                // relative to the anchor first, then into world space
                let relative_x = r.top_left_relative_position.x + r.size.x / 2.0 - draw_center.x;
                let relative_y = r.top_left_relative_position.y + r.size.y / 2.0 - draw_center.y;
                Rect {
                    center: Point::new(world_position.x + relative_x, world_position.y + relative_y),
                    size: r.size.into(),
                }
            })
            .collect();
        Self {
            column,
            row,
            world_position,
            draw_center,
            // validated layouts never saturate
            source: rule.source_rect().unwrap_or(SourceRect {
                x: rule.cell_position[0].saturating_mul(rule.cell_width),
                y: rule.cell_position[1].saturating_mul(rule.cell_height),
                width: rule.cell_width,
                height: rule.cell_height,
            }),
            collision,
        }
    }

    pub fn from_match(map: &LevelMap, tile: &TileMatch<'_>) -> Self {
        Self::new(tile.rule, tile.column, tile.row, map.tile_center(tile.column, tile.row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::TileType;
    use crate::tiles::sheet::{CollisionRectangleConfig, Vec2};

    #[test]
    fn test_default_anchor_lands_on_tile_center() {
        let rule = SheetCellRule::new(TileType::Wall, [3, 2], 16, 16);
        let placement = TilePlacement::new(&rule, 4, 1, Point::new(72.0, 24.0));
        assert_eq!(placement.world_position, Point::new(72.0, 24.0));
        assert_eq!(placement.source, SourceRect { x: 48, y: 32, width: 16, height: 16 });
    }

    #[test]
    fn test_tall_cell_offset() {
        let mut rule = SheetCellRule::new(TileType::Desk, [0, 1], 16, 32);
        rule.draw_center = Vec2 { x: 8.0, y: 28.0 };
        rule.tile_center = Some(Vec2 { x: 8.0, y: 24.0 });
        rule.collision_rectangles.push(CollisionRectangleConfig {
            top_left_relative_position: Vec2 { x: 0.0, y: 16.0 },
            size: Vec2 { x: 16.0, y: 16.0 },
        });
        let placement = TilePlacement::new(&rule, 0, 0, Point::new(8.0, 8.0));
        assert_eq!(placement.world_position, Point::new(8.0, 12.0));
        assert_eq!(placement.source.y, 32);

        // box center (8, 24) in the cell, anchor (8, 28): 4px above the anchor
        let rect = placement.collision[0];
        assert_eq!(rect.center, Point::new(8.0, 8.0));
        assert_eq!(rect.min(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_unvalidated_rule_does_not_overflow() {
        let rule = SheetCellRule::new(TileType::Wall, [300_000_000, 0], 16, 16);
        let placement = TilePlacement::new(&rule, 0, 0, Point::new(8.0, 8.0));
        assert_eq!(placement.source.x, u32::MAX);
        assert_eq!(placement.source.y, 0);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect { center: Point::new(0.0, 0.0), size: Point::new(2.0, 2.0) };
        let b = Rect { center: Point::new(1.5, 0.0), size: Point::new(2.0, 2.0) };
        let c = Rect { center: Point::new(2.0, 0.0), size: Point::new(2.0, 2.0) };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
