//! Terrain sheet layout: which sheet cell to draw for which neighborhood

use std::path::Path;

use levelgen_noise::Point;
use serde::{Deserialize, Serialize};

use super::neighbors::Direction;
use super::placement::SourceRect;
use crate::error::{Error, Result};
use crate::level::TileType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Collision box as written in sheet files, relative to the cell's top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionRectangleConfig {
    pub top_left_relative_position: Vec2,
    pub size: Vec2,
}

/// One drawable cell of the terrain sheet and the neighborhood it fits.
///
/// Each neighbor key holds the accepted tile types, most preferred first.
/// A missing key accepts anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetCellRule {
    #[serde(rename = "type")]
    pub tile_type: TileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_left: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_center: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_right: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_left: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid_right: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_left: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_center: Option<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_right: Option<Vec<TileType>>,
    /// Column and row of the cell in the sheet
    pub cell_position: [u32; 2],
    pub cell_width: u32,
    pub cell_height: u32,
    /// Sprite anchor inside the cell
    pub draw_center: Vec2,
    /// Point of the cell aligned with the map tile center; defaults to half
    /// the cell size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_center: Option<Vec2>,
    #[serde(default)]
    pub collision_rectangles: Vec<CollisionRectangleConfig>,
}

impl SheetCellRule {
    /// A rule with no neighbor constraints for a `cell_width` x `cell_height` cell
    pub fn new(tile_type: TileType, cell_position: [u32; 2], cell_width: u32, cell_height: u32) -> Self {
        Self {
            tile_type,
            top_left: None,
            top_center: None,
            top_right: None,
            mid_left: None,
            mid_right: None,
            bot_left: None,
            bot_center: None,
            bot_right: None,
            cell_position,
            cell_width,
            cell_height,
            draw_center: Vec2 { x: cell_width as f64 / 2.0, y: cell_height as f64 / 2.0 },
            tile_center: None,
            collision_rectangles: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, direction: Direction, accepted: Vec<TileType>) -> Self {
        *self.constraint_slot(direction) = Some(accepted);
        self
    }

    fn constraint_slot(&mut self, direction: Direction) -> &mut Option<Vec<TileType>> {
        match direction {
            Direction::TopLeft => &mut self.top_left,
            Direction::TopCenter => &mut self.top_center,
            Direction::TopRight => &mut self.top_right,
            Direction::MidLeft => &mut self.mid_left,
            Direction::MidRight => &mut self.mid_right,
            Direction::BotLeft => &mut self.bot_left,
            Direction::BotCenter => &mut self.bot_center,
            Direction::BotRight => &mut self.bot_right,
        }
    }

    /// Accepted types towards `direction`, or `None` for a wildcard
    pub fn constraint(&self, direction: Direction) -> Option<&[TileType]> {
        let slot = match direction {
            Direction::TopLeft => &self.top_left,
            Direction::TopCenter => &self.top_center,
            Direction::TopRight => &self.top_right,
            Direction::MidLeft => &self.mid_left,
            Direction::MidRight => &self.mid_right,
            Direction::BotLeft => &self.bot_left,
            Direction::BotCenter => &self.bot_center,
            Direction::BotRight => &self.bot_right,
        };
        slot.as_deref()
    }

    /// Pixel rectangle of the cell in the sheet, `None` if it does not fit in
    /// 32-bit pixel coordinates
    pub fn source_rect(&self) -> Option<SourceRect> {
        let x = self.cell_position[0].checked_mul(self.cell_width)?;
        let y = self.cell_position[1].checked_mul(self.cell_height)?;
        x.checked_add(self.cell_width)?;
        y.checked_add(self.cell_height)?;
        Some(SourceRect { x, y, width: self.cell_width, height: self.cell_height })
    }

    pub fn tile_center(&self) -> Point {
        match self.tile_center {
            Some(center) => center.into(),
            None => Point::new(self.cell_width as f64 / 2.0, self.cell_height as f64 / 2.0),
        }
    }
}

/// The `{ "layout": [...] }` sheet file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub layout: Vec<SheetCellRule>,
}

impl SheetLayout {
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let layout = Self::from_json(&text)
            .map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
        layout.validate()?;
        tracing::info!(path = %path.display(), rules = layout.layout.len(), "loaded terrain sheet layout");
        Ok(layout)
    }

    /// Every rule's cell must lie inside 32-bit pixel coordinates
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.layout.iter().enumerate() {
            if rule.source_rect().is_none() {
                return Err(Error::InvalidConfig(format!(
                    "sheet rule {} ({:?}): cell {:?} of {}x{} is out of pixel range",
                    index, rule.tile_type, rule.cell_position, rule.cell_width, rule.cell_height
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = include_str!("../../assets/terrain_sheet.json");

    #[test]
    fn test_parse_rule() {
        let rule: SheetCellRule = serde_json::from_str(r#"{
            "type": "wall",
            "topCenter": ["none", "desk"],
            "botCenter": ["wall"],
            "cellPosition": [2, 1],
            "cellWidth": 16,
            "cellHeight": 24,
            "drawCenter": {"x": 8, "y": 16},
            "collisionRectangles": [
                {"topLeftRelativePosition": {"x": 0, "y": 8}, "size": {"x": 16, "y": 16}}
            ]
        }"#).unwrap();
        assert_eq!(rule.tile_type, TileType::Wall);
        assert_eq!(rule.constraint(Direction::TopCenter), Some(&[TileType::None, TileType::Desk][..]));
        assert_eq!(rule.constraint(Direction::BotCenter), Some(&[TileType::Wall][..]));
        assert_eq!(rule.constraint(Direction::MidLeft), None);
        assert_eq!(rule.cell_position, [2, 1]);
        assert_eq!(rule.tile_center(), Point::new(8.0, 12.0));
        assert_eq!(rule.collision_rectangles.len(), 1);
    }

    #[test]
    fn test_explicit_tile_center() {
        let rule: SheetCellRule = serde_json::from_str(r#"{
            "type": "desk", "cellPosition": [0, 0], "cellWidth": 16, "cellHeight": 32,
            "drawCenter": {"x": 8, "y": 28}, "tileCenter": {"x": 8, "y": 24}
        }"#).unwrap();
        assert_eq!(rule.tile_center(), Point::new(8.0, 24.0));
        assert!(rule.collision_rectangles.is_empty());
    }

    #[test]
    fn test_builder_constraints() {
        let rule = SheetCellRule::new(TileType::Wall, [0, 0], 16, 16)
            .with_constraint(Direction::BotRight, vec![TileType::Edge]);
        assert_eq!(rule.constraint(Direction::BotRight), Some(&[TileType::Edge][..]));
        assert!(Direction::ALL.iter().filter(|d| rule.constraint(**d).is_some()).count() == 1);
    }

    #[test]
    fn test_shipped_sheet_parses() {
        let sheet = SheetLayout::from_json(SHEET).unwrap();
        assert!(!sheet.layout.is_empty());
        for tile in [TileType::Wall, TileType::EdgeWall, TileType::Desk] {
            assert!(sheet.layout.iter().any(|r| r.tile_type == tile), "{:?}", tile);
        }
    }

    #[test]
    fn test_cell_out_of_pixel_range() {
        let mut sheet = SheetLayout { layout: vec![SheetCellRule::new(TileType::Wall, [2, 1], 16, 16)] };
        assert_eq!(sheet.layout[0].source_rect(), Some(SourceRect { x: 32, y: 16, width: 16, height: 16 }));
        assert!(sheet.validate().is_ok());

        sheet.layout.push(SheetCellRule::new(TileType::Desk, [300_000_000, 0], 16, 16));
        assert_eq!(sheet.layout[1].source_rect(), None);
        assert!(matches!(sheet.validate(), Err(Error::InvalidConfig(_))));

        // the right edge must fit too
        let edge = SheetCellRule::new(TileType::Wall, [1, 0], 1 << 31, 16);
        assert_eq!(edge.source_rect(), None);
    }

    #[test]
    fn test_load_rejects_out_of_range_cell() {
        let path = std::env::temp_dir().join(format!("levelgen_bad_sheet_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"layout": [{"type": "wall", "cellPosition": [300000000, 0], "cellWidth": 16,
                "cellHeight": 16, "drawCenter": {"x": 8, "y": 8}}]}"#,
        )
        .unwrap();
        let result = SheetLayout::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SheetLayout::load(Path::new("no/such/sheet.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
