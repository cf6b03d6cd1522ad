//! Level map: tile types, threshold classification and grid generation

mod classifier;
mod generator;

use serde::{Deserialize, Serialize};

pub use classifier::{classify, classify_matched, ThresholdRule, Thresholds};
pub use generator::{generate_grid, GenerationStats, LevelMap, MapGenerator};

/// Map tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileType {
    #[default]
    None,
    Wall,
    EdgeWall,
    /// Outside the map; only appears in neighbor signatures
    Edge,
    Desk,
}

impl TileType {
    pub fn id(self) -> u8 {
        match self {
            TileType::None => 0,
            TileType::Wall => 1,
            TileType::EdgeWall => 2,
            TileType::Edge => 3,
            TileType::Desk => 4,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            TileType::None => '.',
            TileType::Wall => '#',
            TileType::EdgeWall => '@',
            TileType::Edge => ' ',
            TileType::Desk => 'D',
        }
    }
}

/// What a cell spawns besides its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellContentType {
    #[default]
    None,
    MobSpawnPoint,
    WorkSpawnPoint,
}

impl CellContentType {
    pub fn id(self) -> u8 {
        match self {
            CellContentType::None => 0,
            CellContentType::MobSpawnPoint => 1,
            CellContentType::WorkSpawnPoint => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellContent {
    #[serde(rename = "type")]
    pub kind: CellContentType,
}

impl CellContent {
    pub fn new(kind: CellContentType) -> Self {
        Self { kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCell {
    pub cell_type: TileType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<CellContent>,
}

impl MapCell {
    pub fn new(cell_type: TileType) -> Self {
        Self { cell_type, content: Vec::new() }
    }
}

/// `rows[y][x]`
pub type Grid = Vec<Vec<MapCell>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_type_names() {
        let json = serde_json::to_string(&[TileType::EdgeWall, TileType::None]).unwrap();
        assert_eq!(json, r#"["edgeWall","none"]"#);
        let parsed: TileType = serde_json::from_str(r#""desk""#).unwrap();
        assert_eq!(parsed, TileType::Desk);
    }

    #[test]
    fn test_map_cell_json() {
        let cell: MapCell = serde_json::from_str(
            r#"{"cellType":"none","content":[{"type":"mobSpawnPoint"}]}"#,
        ).unwrap();
        assert_eq!(cell.cell_type, TileType::None);
        assert_eq!(cell.content, vec![CellContent::new(CellContentType::MobSpawnPoint)]);

        let bare = serde_json::to_string(&MapCell::new(TileType::Wall)).unwrap();
        assert_eq!(bare, r#"{"cellType":"wall"}"#);
    }
}
