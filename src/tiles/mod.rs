//! Terrain tiles: sheet rules, neighbor matching and placement

pub mod matcher;
pub mod neighbors;
pub mod placement;
pub mod sheet;
#[cfg(feature = "sheet-image")]
pub mod slice;

pub use matcher::{best_tile_for, score, TileMatch, TileMatcher, NO_MATCH_SCORE};
pub use neighbors::{Direction, NeighborSignature};
pub use placement::{Rect, SourceRect, TilePlacement};
pub use sheet::{CollisionRectangleConfig, SheetCellRule, SheetLayout, Vec2};
#[cfg(feature = "sheet-image")]
pub use slice::SheetImage;
