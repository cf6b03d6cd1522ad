//! Procedural level generation
//!
//! Deterministic tile maps from a single master seed: a registry mints named
//! random streams and Perlin fields, the level map classifies rescaled noise
//! into tile types, and the tile matcher picks sheet artwork for each cell
//! from its eight neighbors. A small scene layer wires these together as
//! resources and systems, and spawns tiles, mobs and work as entities.

pub mod config;
pub mod error;
pub mod level;
pub mod mobs;
pub mod random;
pub mod scene;
pub mod tiles;
pub mod work;
pub use levelgen_noise as noise;

pub use config::{LevelConfig, MapGenerationConfig, SceneConfig, TerrainSheetConfig};
pub use error::{Error, Result};
pub use level::{
    CellContent, CellContentType, Grid, LevelMap, MapCell, MapGenerator,
    ThresholdRule, Thresholds, TileType,
};
pub use mobs::{MobBehave, MobTraits, SpawnMobs};
pub use random::{resolve_seed, RngRegistry, SeedSource};
pub use scene::{default_scene, Resource, Resources, Scene, SceneContext, Stage, System, World};
pub use tiles::{NeighborSignature, SheetCellRule, SheetLayout, TileMatch, TileMatcher, TilePlacement};
pub use work::{SpawnpointBehave, WorkBehave, WorkTraits};
