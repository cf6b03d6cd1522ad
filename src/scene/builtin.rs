//! Built-in resources and the tile spawning system

use levelgen_noise::PerlinOptions;

use super::world::{Collision, DrawPosition, TileSprite, WorldPosition};
use super::{Resource, Resources, Scene, SceneContext, Stage, System};
use crate::config::{LevelConfig, SceneConfig, TerrainSheetConfig};
use crate::error::{Error, Result};
use crate::level::LevelMap;
use crate::mobs::{MobBehave, SpawnMobs};
use crate::random::{resolve_seed, RngRegistry, SeedSource};
use crate::tiles::{SheetLayout, TileMatcher, TilePlacement};
use crate::work::{SpawnpointBehave, WorkBehave};

/// Registry name of the field the level map samples
pub const MAP_PERLIN: &str = "mapPerlin";

/// The RNG registry, seeded at init from the query string, the configured
/// seed, or entropy
#[derive(Debug, Default)]
pub struct Rngg {
    query: Option<String>,
    config_seed: Option<i64>,
    registry: Option<RngRegistry>,
}

impl Rngg {
    pub fn new(query: Option<String>, config_seed: Option<i64>) -> Self {
        Self { query, config_seed, registry: None }
    }

    /// Already seeded; init keeps this registry
    pub fn with_seed(seed: u32) -> Self {
        Self { registry: Some(RngRegistry::from_source(SeedSource::Config(seed))), ..Default::default() }
    }

    pub fn registry(&self) -> Result<&RngRegistry> {
        self.registry.as_ref().ok_or(Error::ResourceNotReady(Self::NAME))
    }

    pub fn registry_mut(&mut self) -> Result<&mut RngRegistry> {
        self.registry.as_mut().ok_or(Error::ResourceNotReady(Self::NAME))
    }
}

impl Resource for Rngg {
    const NAME: &'static str = "rngg";

    fn init(&mut self, _resources: &mut Resources) -> Result<()> {
        if self.registry.is_none() {
            let source = resolve_seed(self.query.as_deref(), self.config_seed);
            self.registry = Some(RngRegistry::from_source(source));
        }
        Ok(())
    }
}

/// The level map, generated at init from the `mapPerlin` field
#[derive(Debug)]
pub struct Level {
    config: LevelConfig,
    map: Option<LevelMap>,
}

impl Level {
    pub fn new(config: LevelConfig) -> Self {
        Self { config, map: None }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn map(&self) -> Result<&LevelMap> {
        self.map.as_ref().ok_or(Error::ResourceNotReady(Self::NAME))
    }
}

impl Resource for Level {
    const NAME: &'static str = "levelMap";

    fn init(&mut self, resources: &mut Resources) -> Result<()> {
        self.config.validate()?;
        let generation = &self.config.map_generation;
        let options = PerlinOptions::default().with_scale(generation.scale_x, generation.scale_y);
        let perlin = resources.get_mut::<Rngg>()?.registry_mut()?.named_perlin(MAP_PERLIN, options);
        self.map = Some(LevelMap::generate(&self.config, perlin));
        Ok(())
    }
}

#[derive(Debug)]
enum SheetSource {
    File(TerrainSheetConfig),
    Layout(SheetLayout),
}

/// Sheet rules, and the sheet image when decoding is enabled
#[derive(Debug)]
pub struct TerrainSheet {
    source: SheetSource,
    matcher: Option<TileMatcher>,
    #[cfg(feature = "sheet-image")]
    image: Option<crate::tiles::SheetImage>,
}

impl TerrainSheet {
    pub fn from_config(config: TerrainSheetConfig) -> Self {
        Self::with_source(SheetSource::File(config))
    }

    pub fn from_layout(layout: SheetLayout) -> Self {
        Self::with_source(SheetSource::Layout(layout))
    }

    fn with_source(source: SheetSource) -> Self {
        Self {
            source,
            matcher: None,
            #[cfg(feature = "sheet-image")]
            image: None,
        }
    }

    pub fn matcher(&self) -> Result<&TileMatcher> {
        self.matcher.as_ref().ok_or(Error::ResourceNotReady(Self::NAME))
    }

    #[cfg(feature = "sheet-image")]
    pub fn image(&self) -> Option<&crate::tiles::SheetImage> {
        self.image.as_ref()
    }
}

impl Resource for TerrainSheet {
    const NAME: &'static str = "terrainSheet";

    fn init(&mut self, _resources: &mut Resources) -> Result<()> {
        let layout = match &self.source {
            SheetSource::File(config) => SheetLayout::load(&config.sheet_config)?,
            SheetSource::Layout(layout) => {
                layout.validate()?;
                layout.clone()
            }
        };
        #[cfg(feature = "sheet-image")]
        if let SheetSource::File(TerrainSheetConfig { sheet_image: Some(path), .. }) = &self.source {
            self.image = Some(crate::tiles::SheetImage::open(path)?);
        }
        self.matcher = Some(TileMatcher::new(layout.layout));
        Ok(())
    }
}

/// Spawns one entity per drawable map cell
pub struct SpawnTiles;

impl System for SpawnTiles {
    fn name(&self) -> &'static str {
        "spawnTiles"
    }

    fn stage(&self) -> Stage {
        Stage::Startup
    }

    fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let resources = &*ctx.resources;
        let map = resources.get::<Level>()?.map()?;
        let matcher = resources.get::<TerrainSheet>()?.matcher()?;
        let matches = matcher.match_map(map);
        for tile in &matches {
            let placement = TilePlacement::from_match(map, tile);
            ctx.world
                .spawn()
                .with(TileSprite { column: placement.column, row: placement.row, source: placement.source })
                .with(WorldPosition(placement.world_position))
                .with(DrawPosition(placement.draw_center))
                .with(Collision(placement.collision));
        }
        tracing::info!(tiles = matches.len(), "spawned tiles");
        Ok(())
    }
}

/// Resources and systems for a level scene, in initialization order:
/// `rngg`, `levelMap`, `terrainSheet` (when configured), then tile and mob
/// spawning, mob behaviour, spawner behaviour and work behaviour.
pub fn default_scene(config: &SceneConfig, query: Option<&str>) -> Scene {
    let mut scene = Scene::new();
    scene
        .register_resource(Rngg::new(query.map(str::to_string), config.seed))
        .register_resource(Level::new(config.level.clone()));
    if let Some(sheet) = &config.terrain_sheet {
        scene.register_resource(TerrainSheet::from_config(sheet.clone())).register_system(SpawnTiles);
    }
    scene
        .register_system(SpawnMobs)
        .register_system(MobBehave)
        .register_system(SpawnpointBehave)
        .register_system(WorkBehave);
    scene
}
