//! Mobs: spawned on `mobSpawnPoint` cells, wandering at random
//!
//! Both systems draw from the `mobRng` stream, so a mob's look and its walk
//! replay exactly for a given master seed.

use levelgen_noise::{Point, SequentialRng, Weighted};

use crate::error::Result;
use crate::level::CellContentType;
use crate::scene::world::{
    ComponentKind, Facing, MobState, MobTag, SpawnPoint, SpawnpointState, Speed, SpriteName, WorldPosition,
};
use crate::scene::{Level, Rngg, SceneContext, Stage, System};

pub const MOB_RNG: &str = "mobRng";

/// Chance per frame that a walking mob picks a new direction
pub const TURN_CHANCE: f64 = 0.02;

/// Spawn point markers are drawn this far above the tile center
const MARKER_OFFSET_Y: f64 = 8.0;

const MOB_STATES: [(MobState, f64); 2] = [(MobState::Walking, 2.0), (MobState::Standing, 1.0)];
pub(crate) const FACINGS: [(Facing, f64); 2] = [(Facing::Left, 1.0), (Facing::Right, 1.0)];
const MOB_SPRITES: [(&str, f64); 4] = [
    ("bossMoustache", 1.0),
    ("bossLady", 1.0),
    ("zombieLame", 1.0),
    ("zombieHairy", 1.0),
];

const MOB_QUERY: [ComponentKind; 4] = [
    ComponentKind::Mob,
    ComponentKind::MobState,
    ComponentKind::Speed,
    ComponentKind::Facing,
];

pub(crate) fn weighted<T: Copy>(table: &[(T, f64)]) -> Vec<Weighted<T>> {
    table.iter().map(|&(value, weight)| Weighted::new(value, weight)).collect()
}

/// How a freshly spawned mob looks and behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobTraits {
    pub state: MobState,
    pub facing: Facing,
    pub sprite: &'static str,
}

impl MobTraits {
    /// One draw per choice: 2 for state, 2 for facing, 4 for the sprite
    pub fn roll(rng: &mut SequentialRng) -> Result<Self> {
        let state = *rng.select_weighted(&weighted(&MOB_STATES))?;
        let facing = *rng.select_weighted(&weighted(&FACINGS))?;
        let sprite = *rng.select_weighted(&weighted(&MOB_SPRITES))?;
        Ok(Self { state, facing, sprite })
    }
}

/// Startup system: a mob plus a marker on each mob spawn point, an idle
/// spawner on each work spawn point
pub struct SpawnMobs;

impl System for SpawnMobs {
    fn name(&self) -> &'static str {
        "spawnMobs"
    }

    fn stage(&self) -> Stage {
        Stage::Startup
    }

    fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let map = ctx.resources.get::<Level>()?.map()?;
        let spawns: Vec<(CellContentType, Point)> = map
            .cells()
            .flat_map(|(column, row, cell)| {
                let center = map.tile_center(column, row);
                cell.content.iter().map(move |content| (content.kind, center))
            })
            .collect();

        let rng = ctx.resources.get_mut::<Rngg>()?.registry_mut()?.named_rng(MOB_RNG);
        let (mut mobs, mut work) = (0usize, 0usize);
        for (kind, center) in spawns {
            match kind {
                CellContentType::MobSpawnPoint => {
                    let traits = MobTraits::roll(rng)?;
                    ctx.world
                        .spawn()
                        .with(MobTag)
                        .with(traits.state)
                        .with(traits.facing)
                        .with(Speed::default())
                        .with(SpriteName(traits.sprite))
                        .with(WorldPosition(center));
                    ctx.world
                        .spawn()
                        .with(SpawnPoint(CellContentType::MobSpawnPoint))
                        .with(SpriteName("waterfountain"))
                        .with(WorldPosition(Point::new(center.x, center.y - MARKER_OFFSET_Y)));
                    mobs += 1;
                }
                CellContentType::WorkSpawnPoint => {
                    ctx.world
                        .spawn()
                        .with(SpawnPoint(CellContentType::WorkSpawnPoint))
                        .with(SpawnpointState::Idle)
                        .with(SpriteName("xerox"))
                        .with(WorldPosition(center));
                    work += 1;
                }
                CellContentType::None => {}
            }
        }
        tracing::info!(mobs, work_spawn_points = work, "spawned mobs");
        Ok(())
    }
}

fn pick_axis(roll: f64, current: f64) -> f64 {
    if roll < 0.3 {
        -1.0
    } else if roll < 0.6 {
        1.0
    } else {
        current
    }
}

/// Advance one walker's speed by one frame. Shared by mobs and work.
pub fn wander(rng: &mut SequentialRng, speed: &mut Speed) {
    if rng.is_chance(TURN_CHANCE) {
        let x = rng.roll();
        let y = rng.roll();
        speed.x = pick_axis(x, speed.x);
        speed.y = pick_axis(y, speed.y);
    } else {
        // keep going; a stopped axis drifts left or up
        speed.x = if speed.x > 0.0 { 1.0 } else { -1.0 };
        speed.y = if speed.y > 0.0 { 1.0 } else { -1.0 };
    }
}

/// Frame system: walking mobs wander, standing mobs stay put
pub struct MobBehave;

impl System for MobBehave {
    fn name(&self) -> &'static str {
        "mobBehave"
    }

    fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let rng = ctx.resources.get_mut::<Rngg>()?.registry_mut()?.named_rng(MOB_RNG);
        for entity in ctx.world.query_mut(&MOB_QUERY) {
            let Some(&state) = entity.get::<MobState>() else {
                continue;
            };
            let Some(speed) = entity.get_mut::<Speed>() else {
                continue;
            };
            match state {
                MobState::Standing => *speed = Speed::default(),
                MobState::Walking => wander(rng, speed),
            }
            let horizontal = speed.x;
            if let Some(facing) = entity.get_mut::<Facing>() {
                if horizontal > 0.0 {
                    *facing = Facing::Right;
                } else if horizontal < 0.0 {
                    *facing = Facing::Left;
                }
            }
        }
        Ok(())
    }
}
