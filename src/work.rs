//! Work: office items spawned by the copiers on `workSpawnPoint` cells
//!
//! Spawners and the work they produce draw from the `workRng` stream, kept
//! apart from `mobRng` so adding work never shifts how mobs look or walk.

use levelgen_noise::{Point, SequentialRng};

use crate::error::Result;
use crate::mobs::{wander, weighted, FACINGS};
use crate::scene::world::{
    ComponentKind, Facing, SpawnpointState, Speed, SpriteName, WorkState, WorkTag, World, WorldPosition,
};
use crate::scene::{Rngg, SceneContext, System};

pub const WORK_RNG: &str = "workRng";

/// Chance per frame that an idle spawner starts spawning
pub const SPAWN_CHANCE: f64 = 0.0005;

const WORK_SPRITES: [(&str, f64); 4] = [
    ("stapler", 1.0),
    ("scissors", 1.0),
    ("mouse", 1.0),
    ("folderfly", 1.0),
];

const SPAWNER_QUERY: [ComponentKind; 2] = [ComponentKind::SpawnpointState, ComponentKind::WorldPosition];

const WORK_QUERY: [ComponentKind; 4] = [
    ComponentKind::Work,
    ComponentKind::WorkState,
    ComponentKind::Speed,
    ComponentKind::Facing,
];

/// How a freshly spawned piece of work looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkTraits {
    pub facing: Facing,
    pub sprite: &'static str,
}

impl WorkTraits {
    /// One draw per choice: 2 for facing, 4 for the sprite
    pub fn roll(rng: &mut SequentialRng) -> Result<Self> {
        let facing = *rng.select_weighted(&weighted(&FACINGS))?;
        let sprite = *rng.select_weighted(&weighted(&WORK_SPRITES))?;
        Ok(Self { facing, sprite })
    }
}

fn spawn_work(world: &mut World, position: Point, traits: WorkTraits) {
    world
        .spawn()
        .with(WorkTag)
        .with(WorkState::Walking)
        .with(WorldPosition(position))
        .with(Speed::default())
        .with(traits.facing)
        .with(SpriteName(traits.sprite));
}

/// Frame system: idle spawners start spawning at random; a spawning spawner
/// releases one piece of work on its next frame and goes idle again
pub struct SpawnpointBehave;

impl System for SpawnpointBehave {
    fn name(&self) -> &'static str {
        "spawnpointBehave"
    }

    fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let rng = ctx.resources.get_mut::<Rngg>()?.registry_mut()?.named_rng(WORK_RNG);
        let mut released = Vec::new();
        for entity in ctx.world.query_mut(&SPAWNER_QUERY) {
            let Some(&WorldPosition(position)) = entity.get::<WorldPosition>() else {
                continue;
            };
            let Some(state) = entity.get_mut::<SpawnpointState>() else {
                continue;
            };
            match *state {
                SpawnpointState::Idle => {
                    if rng.is_chance(SPAWN_CHANCE) {
                        *state = SpawnpointState::Spawning;
                    }
                }
                SpawnpointState::Spawning => {
                    // traits are rolled in spawner order, before anything spawns
                    released.push((position, WorkTraits::roll(rng)?));
                    *state = SpawnpointState::Idle;
                }
            }
        }
        for (position, traits) in released {
            tracing::debug!(x = position.x, y = position.y, sprite = traits.sprite, "work spawned");
            spawn_work(ctx.world, position, traits);
        }
        Ok(())
    }
}

/// Frame system: work wanders like a walking mob, and stops while attacked
pub struct WorkBehave;

impl System for WorkBehave {
    fn name(&self) -> &'static str {
        "workBehave"
    }

    fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let rng = ctx.resources.get_mut::<Rngg>()?.registry_mut()?.named_rng(WORK_RNG);
        for entity in ctx.world.query_mut(&WORK_QUERY) {
            let Some(&state) = entity.get::<WorkState>() else {
                continue;
            };
            let Some(speed) = entity.get_mut::<Speed>() else {
                continue;
            };
            if state == WorkState::Attacked {
                *speed = Speed::default();
                continue;
            }
            wander(rng, speed);
            let facing = if speed.x > 0.0 { Facing::Right } else { Facing::Left };
            if let Some(current) = entity.get_mut::<Facing>() {
                *current = facing;
            }
        }
        Ok(())
    }
}
