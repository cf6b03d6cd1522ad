//! Scene: resources, systems and entities
//!
//! A scene owns typed [`Resources`], a [`World`] of entities and a list of
//! systems. `start` initializes resources in registration order and runs the
//! startup systems once; `tick` runs the frame systems.

pub mod builtin;
mod storage;
pub mod world;

pub use builtin::{default_scene, Level, Rngg, SpawnTiles, TerrainSheet};
pub use storage::Resources;
pub use world::{Component, ComponentData, ComponentKind, Entity, EntityBuilder, EntityId, World};

use std::any::Any;

use crate::error::{Error, Result};

/// Shared state owned by the scene, initialized once before any system runs
pub trait Resource: Any {
    const NAME: &'static str;

    /// Called once, after every resource registered earlier has initialized
    fn init(&mut self, _resources: &mut Resources) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Once, when the scene starts
    Startup,
    /// Every tick
    Frame,
}

pub struct SceneContext<'a> {
    pub resources: &'a mut Resources,
    pub world: &'a mut World,
    pub frame: u64,
}

pub trait System {
    fn name(&self) -> &'static str;

    fn stage(&self) -> Stage {
        Stage::Frame
    }

    fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()>;
}

#[derive(Default)]
pub struct Scene {
    resources: Resources,
    world: World,
    systems: Vec<Box<dyn System>>,
    started: bool,
    frame: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_resource<T: Resource>(&mut self, resource: T) -> &mut Self {
        self.resources.insert(resource);
        self
    }

    pub fn register_system(&mut self, system: impl System + 'static) -> &mut Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn resource<T: Resource>(&self) -> Result<&T> {
        self.resources.get::<T>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn run_stage(&mut self, stage: Stage) -> Result<()> {
        let mut ctx = SceneContext {
            resources: &mut self.resources,
            world: &mut self.world,
            frame: self.frame,
        };
        for system in self.systems.iter_mut().filter(|s| s.stage() == stage) {
            tracing::trace!(system = system.name(), ?stage, "running system");
            system.run(&mut ctx)?;
        }
        Ok(())
    }

    /// Initialize resources and run startup systems. A second call does nothing.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.resources.init_all()?;
        self.run_stage(Stage::Startup)?;
        self.started = true;
        tracing::info!(
            resources = self.resources.len(),
            systems = self.systems.len(),
            entities = self.world.len(),
            "scene started"
        );
        Ok(())
    }

    pub fn tick(&mut self) -> Result<()> {
        if !self.started {
            return Err(Error::NotStarted);
        }
        self.run_stage(Stage::Frame)?;
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::world::{MobTag, Speed};

    #[derive(Default)]
    struct Clock {
        ticks: u64,
    }

    impl Resource for Clock {
        const NAME: &'static str = "clock";
    }

    struct SpawnOne;

    impl System for SpawnOne {
        fn name(&self) -> &'static str {
            "spawnOne"
        }

        fn stage(&self) -> Stage {
            Stage::Startup
        }

        fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
            ctx.world.spawn().with(MobTag).with(Speed::default());
            Ok(())
        }
    }

    struct CountTicks;

    impl System for CountTicks {
        fn name(&self) -> &'static str {
            "countTicks"
        }

        fn run(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
            ctx.resources.get_mut::<Clock>()?.ticks += 1;
            Ok(())
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut scene = Scene::new();
        scene.register_resource(Clock::default()).register_system(SpawnOne).register_system(CountTicks);
        assert!(matches!(scene.tick(), Err(Error::NotStarted)));

        scene.start().unwrap();
        assert_eq!(scene.world().len(), 1);
        assert_eq!(scene.resource::<Clock>().unwrap().ticks, 0);

        scene.start().unwrap();
        assert_eq!(scene.world().len(), 1);

        scene.tick().unwrap();
        scene.tick().unwrap();
        assert_eq!(scene.resource::<Clock>().unwrap().ticks, 2);
        assert_eq!(scene.frame(), 2);
    }

    #[test]
    fn test_system_error_propagates() {
        let mut scene = Scene::new();
        scene.register_system(CountTicks);
        scene.start().unwrap();
        assert!(matches!(scene.tick(), Err(Error::MissingResource("clock"))));
    }
}
