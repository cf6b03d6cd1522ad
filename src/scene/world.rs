//! Entities and their components

use levelgen_noise::Point;
use serde::Serialize;

use crate::level::CellContentType;
use crate::tiles::{Rect, SourceRect};

pub type EntityId = u32;

/// Anchor position in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldPosition(pub Point);

/// Sprite anchor relative to the sprite's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawPosition(pub Point);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileSprite {
    pub column: usize,
    pub row: usize,
    pub source: SourceRect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collision(pub Vec<Rect>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MobTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MobState {
    Standing,
    Walking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Facing {
    Left,
    Right,
}

/// Direction of travel per axis, each in `-1..=1`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Speed {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteName(pub &'static str);

/// Marks where something spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpawnPoint(pub CellContentType);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpawnpointState {
    Idle,
    Spawning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkState {
    Standing,
    Walking,
    Angry,
    Attacked,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    WorldPosition,
    DrawPosition,
    TileSprite,
    Collision,
    Mob,
    MobState,
    Facing,
    Speed,
    SpriteName,
    SpawnPoint,
    SpawnpointState,
    Work,
    WorkState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Component {
    WorldPosition(WorldPosition),
    DrawPosition(DrawPosition),
    TileSprite(TileSprite),
    Collision(Collision),
    Mob(MobTag),
    MobState(MobState),
    Facing(Facing),
    Speed(Speed),
    SpriteName(SpriteName),
    SpawnPoint(SpawnPoint),
    SpawnpointState(SpawnpointState),
    Work(WorkTag),
    WorkState(WorkState),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::WorldPosition(_) => ComponentKind::WorldPosition,
            Component::DrawPosition(_) => ComponentKind::DrawPosition,
            Component::TileSprite(_) => ComponentKind::TileSprite,
            Component::Collision(_) => ComponentKind::Collision,
            Component::Mob(_) => ComponentKind::Mob,
            Component::MobState(_) => ComponentKind::MobState,
            Component::Facing(_) => ComponentKind::Facing,
            Component::Speed(_) => ComponentKind::Speed,
            Component::SpriteName(_) => ComponentKind::SpriteName,
            Component::SpawnPoint(_) => ComponentKind::SpawnPoint,
            Component::SpawnpointState(_) => ComponentKind::SpawnpointState,
            Component::Work(_) => ComponentKind::Work,
            Component::WorkState(_) => ComponentKind::WorkState,
        }
    }
}

/// Typed access to one [`Component`] variant
pub trait ComponentData: Sized + Into<Component> {
    const KIND: ComponentKind;
    fn from_component(component: &Component) -> Option<&Self>;
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_data {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$variant(value)
                }
            }

            impl ComponentData for $ty {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn from_component(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

component_data! {
    WorldPosition => WorldPosition,
    DrawPosition => DrawPosition,
    TileSprite => TileSprite,
    Collision => Collision,
    Mob => MobTag,
    MobState => MobState,
    Facing => Facing,
    Speed => Speed,
    SpriteName => SpriteName,
    SpawnPoint => SpawnPoint,
    SpawnpointState => SpawnpointState,
    Work => WorkTag,
    WorkState => WorkState,
}

/// An entity holds at most one component of each kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: EntityId,
    components: Vec<Component>,
}

impl Entity {
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.kind() == kind)
    }

    pub fn has_all(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|kind| self.has(*kind))
    }

    pub fn get<T: ComponentData>(&self) -> Option<&T> {
        self.components.iter().find_map(T::from_component)
    }

    pub fn get_mut<T: ComponentData>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::from_component_mut)
    }

    /// Add a component, replacing any existing one of the same kind
    pub fn insert(&mut self, component: impl Into<Component>) {
        let component = component.into();
        match self.components.iter_mut().find(|c| c.kind() == component.kind()) {
            Some(slot) => *slot = component,
            None => self.components.push(component),
        }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity { id, components: Vec::new() });
        let index = self.entities.len() - 1;
        EntityBuilder { entity: &mut self.entities[index] }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities carrying every kind in `kinds`, in spawn order
    pub fn query<'a>(&'a self, kinds: &'a [ComponentKind]) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.has_all(kinds))
    }

    pub fn query_mut<'a>(&'a mut self, kinds: &'a [ComponentKind]) -> impl Iterator<Item = &'a mut Entity> + 'a {
        self.entities.iter_mut().filter(move |e| e.has_all(kinds))
    }

    pub fn count(&self, kinds: &[ComponentKind]) -> usize {
        self.query(kinds).count()
    }
}

pub struct EntityBuilder<'w> {
    entity: &'w mut Entity,
}

impl EntityBuilder<'_> {
    pub fn with(self, component: impl Into<Component>) -> Self {
        self.entity.insert(component);
        self
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_query() {
        let mut world = World::new();
        let a = world
            .spawn()
            .with(WorldPosition(Point::new(1.0, 2.0)))
            .with(MobTag)
            .with(Speed::default())
            .id();
        let b = world.spawn().with(WorldPosition(Point::new(3.0, 4.0))).id();
        assert_ne!(a, b);
        assert_eq!(world.len(), 2);

        let mobs: Vec<_> = world.query(&[ComponentKind::Mob, ComponentKind::WorldPosition]).collect();
        assert_eq!(mobs.len(), 1);
        assert_eq!(mobs[0].id, a);
        assert_eq!(world.count(&[ComponentKind::WorldPosition]), 2);
        assert_eq!(world.count(&[]), 2);
    }

    #[test]
    fn test_typed_access() {
        let mut world = World::new();
        let id = world.spawn().with(Speed { x: 1.0, y: 0.0 }).with(Facing::Right).id();

        for entity in world.query_mut(&[ComponentKind::Speed]) {
            if let Some(speed) = entity.get_mut::<Speed>() {
                speed.x = -1.0;
            }
        }
        let entity = world.entity(id).unwrap();
        assert_eq!(entity.get::<Speed>(), Some(&Speed { x: -1.0, y: 0.0 }));
        assert_eq!(entity.get::<Facing>(), Some(&Facing::Right));
        assert_eq!(entity.get::<MobState>(), None);
    }

    #[test]
    fn test_insert_replaces_same_kind() {
        let mut world = World::new();
        let id = world.spawn().with(Facing::Left).with(Facing::Right).id();
        let entity = world.entity(id).unwrap();
        assert_eq!(entity.components().len(), 1);
        assert_eq!(entity.get::<Facing>(), Some(&Facing::Right));
    }
}
