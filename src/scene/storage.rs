//! Typed resource storage, kept in registration order

use std::any::{Any, TypeId};

use indexmap::IndexMap;

use super::Resource;
use crate::error::{Error, Result};

/// Object-safe view of a [`Resource`]
trait AnyResource: Any {
    fn name(&self) -> &'static str;
    fn init(&mut self, resources: &mut Resources) -> Result<()>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Resource> AnyResource for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn init(&mut self, resources: &mut Resources) -> Result<()> {
        Resource::init(self, resources)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Slot {
    name: &'static str,
    /// Empty while the resource runs its own `init`
    value: Option<Box<dyn AnyResource>>,
    initialized: bool,
}

#[derive(Default)]
pub struct Resources {
    slots: IndexMap<TypeId, Slot>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource. Registering the same type again replaces it and
    /// keeps its original position.
    pub fn insert<T: Resource>(&mut self, resource: T) {
        let slot = Slot { name: T::NAME, value: Some(Box::new(resource)), initialized: false };
        if self.slots.insert(TypeId::of::<T>(), slot).is_some() {
            tracing::debug!(name = T::NAME, "replaced resource");
        }
    }

    pub fn contains<T: Resource>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resource names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.values().map(|slot| slot.name)
    }

    pub fn get<T: Resource>(&self) -> Result<&T> {
        let slot = self.slots.get(&TypeId::of::<T>()).ok_or(Error::MissingResource(T::NAME))?;
        slot.value
            .as_deref()
            .and_then(|value| value.as_any().downcast_ref::<T>())
            .ok_or(Error::ResourceNotReady(T::NAME))
    }

    pub fn get_mut<T: Resource>(&mut self) -> Result<&mut T> {
        let slot = self.slots.get_mut(&TypeId::of::<T>()).ok_or(Error::MissingResource(T::NAME))?;
        slot.value
            .as_deref_mut()
            .and_then(|value| value.as_any_mut().downcast_mut::<T>())
            .ok_or(Error::ResourceNotReady(T::NAME))
    }

    /// Initialize every resource not yet initialized, in registration order.
    ///
    /// While a resource initializes it is taken out of the storage, so it can
    /// read and mutate the others but not itself. The first failure stops
    /// initialization and is returned.
    pub fn init_all(&mut self) -> Result<()> {
        for index in 0..self.slots.len() {
            let Some((_, slot)) = self.slots.get_index_mut(index) else {
                continue;
            };
            if slot.initialized {
                continue;
            }
            let name = slot.name;
            let Some(mut value) = slot.value.take() else {
                return Err(Error::ResourceNotReady(name));
            };
            tracing::debug!(name, "initializing resource");
            let result = value.init(self);
            if let Some((_, slot)) = self.slots.get_index_mut(index) {
                slot.value = Some(value);
                slot.initialized = result.is_ok();
            }
            result?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
