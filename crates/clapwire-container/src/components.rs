//! Type-keyed component storage.
//!
//! [`Components`] is what a provider hands back to the container: one value
//! per output type, keyed by [`TypeId`]. Values are stored behind [`Arc`] so
//! the container can hand out shared references to every consumer without
//! requiring `Clone` on the component itself.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ContainerError;

type Component = Arc<dyn Any + Send + Sync>;

/// Type-safe map of components produced by a provider.
///
/// # Example
///
/// ```rust
/// use clapwire_container::Components;
///
/// struct Database { url: String }
/// struct Verbose(bool);
///
/// let components = Components::new()
///     .with(Database { url: "postgres://localhost".into() })
///     .with(Verbose(true));
///
/// assert_eq!(components.get::<Database>().unwrap().url, "postgres://localhost");
/// assert!(components.get_required::<Verbose>()?.0);
/// # Ok::<(), clapwire_container::ContainerError>(())
/// ```
#[derive(Default, Clone)]
pub struct Components {
    map: HashMap<TypeId, Component>,
}

impl Components {
    /// Creates an empty component map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component, builder style.
    pub fn with<T: Send + Sync + 'static>(mut self, val: T) -> Self {
        self.insert(val);
        self
    }

    /// Inserts a component.
    ///
    /// If a component of this type already exists, it is replaced and returned.
    pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) -> Option<Arc<T>> {
        self.insert_arc(Arc::new(val))
    }

    /// Inserts an already shared component.
    pub fn insert_arc<T: Send + Sync + 'static>(&mut self, val: Arc<T>) -> Option<Arc<T>> {
        self.map
            .insert(TypeId::of::<T>(), val)
            .and_then(|old| old.downcast().ok())
    }

    /// Gets a reference to a component of the specified type.
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|component| component.downcast_ref())
    }

    /// Gets a shared handle to a component of the specified type.
    pub fn get_arc<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.map
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|component| component.downcast().ok())
    }

    /// Gets a required reference to a component of the specified type.
    pub fn get_required<T: Send + Sync + 'static>(&self) -> Result<&T, ContainerError> {
        self.get::<T>().ok_or(ContainerError::Missing {
            type_name: std::any::type_name::<T>(),
        })
    }

    /// Removes a component of the specified type, returning it if it existed.
    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<Arc<T>> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|component| component.downcast().ok())
    }

    /// Returns `true` if a component of the specified type is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.contains_id(TypeId::of::<T>())
    }

    pub(crate) fn contains_id(&self, id: TypeId) -> bool {
        self.map.contains_key(&id)
    }

    /// Returns the number of components stored.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no components are stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Components")
            .field("len", &self.map.len())
            .finish_non_exhaustive()
    }
}
