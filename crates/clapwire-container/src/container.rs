//! Container assembly and component resolution.

use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::components::Components;
use crate::error::ContainerError;
use crate::module::{Module, Provider};

type Outcome = Result<Arc<Components>, ContainerError>;

struct Slot {
    provider: Provider,
    outcome: Mutex<Option<Outcome>>,
}

/// Builder for constructing a [`Container`].
///
/// Modules are registered in order. Nothing is invoked while building: the
/// build step only validates the registrations.
///
/// # Example
///
/// ```rust
/// use clapwire_container::{Container, Module};
///
/// struct Config { debug: bool }
///
/// let container = Container::builder()
///     .module(Module::supply(Config { debug: true }))
///     .build()?;
///
/// assert!(container.resolve::<Config>()?.debug);
/// # Ok::<(), clapwire_container::ContainerError>(())
/// ```
#[derive(Debug, Default)]
pub struct ContainerBuilder {
    modules: Vec<Module>,
}

impl ContainerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module.
    pub fn module(mut self, module: impl Into<Module>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Adds a provider.
    pub fn provide(self, provider: Provider) -> Self {
        self.module(provider)
    }

    /// Adds a ready-made value as a component.
    pub fn supply<T: Send + Sync + 'static>(self, value: T) -> Self {
        self.module(Module::supply(value))
    }

    /// Validates the registrations and builds the container.
    ///
    /// Every module error and every output type provided twice is collected.
    /// A single problem is returned as is; several are wrapped in
    /// [`ContainerError::Startup`].
    pub fn build(self) -> Result<Container, ContainerError> {
        let mut registry = Registry::default();
        for module in self.modules {
            registry.add(module);
        }

        let Registry {
            slots,
            index,
            mut errors,
        } = registry;

        match errors.len() {
            0 => {
                tracing::debug!(providers = slots.len(), "container built");
                Ok(Container { slots, index })
            }
            1 => Err(errors.remove(0)),
            _ => Err(ContainerError::Startup(errors)),
        }
    }
}

#[derive(Default)]
struct Registry {
    slots: Vec<Slot>,
    index: HashMap<TypeId, usize>,
    errors: Vec<ContainerError>,
}

impl Registry {
    fn add(&mut self, module: Module) {
        match module {
            Module::Provide(provider) => self.register(provider),
            Module::Error(err) => self.errors.push(ContainerError::Module(err)),
            Module::Group(modules) => {
                for module in modules {
                    self.add(module);
                }
            }
        }
    }

    fn register(&mut self, provider: Provider) {
        let mut accepted = true;
        for output in provider.outputs() {
            if let Some(&existing) = self.index.get(&output.id) {
                self.errors.push(ContainerError::Duplicate {
                    type_name: output.type_name,
                    provider: provider.name().to_string(),
                    existing: self.slots[existing].provider.name().to_string(),
                });
                accepted = false;
            }
        }
        if !accepted {
            return;
        }

        tracing::trace!(provider = provider.name(), "registering provider");
        let slot = self.slots.len();
        for output in provider.outputs() {
            self.index.insert(output.id, slot);
        }
        self.slots.push(Slot {
            provider,
            outcome: Mutex::new(None),
        });
    }
}

/// A set of lazily built components.
///
/// Each provider runs at most once. Its outcome, success or failure, is
/// cached and shared by every later resolution of any of its outputs.
/// The container is `Send + Sync`; concurrent first resolutions of the same
/// provider wait for each other, other providers are unaffected.
pub struct Container {
    slots: Vec<Slot>,
    index: HashMap<TypeId, usize>,
}

impl Container {
    /// Creates a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Resolves a component, invoking its provider if needed.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
        self.resolver().resolve()
    }

    /// Resolves a component that may not have a provider.
    ///
    /// Returns `Ok(None)` when nothing provides `T`. Provider failures are
    /// still errors.
    pub fn optional<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, ContainerError> {
        self.resolver().optional()
    }

    /// Returns `true` if some provider declares `T` as an output.
    pub fn provides<T: 'static>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver {
            container: self,
            path: Vec::new(),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field(
                "providers",
                &self
                    .slots
                    .iter()
                    .map(|slot| slot.provider.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Dependency access handed to provider factories.
///
/// Tracks the chain of providers currently being built so that a provider
/// depending on its own output fails with [`ContainerError::Cycle`] instead
/// of deadlocking.
pub struct Resolver<'c> {
    container: &'c Container,
    path: Vec<usize>,
}

impl Resolver<'_> {
    /// Resolves a required dependency.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, ContainerError> {
        let Some(&slot) = self.container.index.get(&TypeId::of::<T>()) else {
            return Err(ContainerError::Missing {
                type_name: type_name::<T>(),
            });
        };

        let components = self.run(slot)?;
        components
            .get_arc::<T>()
            .ok_or_else(|| ContainerError::MissingOutput {
                provider: self.container.slots[slot].provider.name().to_string(),
                type_name: type_name::<T>(),
            })
    }

    /// Resolves an optional dependency; `Ok(None)` when nothing provides `T`.
    pub fn optional<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, ContainerError> {
        if !self.container.provides::<T>() {
            return Ok(None);
        }
        self.resolve::<T>().map(Some)
    }

    fn run(&self, slot: usize) -> Outcome {
        let entry = &self.container.slots[slot];

        if self.path.contains(&slot) {
            let path = self
                .path
                .iter()
                .chain(std::iter::once(&slot))
                .map(|&i| self.container.slots[i].provider.name())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ContainerError::Cycle { path });
        }

        // A factory that panicked leaves the slot empty; the next caller retries it.
        let mut outcome = entry.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(done) = outcome.as_ref() {
            return done.clone();
        }

        let mut path = self.path.clone();
        path.push(slot);
        let nested = Resolver {
            container: self.container,
            path,
        };

        tracing::debug!(provider = entry.provider.name(), "invoking provider");
        let result = entry.provider.invoke(&nested).map(Arc::new);
        *outcome = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Port(u16);

    #[derive(Debug, PartialEq)]
    struct Host(String);

    #[test]
    fn test_empty_container() {
        let container = Container::builder().build().unwrap();
        assert!(container.is_empty());
        assert!(!container.provides::<Port>());
    }

    #[test]
    fn test_resolve_supplied_value() {
        let container = Container::builder().supply(Port(8080)).build().unwrap();
        assert_eq!(*container.resolve::<Port>().unwrap(), Port(8080));
    }

    #[test]
    fn test_resolve_missing() {
        let container = Container::builder().build().unwrap();
        let err = container.resolve::<Port>().unwrap_err();
        assert!(matches!(err, ContainerError::Missing { .. }));
    }

    #[test]
    fn test_optional_missing_is_none() {
        let container = Container::builder().build().unwrap();
        assert!(container.optional::<Port>().unwrap().is_none());
    }

    #[test]
    fn test_provider_invoked_once_for_all_outputs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let container = Container::builder()
            .provide(
                Provider::new("endpoint", move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Components::new()
                        .with(Port(9000))
                        .with(Host("localhost".into())))
                })
                .output::<Port>()
                .output::<Host>(),
            )
            .build()
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let first = container.resolve::<Port>().unwrap();
        let host = container.resolve::<Host>().unwrap();
        let second = container.resolve::<Port>().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(host.0, "localhost");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_provider_failure_is_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let container = Container::builder()
            .provide(
                Provider::new("broken", move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("boom".into())
                })
                .output::<Port>(),
            )
            .build()
            .unwrap();

        let first = container.resolve::<Port>().unwrap_err();
        let second = container.resolve::<Port>().unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.to_string(), "broken failed: boom");
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_optional_propagates_provider_failure() {
        let container = Container::builder()
            .provide(Provider::new("broken", |_| Err("boom".into())).output::<Port>())
            .build()
            .unwrap();

        assert!(container.optional::<Port>().is_err());
    }

    #[test]
    fn test_missing_declared_output() {
        let container = Container::builder()
            .provide(Provider::new("lazy", |_| Ok(Components::new())).output::<Port>())
            .build()
            .unwrap();

        let err = container.resolve::<Port>().unwrap_err();
        assert!(matches!(err, ContainerError::MissingOutput { .. }));
    }

    #[test]
    fn test_dependency_between_providers() {
        let container = Container::builder()
            .supply(Port(443))
            .provide(
                Provider::new("host", |r| {
                    let port = r.resolve::<Port>()?;
                    Ok(Components::new().with(Host(format!("example.com:{}", port.0))))
                })
                .output::<Host>(),
            )
            .build()
            .unwrap();

        assert_eq!(container.resolve::<Host>().unwrap().0, "example.com:443");
    }

    #[test]
    fn test_cycle_detected() {
        let container = Container::builder()
            .provide(
                Provider::new("port", |r| {
                    r.resolve::<Host>()?;
                    Ok(Components::new().with(Port(1)))
                })
                .output::<Port>(),
            )
            .provide(
                Provider::new("host", |r| {
                    r.resolve::<Port>()?;
                    Ok(Components::new().with(Host("h".into())))
                })
                .output::<Host>(),
            )
            .build()
            .unwrap();

        let err = container.resolve::<Port>().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("dependency cycle: port -> host -> port"), "{text}");
        assert!(matches!(
            err.downcast_source::<ContainerError>(),
            Some(ContainerError::Provider { .. })
        ));
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let err = Container::builder()
            .supply(Port(1))
            .supply(Port(2))
            .build()
            .unwrap_err();

        match err {
            ContainerError::Duplicate {
                provider, existing, ..
            } => {
                assert!(provider.starts_with("supply("));
                assert_eq!(provider, existing);
            }
            other => panic!("expected duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_are_aggregated() {
        let err = Container::builder()
            .module(Module::error("first"))
            .supply(Port(1))
            .supply(Port(2))
            .module(Module::group([Module::error("second")]))
            .build()
            .unwrap_err();

        assert!(matches!(err, ContainerError::Startup(_)));
        assert_eq!(err.errors().len(), 3);
    }

    #[test]
    fn test_concurrent_resolution_runs_provider_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let container = Container::builder()
            .provide(
                Provider::new("port", move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Components::new().with(Port(7)))
                })
                .output::<Port>(),
            )
            .build()
            .unwrap();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| assert_eq!(container.resolve::<Port>().unwrap().0, 7));
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
