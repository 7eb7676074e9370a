//! Providers and modules: the units a container is assembled from.

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::components::Components;
use crate::container::Resolver;
use crate::error::{BoxError, ContainerError, SharedError};

/// The factory signature behind a [`Provider`].
pub type FactoryFn =
    Arc<dyn Fn(&Resolver<'_>) -> Result<Components, BoxError> + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy)]
pub(crate) struct OutputType {
    pub(crate) id: TypeId,
    pub(crate) type_name: &'static str,
}

/// A named factory with declared output types.
///
/// The factory receives a [`Resolver`] for its own dependencies and returns
/// the [`Components`] it built. The container invokes it at most once, the
/// first time any of its outputs is resolved.
///
/// # Example
///
/// ```rust
/// use clapwire_container::{Components, Container, Provider};
///
/// struct Port(u16);
/// struct Address(String);
///
/// let container = Container::builder()
///     .supply(Port(8080))
///     .provide(
///         Provider::new("address", |r| {
///             let port = r.resolve::<Port>()?;
///             Ok(Components::new().with(Address(format!("127.0.0.1:{}", port.0))))
///         })
///         .output::<Address>(),
///     )
///     .build()?;
///
/// assert_eq!(container.resolve::<Address>()?.0, "127.0.0.1:8080");
/// # Ok::<(), clapwire_container::ContainerError>(())
/// ```
#[derive(Clone)]
pub struct Provider {
    name: String,
    outputs: Vec<OutputType>,
    factory: FactoryFn,
}

impl Provider {
    /// Creates a provider with no declared outputs yet.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Resolver<'_>) -> Result<Components, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            outputs: Vec::new(),
            factory: Arc::new(factory),
        }
    }

    /// Declares that the factory produces a component of type `T`.
    pub fn output<T: Send + Sync + 'static>(mut self) -> Self {
        let id = TypeId::of::<T>();
        if !self.outputs.iter().any(|o| o.id == id) {
            self.outputs.push(OutputType {
                id,
                type_name: type_name::<T>(),
            });
        }
        self
    }

    /// The provider's name, used in error messages and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the declared output types, in declaration order.
    pub fn output_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.outputs.iter().map(|o| o.type_name)
    }

    pub(crate) fn outputs(&self) -> &[OutputType] {
        &self.outputs
    }

    /// Runs the factory and checks that every declared output was produced.
    pub(crate) fn invoke(&self, resolver: &Resolver<'_>) -> Result<Components, ContainerError> {
        let components = (self.factory)(resolver).map_err(|source| ContainerError::Provider {
            provider: self.name.clone(),
            source: SharedError::from(source),
        })?;

        if let Some(missing) = self.outputs.iter().find(|o| !components.contains_id(o.id)) {
            return Err(ContainerError::MissingOutput {
                provider: self.name.clone(),
                type_name: missing.type_name,
            });
        }

        Ok(components)
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("outputs", &self.outputs.iter().map(|o| o.type_name).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// A unit of container configuration.
///
/// Libraries hand out modules rather than registering directly, so a
/// configuration problem detected while building the module (a bad type
/// parameter, say) travels to [`ContainerBuilder::build`](crate::ContainerBuilder::build)
/// and is reported with every other startup error.
#[derive(Debug, Clone)]
pub enum Module {
    /// Registers a provider.
    Provide(Provider),
    /// Fails the container build with this error.
    Error(SharedError),
    /// A group of modules, registered in order.
    Group(Vec<Module>),
}

impl Module {
    /// Registers a provider.
    pub fn provide(provider: Provider) -> Self {
        Module::Provide(provider)
    }

    /// Registers a ready-made value as a component.
    pub fn supply<T: Send + Sync + 'static>(value: T) -> Self {
        let value = Arc::new(value);
        Module::Provide(
            Provider::new(format!("supply({})", type_name::<T>()), move |_| {
                let mut components = Components::new();
                components.insert_arc(Arc::clone(&value));
                Ok(components)
            })
            .output::<T>(),
        )
    }

    /// A module that fails the container build.
    pub fn error<E: Into<BoxError>>(err: E) -> Self {
        Module::Error(SharedError::from(err.into()))
    }

    /// Combines several modules into one.
    pub fn group(modules: impl IntoIterator<Item = Module>) -> Self {
        Module::Group(modules.into_iter().collect())
    }
}

impl From<Provider> for Module {
    fn from(provider: Provider) -> Self {
        Module::Provide(provider)
    }
}

impl FromIterator<Module> for Module {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        Module::group(iter)
    }
}
