//! Error types for container registration and resolution.

use std::error::Error as StdError;
use std::sync::Arc;

/// A boxed error returned by provider factories and module errors.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A shared error. Provider outcomes are cached, so a failure has to be
/// reported to every caller that resolves one of the provider's outputs.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Errors reported by [`ContainerBuilder::build`](crate::ContainerBuilder::build)
/// and by component resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContainerError {
    /// No provider was registered for the requested type.
    #[error("missing type: {type_name}")]
    Missing {
        /// The requested type.
        type_name: &'static str,
    },

    /// Two providers declared the same output type.
    #[error("cannot provide {type_name} from {provider}: already provided by {existing}")]
    Duplicate {
        /// The contested output type.
        type_name: &'static str,
        /// The provider that was rejected.
        provider: String,
        /// The provider that was registered first.
        existing: String,
    },

    /// A module carried an error instead of a provider.
    #[error("invalid module: {0}")]
    Module(#[source] SharedError),

    /// A provider factory returned an error.
    #[error("{provider} failed: {source}")]
    Provider {
        /// Name of the failing provider.
        provider: String,
        /// The factory's error.
        #[source]
        source: SharedError,
    },

    /// A provider succeeded but did not produce one of its declared outputs.
    #[error("{provider} did not produce declared output {type_name}")]
    MissingOutput {
        /// Name of the provider.
        provider: String,
        /// The missing output type.
        type_name: &'static str,
    },

    /// A provider (indirectly) depends on one of its own outputs.
    #[error("dependency cycle: {path}")]
    Cycle {
        /// Provider names along the cycle, outermost first.
        path: String,
    },

    /// Several registration errors, reported together.
    #[error("container failed to start: {}", join_errors(.0))]
    Startup(Vec<ContainerError>),
}

impl ContainerError {
    /// Searches this error and its causes for an error of type `E`.
    ///
    /// Provider and module errors are held behind an [`Arc`], which hides
    /// the concrete type from [`std::error::Error::source`] based downcasting.
    /// This walks into the shared error itself before following its chain.
    pub fn downcast_source<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            ContainerError::Module(source) | ContainerError::Provider { source, .. } => {
                let mut current: Option<&(dyn StdError + 'static)> = Some(&**source);
                while let Some(err) = current {
                    if let Some(found) = err.downcast_ref::<E>() {
                        return Some(found);
                    }
                    if let Some(nested) = err.downcast_ref::<ContainerError>() {
                        return nested.downcast_source();
                    }
                    current = err.source();
                }
                None
            }
            ContainerError::Startup(errors) => errors.iter().find_map(|e| e.downcast_source()),
            _ => None,
        }
    }

    /// Returns the individual errors, flattening [`ContainerError::Startup`].
    pub fn errors(&self) -> Vec<&ContainerError> {
        match self {
            ContainerError::Startup(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            other => vec![other],
        }
    }
}

fn join_errors(errors: &[ContainerError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
