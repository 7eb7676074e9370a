//! A small type-keyed component container.
//!
//! `clapwire-container` assembles an application from [`Module`]s. Each
//! module registers a [`Provider`] (a named factory with declared output
//! types), a ready-made value, or an error to report at startup. The
//! [`Container`] invokes providers lazily: a provider runs the first time one
//! of its outputs is resolved, and never again.
//!
//! # Registration and Resolution
//!
//! ```rust
//! use clapwire_container::{Components, Container, Module, Provider};
//!
//! struct Verbose(bool);
//! struct Greeting(String);
//!
//! let container = Container::builder()
//!     .module(Module::supply(Verbose(true)))
//!     .provide(
//!         Provider::new("greeting", |r| {
//!             // Optional dependencies resolve to None when nothing provides them.
//!             let loud = r.optional::<Verbose>()?.map(|v| v.0).unwrap_or(false);
//!             let text = if loud { "HELLO" } else { "hello" };
//!             Ok(Components::new().with(Greeting(text.into())))
//!         })
//!         .output::<Greeting>(),
//!     )
//!     .build()?;
//!
//! assert_eq!(container.resolve::<Greeting>()?.0, "HELLO");
//! # Ok::<(), clapwire_container::ContainerError>(())
//! ```
//!
//! # Startup Errors
//!
//! [`ContainerBuilder::build`] reports every module error and every output
//! type provided twice. Provider failures surface when the output is
//! resolved, as [`ContainerError::Provider`] carrying the factory's error.

mod components;
mod container;
mod error;
mod module;

pub use components::Components;
pub use container::{Container, ContainerBuilder, Resolver};
pub use error::{BoxError, ContainerError, SharedError};
pub use module::{FactoryFn, Module, Provider};
