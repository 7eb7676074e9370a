//! Wires clap-derived command lines into a component container.
//!
//! `clapwire` turns a `#[derive(Parser)]` struct into a component: a
//! provider that parses the command line once, on first use, and hands the
//! populated struct to everything that depends on it.
//!
//! # Features
//!
//! - **Argument sourcing**: explicit [`Arguments`] when supplied, the process
//!   arguments otherwise
//! - **Type validation**: wrappers such as `Box<Cli>` are refused before a
//!   parser exists
//! - **Parser options**: ordered, composable [`ParserOption`]s, with
//!   application-wide options applied before per-registration ones
//! - **Exit control**: clap's terminate action by default, replaceable with
//!   [`exit`], [`exit_with`] or [`suppress_exit`]
//! - **Standard flags**: [`CommandLine`] with `--config-file`, `--no-health`
//!   and `--pprof`
//!
//! # Direct Parsing
//!
//! ```rust
//! use clap::Parser;
//! use clapwire::{parse, name, suppress_exit, Arguments, ParserOptions};
//!
//! #[derive(Debug, Parser)]
//! struct Cli {
//!     #[arg(short, long)]
//!     verbose: bool,
//! }
//!
//! let options = ParserOptions::from_iter([name("svc"), suppress_exit()]);
//! let parsed = parse::<Cli>(&Arguments::new(["--verbose"]), &options)?;
//! assert!(parsed.config.verbose);
//! # Ok::<(), clapwire::Error>(())
//! ```
//!
//! # Container Registration
//!
//! ```rust
//! use clapwire::{provide_default, supply_arguments, supply_parser_options, suppress_exit};
//! use clapwire::{CommandLine, ParseContext, ParserOptions};
//! use clapwire_container::Container;
//! use std::path::Path;
//!
//! let container = Container::builder()
//!     .module(supply_arguments(["-f", "svc.yaml"]))
//!     .module(supply_parser_options([suppress_exit()]))
//!     .module(provide_default(ParserOptions::new()))
//!     .build()?;
//!
//! let cli = container.resolve::<CommandLine>()?;
//! assert_eq!(cli.config_file.as_deref(), Some(Path::new("svc.yaml")));
//! assert!(container.resolve::<ParseContext>()?.command_path().is_empty());
//! # Ok::<(), clapwire_container::ContainerError>(())
//! ```
//!
//! Parse failures surface when the configuration is resolved, as a
//! [`ContainerError::Provider`](clapwire_container::ContainerError::Provider)
//! whose source is this crate's [`Error`].

mod arguments;
mod command_line;
mod context;
mod error;
mod options;
mod parse;
mod parser;
mod provide;
mod shape;

pub use arguments::{process_arguments, resolve_arguments, supply_arguments, Arguments};
pub use command_line::CommandLine;
pub use context::ParseContext;
pub use error::Error;
pub use options::{
    about, configure, exit, exit_with, name, supply_parser_options, suppress_exit, try_configure,
    version, ParserOption, ParserOptions,
};
pub use parse::{build_parser, check_shape, parse, parse_env};
pub use parser::{CommandParser, ExitHandler, Parsed};
pub use provide::{provide, provide_default};
pub use shape::Shape;
