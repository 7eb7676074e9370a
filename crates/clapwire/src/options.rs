//! Parser construction options.
//!
//! A [`ParserOption`] is an opaque step applied to a [`CommandParser`] while
//! it is being built. Options are applied in order and never deduplicated:
//! when two options set the same thing, the later one wins because it runs
//! last.

use std::fmt;
use std::sync::Arc;

use clap::Command;
use clapwire_container::{BoxError, Module};

use crate::error::Error;
use crate::parser::{CommandParser, ExitHandler};

type ApplyFn = dyn Fn(CommandParser) -> Result<CommandParser, Error> + Send + Sync;

/// A single parser construction step.
#[derive(Clone)]
pub struct ParserOption {
    label: &'static str,
    apply: Arc<ApplyFn>,
}

impl ParserOption {
    /// Creates an option from a transformation of the parser.
    pub fn new<F>(label: &'static str, f: F) -> Self
    where
        F: Fn(CommandParser) -> Result<CommandParser, Error> + Send + Sync + 'static,
    {
        Self {
            label,
            apply: Arc::new(f),
        }
    }

    /// A short description of what the option does.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Applies the option.
    pub fn apply(&self, parser: CommandParser) -> Result<CommandParser, Error> {
        (self.apply)(parser)
    }
}

impl fmt::Debug for ParserOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParserOption").field(&self.label).finish()
    }
}

/// An ordered list of [`ParserOption`]s.
#[derive(Debug, Clone, Default)]
pub struct ParserOptions(Vec<ParserOption>);

impl ParserOptions {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option, builder style.
    pub fn with(mut self, option: ParserOption) -> Self {
        self.push(option);
        self
    }

    /// Appends an option.
    pub fn push(&mut self, option: ParserOption) {
        self.0.push(option);
    }

    /// Returns a new list holding these options followed by `later`.
    pub fn chain(&self, later: &ParserOptions) -> ParserOptions {
        self.0.iter().chain(later.0.iter()).cloned().collect()
    }

    /// Iterates over the options in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParserOption> {
        self.0.iter()
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies every option in order to `parser`.
    pub fn apply(&self, parser: CommandParser) -> Result<CommandParser, Error> {
        self.0
            .iter()
            .try_fold(parser, |parser, option| option.apply(parser))
    }
}

impl FromIterator<ParserOption> for ParserOptions {
    fn from_iter<I: IntoIterator<Item = ParserOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ParserOption> for ParserOptions {
    fn extend<I: IntoIterator<Item = ParserOption>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ParserOptions {
    type Item = ParserOption;
    type IntoIter = std::vec::IntoIter<ParserOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParserOptions {
    type Item = &'a ParserOption;
    type IntoIter = std::slice::Iter<'a, ParserOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A module injecting application-wide parser options.
///
/// Every [`provide`](crate::provide) registration applies these first, then
/// its own options, so options passed to `provide` win over injected ones.
pub fn supply_parser_options(options: impl IntoIterator<Item = ParserOption>) -> Module {
    Module::supply(options.into_iter().collect::<ParserOptions>())
}

/// Transforms the clap command.
pub fn configure<F>(f: F) -> ParserOption
where
    F: Fn(Command) -> Command + Send + Sync + 'static,
{
    ParserOption::new("configure", move |parser| Ok(parser.map_command(&f)))
}

/// Transforms the clap command, possibly refusing to.
///
/// A refusal becomes [`Error::Construction`].
pub fn try_configure<F, E>(f: F) -> ParserOption
where
    F: Fn(Command) -> Result<Command, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    ParserOption::new("try_configure", move |parser| {
        parser.try_map_command(&f).map_err(|err| {
            let source: BoxError = err.into();
            Error::construction(source.to_string()).with_source(source)
        })
    })
}

/// Sets the command name, which also serves as argv\[0\] in diagnostics.
pub fn name(name: impl Into<String>) -> ParserOption {
    let name = name.into();
    ParserOption::new("name", move |parser| {
        if name.trim().is_empty() {
            return Err(Error::construction("command name must not be empty"));
        }
        let name = name.clone();
        Ok(parser.map_command(|cmd| cmd.name(name)))
    })
}

/// Sets the about text shown in help.
pub fn about(text: impl Into<String>) -> ParserOption {
    let text = text.into();
    ParserOption::new("about", move |parser| {
        let text = text.clone();
        Ok(parser.map_command(|cmd| cmd.about(text)))
    })
}

/// Sets the version reported by `--version`.
pub fn version(version: impl Into<String>) -> ParserOption {
    let version = version.into();
    ParserOption::new("version", move |parser| {
        let version = version.clone();
        Ok(parser.map_command(|cmd| cmd.version(version)))
    })
}

/// Replaces the process exit with `f`.
///
/// The diagnostic is still printed; `f` receives the exit code clap would
/// have used. If `f` returns, the error is returned to the caller.
pub fn exit<F>(f: F) -> ParserOption
where
    F: Fn(i32) + Send + Sync + 'static,
{
    exit_with(move |err: &clap::Error| {
        let _ = err.print();
        f(err.exit_code());
    })
}

/// Replaces the whole failure action, printing included.
pub fn exit_with<F>(f: F) -> ParserOption
where
    F: Fn(&clap::Error) + Send + Sync + 'static,
{
    let handler: ExitHandler = Arc::new(f);
    ParserOption::new("exit", move |parser| Ok(parser.on_exit(Arc::clone(&handler))))
}

/// Turns the failure action into a no-op, so parse errors (help and version
/// requests included) are returned instead of terminating the process.
///
/// Mostly useful for tests and examples, and for hosts that report parse
/// errors themselves.
pub fn suppress_exit() -> ParserOption {
    exit_with(|_| {})
}
