//! The parser under construction.

use std::fmt;
use std::sync::Arc;

use clap::{Command, FromArgMatches};

use crate::arguments::Arguments;
use crate::context::ParseContext;
use crate::error::Error;

/// What to do with a failed parse before the error is returned.
pub type ExitHandler = Arc<dyn Fn(&clap::Error) + Send + Sync>;

/// clap's own terminate action: print the diagnostic and exit the process
/// with the error's code.
fn terminate(err: &clap::Error) {
    err.exit()
}

/// A clap [`Command`] bound to a configuration type, plus the action taken
/// when parsing fails.
///
/// [`ParserOption`](crate::ParserOption)s transform a `CommandParser` one
/// after another. By default a failed parse terminates the process the way
/// clap does; replace that with [`exit`](crate::exit),
/// [`exit_with`](crate::exit_with) or [`suppress_exit`](crate::suppress_exit).
pub struct CommandParser {
    command: Command,
    on_exit: ExitHandler,
}

impl CommandParser {
    /// Wraps a command with the default terminate action.
    pub fn new(command: Command) -> Self {
        Self {
            command,
            on_exit: Arc::new(terminate),
        }
    }

    /// Returns the command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Transforms the command.
    pub fn map_command(mut self, f: impl FnOnce(Command) -> Command) -> Self {
        self.command = f(self.command);
        self
    }

    /// Transforms the command with a step that may fail.
    pub fn try_map_command<E>(
        mut self,
        f: impl FnOnce(Command) -> Result<Command, E>,
    ) -> Result<Self, E> {
        self.command = f(self.command)?;
        Ok(self)
    }

    /// Replaces the action taken when parsing fails.
    pub fn on_exit(mut self, handler: ExitHandler) -> Self {
        self.on_exit = handler;
        self
    }

    /// Parses `args` into a fresh `C`.
    ///
    /// The command's binary name is prepended as clap's argv\[0\]. On
    /// failure the error is formatted against the command, passed to the
    /// exit action, and returned if that action comes back.
    pub fn parse<C: FromArgMatches>(mut self, args: &Arguments) -> Result<Parsed<C>, Error> {
        let program = self
            .command
            .get_bin_name()
            .unwrap_or_else(|| self.command.get_name())
            .to_owned();

        tracing::debug!(command = %program, args = args.len(), "parsing arguments");

        let argv = std::iter::once(program).chain(args.iter().cloned());
        let outcome = self
            .command
            .try_get_matches_from_mut(argv)
            .and_then(|matches| C::from_arg_matches(&matches).map(|config| (config, matches)))
            .map_err(|err| err.format(&mut self.command));

        match outcome {
            Ok((config, matches)) => {
                let context = ParseContext::new(args.clone(), matches);
                tracing::debug!(command_path = ?context.command_path(), "arguments parsed");
                Ok(Parsed { config, context })
            }
            Err(err) => {
                (self.on_exit)(&err);
                Err(Error::Parse(err))
            }
        }
    }
}

impl fmt::Debug for CommandParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandParser")
            .field("command", &self.command.get_name())
            .finish_non_exhaustive()
    }
}

/// A populated configuration and the context of the parse that produced it.
#[derive(Debug, Clone)]
pub struct Parsed<C> {
    /// The configuration instance.
    pub config: C,
    /// Metadata about the parse.
    pub context: ParseContext,
}

impl<C> Parsed<C> {
    /// Splits into configuration and context.
    pub fn into_parts(self) -> (C, ParseContext) {
        (self.config, self.context)
    }
}
