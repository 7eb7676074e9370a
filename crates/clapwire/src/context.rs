//! Metadata about a completed parse.

use clap::ArgMatches;

use crate::arguments::Arguments;

/// What happened during a parse: the tokens that were parsed, the raw
/// matches, and the subcommand path that was taken.
///
/// # Example
///
/// ```rust
/// use clap::{Parser, Subcommand};
/// use clapwire::{parse, suppress_exit, Arguments, ParserOptions};
///
/// #[derive(Debug, Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Command,
/// }
///
/// #[derive(Debug, Subcommand)]
/// enum Command {
///     Db {
///         #[command(subcommand)]
///         action: DbAction,
///     },
/// }
///
/// #[derive(Debug, Subcommand)]
/// enum DbAction {
///     Migrate,
/// }
///
/// let options = ParserOptions::from_iter([suppress_exit()]);
/// let parsed = parse::<Cli>(&Arguments::new(["db", "migrate"]), &options)?;
///
/// assert_eq!(parsed.context.command_path(), ["db", "migrate"]);
/// assert_eq!(parsed.context.selected(), Some("migrate"));
/// # Ok::<(), clapwire::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext {
    args: Arguments,
    matches: ArgMatches,
    command_path: Vec<String>,
}

impl ParseContext {
    pub(crate) fn new(args: Arguments, matches: ArgMatches) -> Self {
        let command_path = extract_command_path(&matches);
        Self {
            args,
            matches,
            command_path,
        }
    }

    /// The tokens that were parsed, program name excluded.
    pub fn args(&self) -> &Arguments {
        &self.args
    }

    /// The raw clap matches for the top-level command.
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// The subcommand chain that was taken, e.g. `["db", "migrate"]`.
    pub fn command_path(&self) -> &[String] {
        &self.command_path
    }

    /// The subcommand chain joined with spaces, empty for the root command.
    pub fn command(&self) -> String {
        self.command_path.join(" ")
    }

    /// The most deeply nested subcommand, if any.
    pub fn selected(&self) -> Option<&str> {
        self.command_path.last().map(String::as_str)
    }

    /// Returns true if a subcommand was given.
    pub fn has_subcommand(&self) -> bool {
        !self.command_path.is_empty()
    }

    /// The matches of the most deeply nested subcommand.
    pub fn leaf_matches(&self) -> &ArgMatches {
        let mut current = &self.matches;
        while let Some((name, sub)) = current.subcommand() {
            if name == "help" {
                break;
            }
            current = sub;
        }
        current
    }
}

/// Follows the subcommand chain, stopping at clap's `help` subcommand.
fn extract_command_path(matches: &ArgMatches) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = matches;

    while let Some((name, sub)) = current.subcommand() {
        if name == "help" {
            break;
        }
        path.push(name.to_string());
        current = sub;
    }

    path
}
