//! Raw argument lists and the choice of which one gets parsed.
//!
//! The only rule here is presence. An absent [`Arguments`] means "parse what
//! the process was started with"; a present one is parsed as is, even when
//! it is empty.

use std::ops::Deref;

use clapwire_container::Module;

/// The raw command-line tokens handed to the parser, program name excluded.
///
/// This type exists mainly so the argument list can be injected
/// unambiguously into a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Arguments(Vec<String>);

impl Arguments {
    /// Creates an argument list from any sequence of string-like values.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Creates a present, empty argument list.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the tokens as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consumes the list, returning the tokens.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Deref for Arguments {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Arguments {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<S: Into<String>> FromIterator<S> for Arguments {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for Arguments {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returns the arguments the process was started with, program name excluded.
///
/// Tokens that are not valid UTF-8 are converted lossily.
pub fn process_arguments() -> Arguments {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Picks the argument list to parse.
///
/// A supplied list is returned unchanged, including an empty one. Only when
/// nothing was supplied does this fall back to [`process_arguments`].
pub fn resolve_arguments(explicit: Option<&Arguments>) -> Arguments {
    match explicit {
        Some(args) => args.clone(),
        None => {
            tracing::debug!("no arguments supplied, using process arguments");
            process_arguments()
        }
    }
}

/// A module supplying the command line to parse, overriding the process
/// arguments.
///
/// This always supplies a present list: calling it with no values makes
/// the parser see an empty command line rather than the process arguments.
/// Useful for tests and for editing the command line before parsing.
pub fn supply_arguments<I, S>(args: I) -> Module
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Module::supply(Arguments::new(args))
}
