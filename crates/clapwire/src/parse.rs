//! The direct parse entry points.
//!
//! A parse moves through `Unvalidated → Validated → ParserBuilt → Parsed`,
//! or drops out as `Failed` at any step. Nothing is retried.

use clap::{CommandFactory, Parser};

use crate::arguments::{resolve_arguments, Arguments};
use crate::error::Error;
use crate::options::ParserOptions;
use crate::parser::{CommandParser, Parsed};
use crate::shape::Shape;

/// Checks that `C` is a plain struct.
///
/// The check reads [`std::any::type_name`], whose output is not a stable
/// format, and only sees the outer shape of the type. Wrappers such as
/// `Box<Cli>` are refused; a `#[derive(Parser)]` enum is a named type and
/// passes.
pub fn check_shape<C: ?Sized>() -> Result<(), Error> {
    let shape = Shape::of::<C>();
    if shape.is_struct() {
        Ok(())
    } else {
        Err(Error::InvalidType {
            type_name: std::any::type_name::<C>(),
            shape,
        })
    }
}

/// Builds the parser for `C`, applying `options` in order.
pub fn build_parser<C: CommandFactory>(options: &ParserOptions) -> Result<CommandParser, Error> {
    let parser = options.apply(CommandParser::new(C::command()))?;
    tracing::trace!(
        command = parser.command().get_name(),
        options = options.len(),
        "parser built"
    );
    Ok(parser)
}

/// Parses `args` into a new `C`.
///
/// The type is checked first; an unsuitable `C` fails with
/// [`Error::InvalidType`] before any parser exists. Each call builds its own
/// parser and instance, so concurrent calls do not interfere.
///
/// # Example
///
/// ```rust
/// use clap::Parser;
/// use clapwire::{parse, suppress_exit, Arguments, ParserOptions};
///
/// #[derive(Debug, Parser)]
/// struct Cli {
///     #[arg(short)]
///     v: bool,
/// }
///
/// let options = ParserOptions::from_iter([suppress_exit()]);
/// let parsed = parse::<Cli>(&Arguments::new(["-v"]), &options)?;
/// assert!(parsed.config.v);
/// # Ok::<(), clapwire::Error>(())
/// ```
pub fn parse<C: Parser>(args: &Arguments, options: &ParserOptions) -> Result<Parsed<C>, Error> {
    check_shape::<C>()?;
    build_parser::<C>(options)?.parse(args)
}

/// Parses the process arguments into a new `C`.
pub fn parse_env<C: Parser>(options: &ParserOptions) -> Result<Parsed<C>, Error> {
    parse(&resolve_arguments(None), options)
}
