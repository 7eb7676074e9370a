//! Container registration for configuration types.

use std::any::type_name;

use clap::Parser;
use clapwire_container::{Components, Module, Provider};

use crate::arguments::{resolve_arguments, Arguments};
use crate::command_line::CommandLine;
use crate::context::ParseContext;
use crate::options::{ParserOption, ParserOptions};
use crate::parse::{build_parser, check_shape};

/// Registers a provider that parses the command line into a `C`.
///
/// The provider outputs both `C` and the [`ParseContext`] of the parse. It
/// optionally consumes:
///
/// - [`Arguments`]: the tokens to parse, see
///   [`supply_arguments`](crate::supply_arguments). When absent the process
///   arguments are used.
/// - [`ParserOptions`]: application-wide options, see
///   [`supply_parser_options`](crate::supply_parser_options). They are
///   applied before `external`, so `external` wins where both set the same
///   thing.
///
/// The type is checked here, at registration. An unsuitable `C` turns into a
/// module error that [`ContainerBuilder::build`] reports.
///
/// [`ContainerBuilder::build`]: clapwire_container::ContainerBuilder::build
///
/// # Example
///
/// ```rust
/// use clapwire::{provide, supply_arguments, suppress_exit, CommandLine};
/// use clapwire_container::Container;
///
/// let container = Container::builder()
///     .module(supply_arguments(["--pprof"]))
///     .module(provide::<CommandLine>([suppress_exit()]))
///     .build()?;
///
/// assert!(container.resolve::<CommandLine>()?.pprof);
/// # Ok::<(), clapwire_container::ContainerError>(())
/// ```
pub fn provide<C>(external: impl IntoIterator<Item = ParserOption>) -> Module
where
    C: Parser + Send + Sync + 'static,
{
    if let Err(err) = check_shape::<C>() {
        tracing::debug!(error = %err, "refusing configuration type");
        return Module::error(err);
    }

    let external: ParserOptions = external.into_iter().collect();
    let provider = Provider::new(format!("provide({})", type_name::<C>()), move |r| {
        let options = match r.optional::<ParserOptions>()? {
            Some(injected) => injected.chain(&external),
            None => external.clone(),
        };
        let args = r.optional::<Arguments>()?;
        let args = resolve_arguments(args.as_deref());

        let (config, context) = build_parser::<C>(&options)?.parse::<C>(&args)?.into_parts();
        Ok(Components::new().with(config).with(context))
    });

    Module::provide(provider.output::<C>().output::<ParseContext>())
}

/// [`provide`] for the standard [`CommandLine`].
pub fn provide_default(external: impl IntoIterator<Item = ParserOption>) -> Module {
    provide::<CommandLine>(external)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::suppress_exit;

    #[test]
    fn test_invalid_type_is_module_error() {
        let module = provide::<Box<CommandLine>>([suppress_exit()]);
        assert!(matches!(module, Module::Error(_)));
    }

    #[test]
    fn test_provider_declares_outputs() {
        let Module::Provide(provider) = provide_default([suppress_exit()]) else {
            panic!("expected a provider");
        };
        let outputs: Vec<_> = provider.output_names().collect();
        assert_eq!(
            outputs,
            [
                type_name::<CommandLine>(),
                type_name::<ParseContext>()
            ]
        );
        assert_eq!(
            provider.name(),
            format!("provide({})", type_name::<CommandLine>())
        );
    }
}
