//! `svc`: prints the startup plan a service would act on.
//!
//! ```text
//! svc --listen :9000 --pprof
//! RUST_LOG=clapwire=debug svc -f svc.yaml
//! ```

use anyhow::Context;
use clap::Parser;
use clapwire::{
    name, provide, supply_arguments, supply_parser_options, version, CommandLine, ParseContext,
    ParserOptions,
};
use clapwire_container::{Components, Container, ContainerError, Provider};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Service command line: the standard flags plus a listen address.
#[derive(Debug, Parser, Serialize)]
struct ServiceCli {
    #[command(flatten)]
    #[serde(flatten)]
    common: CommandLine,

    /// Address to listen on.
    #[arg(long, default_value = ":8080")]
    listen: String,
}

#[derive(Debug, Serialize)]
struct Plan {
    command_line: serde_json::Value,
    args: Vec<String>,
    endpoints: Vec<String>,
}

fn plan_provider() -> Provider {
    Provider::new("plan", |r| {
        let cli = r.resolve::<ServiceCli>()?;
        let context = r.resolve::<ParseContext>()?;

        let mut endpoints = vec![format!("http {}", cli.listen)];
        if !cli.common.no_health {
            endpoints.push(format!("health {}/health", cli.listen));
        }
        if cli.common.pprof {
            endpoints.push(format!("pprof {}/debug/pprof", cli.listen));
        }

        Ok(Components::new().with(Plan {
            command_line: serde_json::to_value(&*cli)?,
            args: context.args().to_vec(),
            endpoints,
        }))
    })
    .output::<Plan>()
}

/// Wires the service. `args` overrides the process arguments.
fn wire(args: Option<Vec<String>>) -> Result<Container, ContainerError> {
    let mut builder = Container::builder()
        .module(supply_parser_options([
            name("svc"),
            version(env!("CARGO_PKG_VERSION")),
        ]))
        .module(provide::<ServiceCli>(ParserOptions::new()))
        .provide(plan_provider());

    if let Some(args) = args {
        builder = builder.module(supply_arguments(args));
    }
    builder.build()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let container = wire(None).context("wiring the service")?;
    let plan = container.resolve::<Plan>().context("resolving the startup plan")?;

    println!("{}", serde_json::to_string_pretty(&*plan)?);
    Ok(())
}
