use self::{
    args::{ToolArgs, ToolSubcommand},
    config::Configuration,
};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io;
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod inspect;
mod sign;
mod util;
mod verify;

fn main() -> Result<()> {
    miette::set_panic_hook();
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config: Configuration = envy::prefixed("TL_SIGNATURE_")
        .from_env()
        .into_diagnostic()?;
    let args = ToolArgs::parse();

    match args.subcommand {
        ToolSubcommand::Sign(args) => sign::do_it(args, &config),
        ToolSubcommand::Verify(args) => verify::do_it(args, &config),
        ToolSubcommand::Inspect { token } => inspect::envelope(&token),
        ToolSubcommand::Jku { token } => inspect::jku(&token),
    }
}
