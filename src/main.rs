use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

mod cli;
mod commands;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Build {
            region,
            config,
            vehicle,
            threads,
            out,
        } => commands::build(&region, config.as_deref(), vehicle, threads, &out),
        Command::Info { ramp } => commands::print_info(&ramp),
        Command::Edges {
            ramp,
            feature,
            segment,
            backward,
            outgoing,
        } => commands::edges(&ramp, feature, segment, backward, outgoing),
        Command::Geojson { ramp, out } => commands::geojson(&ramp, out.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
