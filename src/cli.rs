use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crossramp_core::VehicleType;

/// Build and inspect cross-region transition indexes ("ramps")
#[derive(Debug, Parser)]
#[command(name = "crossramp", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the ramp of a region and write it as JSON
    Build {
        /// Region description (JSON)
        #[arg(long)]
        region: PathBuf,
        /// Build settings (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Vehicle type, overrides the config file
        #[arg(long)]
        vehicle: Option<VehicleType>,
        /// Worker threads, overrides the config file
        #[arg(long)]
        threads: Option<usize>,
        /// Output file for the filled ramp
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a summary of a filled ramp
    Info {
        #[arg(long)]
        ramp: PathBuf,
    },
    /// Print the weighted edges implied by crossing at one boundary segment
    Edges {
        #[arg(long)]
        ramp: PathBuf,
        #[arg(long)]
        feature: u32,
        #[arg(long, default_value_t = 0)]
        segment: u32,
        /// Travel the segment against its forward direction
        #[arg(long)]
        backward: bool,
        /// Edges to exits (segment is an enter) instead of from enters
        #[arg(long)]
        outgoing: bool,
    },
    /// Export the transitions of a ramp as GeoJSON
    Geojson {
        #[arg(long)]
        ramp: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
