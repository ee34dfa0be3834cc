use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crossramp_core::prelude::*;
use tracing::info;

pub fn build(
    region_path: &Path,
    config_path: Option<&Path>,
    vehicle: Option<VehicleType>,
    threads: Option<usize>,
    out: &Path,
) -> Result<(), Error> {
    let mut config = match config_path {
        Some(path) => BuildConfig::load(path)?,
        None => BuildConfig::default(),
    };
    if let Some(vehicle) = vehicle {
        config.vehicle = vehicle;
    }
    if threads.is_some() {
        config.threads = threads;
    }

    let region = RegionFile::load(region_path)?;
    let ramp = build_ramp(&region, &config)?;
    write_ramp(&ramp, out)?;

    let stats = ramp.stats();
    info!(
        enters = stats.enters,
        exits = stats.exits,
        routes = stats.routes,
        "Ramp written to {}",
        out.display()
    );
    Ok(())
}

pub fn print_info(ramp_path: &Path) -> Result<(), Error> {
    let ramp = read_ramp(ramp_path)?;
    let summary = serde_json::json!({
        "region": ramp.region(),
        "stats": ramp.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn edges(
    ramp_path: &Path,
    feature_id: u32,
    segment_index: u32,
    backward: bool,
    outgoing: bool,
) -> Result<(), Error> {
    let ramp = read_ramp(ramp_path)?;
    let segment = Segment::new(ramp.region(), feature_id, segment_index, !backward);

    // Outgoing edges start at an enter (an incoming transition), ingoing ones end at an exit.
    if !ramp.is_transition(&segment, !outgoing) {
        return Err(Error::InvalidData(format!(
            "{segment} is not an {} transition of {}",
            if outgoing { "entering" } else { "leaving" },
            ramp.region()
        )));
    }

    let mut edges = Vec::new();
    ramp.edges(&segment, outgoing, &mut edges);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (target, weight) in &edges {
        writeln!(out, "{target}\t{weight}")?;
    }
    info!("{} edges from {segment}", edges.len());
    Ok(())
}

pub fn geojson(ramp_path: &Path, out: Option<&PathBuf>) -> Result<(), Error> {
    let ramp = read_ramp(ramp_path)?;
    let text = ramp.to_geojson_string()?;
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

fn read_ramp(path: &Path) -> Result<Ramp, Error> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_ramp(ramp: &Ramp, path: &Path) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, ramp)?;
    writer.flush()?;
    Ok(())
}
