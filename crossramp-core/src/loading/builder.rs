use log::info;

use super::{BuildConfig, RegionFile};
use crate::{Error, Ramp, leaps::fill_leaps};

/// Builds the filled ramp of a region for the configured vehicle type
///
/// # Errors
///
/// Returns an error if the configuration or the region description is invalid
pub fn build_ramp(region: &RegionFile, config: &BuildConfig) -> Result<Ramp, Error> {
    config.validate()?;

    info!(
        "Building {} ramp for {} ({} roads, {} boundary roads)",
        config.vehicle,
        region.region,
        region.roads.len(),
        region.boundary.len()
    );

    let graph = region.region_graph()?;
    info!(
        "Region graph: {} segments, {} connections",
        graph.segment_count(),
        graph.connection_count()
    );

    let builder = region.collector().prepare(region.region, config.vehicle);
    if builder.enters().is_empty() || builder.exits().is_empty() {
        log::warn!(
            "{} has {} enters and {} exits for {}, the ramp will carry no weights",
            region.region,
            builder.enters().len(),
            builder.exits().len(),
            config.vehicle
        );
    }

    let ramp = fill_leaps(builder, &graph, config)?;
    info!("Ramp of {} created successfully", region.region);
    Ok(ramp)
}
