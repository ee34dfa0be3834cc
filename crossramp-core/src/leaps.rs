//! Weight matrix calculation ("leaps") over the intra-region road graph.
//!
//! Every enter starts one shortest-path wave over the region graph; the
//! reached exits form that enter's row of the ramp's weight matrix. Waves
//! are independent and run in parallel.

use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

use log::{info, warn};

use crate::{Error, Ramp, RampBuilder, loading::BuildConfig, region::RegionGraph};

/// Fills the weight matrix of `builder` with travel times from `graph`.
///
/// # Errors
///
/// Returns an error if the graph belongs to another region, the config is
/// invalid, or the configured thread pool cannot be created.
pub fn fill_leaps(
    builder: RampBuilder,
    graph: &RegionGraph,
    config: &BuildConfig,
) -> Result<Ramp, Error> {
    config.validate()?;

    if graph.region() != builder.region() {
        return Err(Error::InvalidData(format!(
            "Region graph of {} cannot fill the ramp of {}",
            graph.region(),
            builder.region()
        )));
    }

    let missing = builder
        .enters()
        .iter()
        .chain(builder.exits())
        .filter(|segment| graph.node(segment).is_none())
        .count();
    if missing > 0 {
        warn!(
            "{missing} transition segments of {} are missing from the region graph and stay unreachable",
            builder.region()
        );
    }

    let timer = Instant::now();
    let num_enters = builder.enters().len();
    let progress_every = config.progress_every;
    let waves_passed = AtomicUsize::new(0);

    let run = move || {
        builder.fill_weights_by_row(|enter, exits| {
            let row = graph.travel_times(enter, exits);

            let passed = waves_passed.fetch_add(1, Ordering::Relaxed) + 1;
            if passed % progress_every == 0 {
                info!("Building leaps: {passed} / {num_enters} waves passed");
            }
            row
        })
    };

    let ramp = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(run),
        None => run(),
    };

    let stats = ramp.stats();
    info!(
        "Leaps finished, elapsed: {:.2} seconds, routes found: {}, not found: {}",
        timer.elapsed().as_secs_f64(),
        stats.routes,
        stats.no_routes
    );
    Ok(ramp)
}
