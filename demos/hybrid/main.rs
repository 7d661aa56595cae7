use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hybridswarm::algorithms::particles::TrackingSwarmObserver;
use hybridswarm::core::{Callbacks, CtrlCAbortSignal, MaxSteps};
use hybridswarm::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // `RUST_LOG=hybridswarm=trace` logs every improvement of the global best
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A two-dimensional Rastrigin trial on a global topology with a small genetic layer
    let mut config = HybridConfig::new(0.2, 0.05, 1.0);
    config
        .with_function(FunctionKind::Rastrigin)
        .with_dimension(2)
        .with_n_particles(16)
        .with_topology(SwarmTopology::Global)
        .with_selection(SelectionMethod::Tournament)
        .with_max_iterations(200)
        .with_record_interval(20)
        .with_seed(0);
    let mut hybrid = Hybrid::new(config)?;

    // Create a tracker to record swarm history
    let tracker = TrackingSwarmObserver::new(10).build();

    // Run the optimizer, stopping early on Ctrl-C
    let summary = hybrid.process(
        Callbacks::empty()
            .with_terminator(MaxSteps(200))
            .with_terminator(CtrlCAbortSignal::new())
            .with_observer(tracker.clone()),
    )?;

    println!("{}", summary);

    // Export the results to a Python .pkl file to visualize via matplotlib
    let mut writer = BufWriter::new(File::create(Path::new("data.pkl"))?);
    serde_pickle::to_writer(&mut writer, &tracker, Default::default())?;
    Ok(())
}
