use agent_swarm_sim::adapters::outbound::{init_combined_logger, init_tracing_logger, install_tracing_subscriber};
use agent_swarm_sim::application::SimulationService;
use agent_swarm_sim::Config;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = "simulation.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    install_tracing_subscriber("info")?;

    info!("Starting agent swarm simulation");

    // An explicit path must exist; the default file is optional.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path).await?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::from_file(DEFAULT_CONFIG).await?,
        None => {
            info!("No {} found, using built-in defaults", DEFAULT_CONFIG);
            Config::default()
        }
    };
    info!("Configuration loaded successfully");

    let console = init_tracing_logger();
    let logger = match &config.logging.file {
        Some(path) => init_combined_logger(path, &config.logging.level, vec![console.clone()], console),
        None => console,
    };

    let duration = config.run.duration;
    let snapshot = tokio::task::spawn_blocking(move || {
        let mut service = SimulationService::from_config(&config, logger)?;
        let snapshot = service.run_with_progress(duration)?;
        Ok::<_, agent_swarm_sim::ApplicationError>(snapshot)
    })
    .await??;

    info!("Finished at step {} with {} agents still moving", snapshot.step, snapshot.moving_count());
    debug!("Final snapshot: {}", snapshot.to_json()?);

    info!("Shutting down agent swarm simulation");
    Ok(())
}
