use crate::common::{ApplicationResult, SimulationResult};
use crate::config::Config;
use crate::domains::logger::DynLogger;
use crate::domains::simulation::{Simulation, SimulationEvent, SimulationSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

/// Agents listed individually before a run.
const PREVIEW_AGENTS: usize = 5;

/// Runs one simulation end to end: owns the seeded generator and reports progress
/// through the injected logger.
pub struct SimulationService {
    simulation: Simulation,
    rng: StdRng,
    logger: DynLogger,
    progress_intervals: u64,
}

impl SimulationService {
    pub fn new(simulation: Simulation, rng: StdRng, logger: DynLogger) -> Self {
        Self {
            simulation,
            rng,
            logger,
            progress_intervals: 10,
        }
    }

    /// Builds and populates a simulation from a loaded configuration.
    pub fn from_config(config: &Config, logger: DynLogger) -> ApplicationResult<Self> {
        config.validate()?;
        let mut rng = match config.run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut simulation = Simulation::new(Uuid::new_v4().to_string(), config.simulation.clone())?;
        simulation.initialize_agents(&config.agents, &mut rng)?;
        logger.info(&format!(
            "Initialized {} agents in a {}x{} boundary (simulation {})",
            config.agents.num_agents,
            config.simulation.boundary_width,
            config.simulation.boundary_height,
            simulation.id
        ));

        let mut service = Self::new(simulation, rng, logger);
        service.progress_intervals = config.run.progress_intervals;
        Ok(service)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn step(&mut self) {
        self.simulation.step(&mut self.rng);
        self.commit_events();
    }

    /// Runs for `duration` seconds, reporting progress `progress_intervals` times, and
    /// returns the final snapshot.
    pub fn run_with_progress(&mut self, duration: f64) -> SimulationResult<SimulationSnapshot> {
        let total = self.simulation.steps_for(duration)?;
        let config = self.simulation.config();
        self.logger.info(&format!(
            "Running simulation for {} seconds ({} steps), time step {}, interaction radius {}, randomness std dev {}",
            duration, total, config.time_step, config.interaction_radius, config.random_std_dev
        ));

        self.report_agents(PREVIEW_AGENTS);

        let every = match self.progress_intervals {
            0 => None,
            n => Some((total / n).max(1)),
        };
        for done in 1..=total {
            self.step();
            if let Some(every) = every {
                if done % every == 0 || done == total {
                    self.report_progress(done, total);
                }
            }
        }

        self.report_summary();
        self.logger.flush();
        Ok(self.simulation.snapshot())
    }

    fn report_progress(&self, done: u64, total: u64) {
        self.logger.info(&format!(
            "Step {}/{} - Time: {:.2}s - Moving agents: {}/{}",
            done,
            total,
            self.simulation.current_time(),
            self.simulation.moving_count(),
            self.simulation.agents().len()
        ));
    }

    fn report_agents(&self, limit: usize) {
        for state in self.simulation.get_agent_states().iter().take(limit) {
            self.logger.info(&format!(
                "Agent {}: pos={} vel={} energy={:.2} moving={}",
                state.id, state.position, state.velocity, state.energy, state.is_moving
            ));
        }
    }

    fn report_summary(&self) {
        let total = self.simulation.agents().len();
        let moving = self.simulation.moving_count();
        self.logger.info(&format!(
            "Simulation complete at t={:.2}s: {} agents, {} still moving, {} stopped",
            self.simulation.current_time(),
            total,
            moving,
            total - moving
        ));

        let agents = self.simulation.agents();
        if let Some(energy) = Spread::of(agents.iter().map(|a| a.energy())) {
            self.logger.info(&format!("Energy - {}", energy));
        }
        if let Some(movement) = Spread::of(agents.iter().map(|a| a.movement_time())) {
            self.logger.info(&format!("Movement time - {}", movement));
        }
    }

    fn commit_events(&mut self) {
        for event in self.simulation.uncommitted_events() {
            match event {
                SimulationEvent::AgentStopped { agent, time, .. } => {
                    self.logger.info(&format!("Agent {} ran out of energy at t={:.2}s", agent, time));
                }
                other => tracing::trace!("{:?}", other),
            }
        }
        self.simulation.mark_events_as_committed();
    }
}

/// Min, max and mean of a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spread {
    min: f64,
    max: f64,
    mean: f64,
}

impl Spread {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        let (mut min, mut max, mut sum, mut count) = (f64::INFINITY, f64::NEG_INFINITY, 0.0, 0usize);
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
        (count > 0).then(|| Self { min, max, mean: sum / count as f64 })
    }
}

impl std::fmt::Display for Spread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Min: {:.2}, Max: {:.2}, Avg: {:.2}", self.min, self.max, self.mean)
    }
}
