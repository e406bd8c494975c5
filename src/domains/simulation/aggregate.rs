use super::events::SimulationEvent;
use super::parameters::{AgentInitParams, SimulationConfig};
use super::projections::{AgentState, SimulationSnapshot};
use crate::common::{SimulationError, SimulationResult};
use crate::domains::agent::Agent;
use crate::domains::geometry::{Boundary, Vector2D};
use rand::Rng;
use std::f64::consts::TAU;

/// Relative slack when turning `duration / time_step` into a step count, so quotients
/// like `2.1 / 0.3 = 7.000000000000001` are not rounded up to an extra step.
const STEP_TOLERANCE: f64 = 1e-9;

/// Owns the agent population and drives the per-tick rule set.
///
/// Agents are addressed by their index in creation order. Every random draw comes
/// from the generator passed into the call, so two simulations built from the same
/// config and stepped with identically seeded generators evolve identically.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub id: String,
    config: SimulationConfig,
    boundary: Boundary,
    agents: Vec<Agent>,
    steps_taken: u64,
    uncommitted_events: Vec<SimulationEvent>,
}

impl Simulation {
    pub fn new(id: String, config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        let boundary = Boundary::new(config.boundary_width, config.boundary_height)?;
        Ok(Self {
            id,
            config,
            boundary,
            agents: Vec::new(),
            steps_taken: 0,
            uncommitted_events: Vec::new(),
        })
    }

    /// Builds a simulation around an explicit population. Every agent has to start
    /// inside the boundary.
    pub fn with_agents(id: String, config: SimulationConfig, agents: Vec<Agent>) -> SimulationResult<Self> {
        let mut simulation = Self::new(id, config)?;
        if let Some(index) = agents
            .iter()
            .position(|a| !simulation.boundary.is_within_bounds(a.position()))
        {
            return Err(SimulationError::invalid_config(format!(
                "agent {} starts outside the boundary at {}",
                index,
                agents[index].position()
            )));
        }
        simulation.agents = agents;
        Ok(simulation)
    }

    /// Replaces the population with `params.num_agents` randomly generated agents and
    /// resets the clock.
    pub fn initialize_agents<R: Rng + ?Sized>(&mut self, params: &AgentInitParams, rng: &mut R) -> SimulationResult<()> {
        params.validate()?;

        let margin = params.agent_radius + self.config.boundary_buffer;
        let mut agents = Vec::with_capacity(params.num_agents);
        for _ in 0..params.num_agents {
            let position = Vector2D::new(
                spawn_coordinate(self.boundary.width(), margin, rng),
                spawn_coordinate(self.boundary.height(), margin, rng),
            );
            let heading = rng.gen_range(0.0..TAU);
            let speed = params.speed_range.sample(rng);
            let energy = params.energy_range.sample(rng);
            agents.push(Agent::new(
                position,
                Vector2D::from_polar(heading, speed),
                energy,
                params.agent_radius,
            )?);
        }

        self.agents = agents;
        self.steps_taken = 0;
        self.uncommitted_events.clear();
        self.uncommitted_events.push(SimulationEvent::AgentsInitialized {
            simulation_id: self.id.clone(),
            count: params.num_agents,
            step: 0,
            time: 0.0,
        });
        tracing::debug!("Simulation {} initialized {} agents", self.id, params.num_agents);
        Ok(())
    }

    /// Advances one tick: kinematics, then agent-agent interactions, then boundary
    /// interactions. Each phase runs to completion before the next starts.
    ///
    /// Events left over from the previous tick are dropped first, so after a step
    /// `uncommitted_events` holds only what that step produced.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let step = self.steps_taken + 1;
        let time = step as f64 * self.config.time_step;
        self.uncommitted_events.clear();

        self.update_agents(step, time, rng);
        self.check_interactions(step, time);
        self.check_boundary_collisions(step, time);

        self.steps_taken = step;
    }

    fn update_agents<R: Rng + ?Sized>(&mut self, step: u64, time: f64, rng: &mut R) {
        let dt = self.config.time_step;
        let std_dev = self.config.random_std_dev;
        for (index, agent) in self.agents.iter_mut().enumerate() {
            if agent.update(dt, std_dev, rng) {
                tracing::debug!("Simulation {}: agent {} stopped at t={:.3}", self.id, index, time);
                self.uncommitted_events.push(SimulationEvent::AgentStopped {
                    simulation_id: self.id.clone(),
                    agent: index,
                    step,
                    time,
                });
            }
        }
    }

    fn check_interactions(&mut self, step: u64, time: f64) {
        let radius = self.config.interaction_radius;
        for j in 1..self.agents.len() {
            let (head, tail) = self.agents.split_at_mut(j);
            let second = &mut tail[0];
            for (i, first) in head.iter_mut().enumerate() {
                if !first.can_move() && !second.can_move() {
                    continue;
                }
                if !first.detect_collision(second, radius) {
                    continue;
                }
                let first_position = first.position();
                let second_position = second.position();
                let first_turned = first.interact_with_agent(second_position);
                let second_turned = second.interact_with_agent(first_position);
                if first_turned || second_turned {
                    self.uncommitted_events.push(SimulationEvent::AgentsInteracted {
                        simulation_id: self.id.clone(),
                        first: i,
                        second: j,
                        step,
                        time,
                    });
                }
            }
        }
    }

    fn check_boundary_collisions(&mut self, step: u64, time: f64) {
        let buffer = self.config.boundary_buffer;
        let push = self.config.push_factor;
        for (index, agent) in self.agents.iter_mut().enumerate() {
            let edge = self.boundary.nearest_edge(agent.position());
            let threshold = agent.boundary_threshold(buffer);
            if agent.interact_with_boundary(&self.boundary, threshold, push) {
                self.uncommitted_events.push(SimulationEvent::BoundaryContact {
                    simulation_id: self.id.clone(),
                    agent: index,
                    edge,
                    step,
                    time,
                });
            }
        }
    }

    /// Number of steps `run(duration)` performs: `ceil(duration / time_step)`, ignoring
    /// float noise below `STEP_TOLERANCE` relative to the quotient.
    pub fn steps_for(&self, duration: f64) -> SimulationResult<u64> {
        if !(self.config.time_step.is_finite() && self.config.time_step > 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "time_step must be positive, got {}",
                self.config.time_step
            )));
        }
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "duration must be non-negative, got {}",
                duration
            )));
        }
        let ratio = duration / self.config.time_step;
        Ok((ratio - ratio * STEP_TOLERANCE).ceil() as u64)
    }

    /// Steps the simulation for `duration` seconds measured from now and returns the
    /// number of steps taken.
    pub fn run<R: Rng + ?Sized>(&mut self, duration: f64, rng: &mut R) -> SimulationResult<u64> {
        let steps = self.steps_for(duration)?;
        for _ in 0..steps {
            self.step(rng);
        }
        Ok(steps)
    }

    pub fn current_time(&self) -> f64 {
        self.steps_taken as f64 * self.config.time_step
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn moving_count(&self) -> usize {
        self.agents.iter().filter(|a| a.can_move()).count()
    }

    pub fn get_agent_positions(&self) -> Vec<Vector2D> {
        self.agents.iter().map(Agent::position).collect()
    }

    pub fn get_agent_states(&self) -> Vec<AgentState> {
        self.agents
            .iter()
            .enumerate()
            .map(|(id, agent)| AgentState::from_agent(id, agent))
            .collect()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::capture(self)
    }

    pub fn uncommitted_events(&self) -> &[SimulationEvent] {
        &self.uncommitted_events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }
}

/// Uniform coordinate in `[margin, extent - margin)`, or anywhere on the axis when the
/// margin leaves no room.
fn spawn_coordinate<R: Rng + ?Sized>(extent: f64, margin: f64, rng: &mut R) -> f64 {
    if extent - margin > margin {
        rng.gen_range(margin..extent - margin)
    } else {
        rng.gen_range(0.0..=extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DomainEvent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig {
            boundary_width: 100.0,
            boundary_height: 100.0,
            interaction_radius: 10.0,
            time_step: 1.0,
            random_std_dev: 0.0,
            boundary_buffer: 5.0,
            push_factor: 2.0,
        }
    }

    fn agent(x: f64, y: f64, vx: f64, vy: f64) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::new(vx, vy), 100.0, 0.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad = SimulationConfig { boundary_width: 0.0, ..quiet_config() };
        assert!(matches!(
            Simulation::new("s".into(), bad),
            Err(SimulationError::InvalidConfig { .. })
        ));
        let bad = SimulationConfig { time_step: 0.0, ..quiet_config() };
        assert!(Simulation::new("s".into(), bad).is_err());
    }

    #[test]
    fn test_with_agents_rejects_outside_positions() {
        let res = Simulation::with_agents("s".into(), quiet_config(), vec![agent(150.0, 10.0, 0.0, 0.0)]);
        assert!(matches!(res, Err(SimulationError::InvalidConfig { .. })));
    }

    #[test]
    fn test_interacting_pair_is_recorded_once() {
        let mut sim = Simulation::with_agents(
            "s".into(),
            quiet_config(),
            vec![agent(50.0, 50.0, 1.0, 0.0), agent(55.0, 50.0, -1.0, 0.0)],
        )
        .unwrap();
        sim.step(&mut StdRng::seed_from_u64(0));

        let interactions: Vec<_> = sim
            .uncommitted_events()
            .iter()
            .filter(|e| e.event_type() == "AgentsInteracted")
            .collect();
        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].step(), 1);
        assert_eq!(interactions[0].simulation_id(), "s");

        sim.mark_events_as_committed();
        assert!(sim.uncommitted_events().is_empty());
    }

    #[test]
    fn test_stopped_pair_is_skipped() {
        let stopped = |x: f64| Agent::new(Vector2D::new(x, 50.0), Vector2D::new(1.0, 0.0), 0.0, 0.0).unwrap();
        let mut sim = Simulation::with_agents("s".into(), quiet_config(), vec![stopped(50.0), stopped(52.0)]).unwrap();
        sim.step(&mut StdRng::seed_from_u64(0));
        assert!(sim.uncommitted_events().is_empty());
        assert_eq!(sim.get_agent_positions(), vec![Vector2D::new(50.0, 50.0), Vector2D::new(52.0, 50.0)]);
    }

    #[test]
    fn test_step_keeps_only_its_own_events() {
        let mut sim = Simulation::with_agents(
            "s".into(),
            quiet_config(),
            vec![agent(50.0, 50.0, 0.0, 0.0), agent(55.0, 50.0, 0.0, 0.0)],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for expected_step in 1..=50 {
            sim.step(&mut rng);
            assert!(sim.uncommitted_events().iter().all(|e| e.step() == expected_step));
            assert_eq!(sim.uncommitted_events().len(), 1);
        }
    }

    #[test]
    fn test_steps_for_rounds_up() {
        let sim = Simulation::new("s".into(), SimulationConfig { time_step: 0.5, ..quiet_config() }).unwrap();
        assert_eq!(sim.steps_for(0.0).unwrap(), 0);
        assert_eq!(sim.steps_for(1.0).unwrap(), 2);
        assert_eq!(sim.steps_for(1.0001).unwrap(), 3);

        let sim = Simulation::new("s".into(), SimulationConfig { time_step: 0.3, ..quiet_config() }).unwrap();
        assert_eq!(sim.steps_for(2.1).unwrap(), 7);
        assert_eq!(sim.steps_for(2.1001).unwrap(), 8);
        assert!(sim.steps_for(-1.0).is_err());
        assert!(sim.steps_for(f64::NAN).is_err());
    }

    #[test]
    fn test_spawn_coordinate_respects_margin() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let c = spawn_coordinate(100.0, 20.0, &mut rng);
            assert!((20.0..80.0).contains(&c));
        }
        for _ in 0..500 {
            let c = spawn_coordinate(30.0, 20.0, &mut rng);
            assert!((0.0..=30.0).contains(&c));
        }
    }
}
