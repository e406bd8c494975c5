use crate::common::{SimulationError, SimulationResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Scalar settings that stay fixed for the lifetime of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub boundary_width: f64,
    pub boundary_height: f64,
    /// Agents closer than this (strictly) interact.
    pub interaction_radius: f64,
    pub time_step: f64,
    /// Standard deviation of the per-tick Gaussian velocity noise.
    pub random_std_dev: f64,
    /// Added to an agent's radius to get its boundary reaction distance.
    pub boundary_buffer: f64,
    /// How far an agent is pushed inward after touching the boundary.
    pub push_factor: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            boundary_width: 800.0,
            boundary_height: 600.0,
            interaction_radius: 50.0,
            time_step: 0.1,
            random_std_dev: 0.5,
            boundary_buffer: 15.0,
            push_factor: 2.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> SimulationResult<()> {
        // boundary dimensions are checked by Boundary::new
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        non_negative("interaction_radius", self.interaction_radius)?;
        non_negative("random_std_dev", self.random_std_dev)?;
        non_negative("boundary_buffer", self.boundary_buffer)?;
        non_negative("push_factor", self.push_factor)?;
        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> SimulationResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid_config(format!(
            "{} must be non-negative, got {}",
            name, value
        )))
    }
}

/// Closed interval `[min, max]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, name: &str) -> SimulationResult<()> {
        let well_formed = self.min.is_finite()
            && self.max.is_finite()
            && self.min >= 0.0
            && self.min <= self.max;
        if well_formed {
            Ok(())
        } else {
            Err(SimulationError::InvalidRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

/// How a fresh population is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentInitParams {
    pub num_agents: usize,
    /// Movement time budget per agent, in seconds.
    pub energy_range: ValueRange,
    pub speed_range: ValueRange,
    pub agent_radius: f64,
}

impl Default for AgentInitParams {
    fn default() -> Self {
        Self {
            num_agents: 20,
            energy_range: ValueRange::new(5.0, 20.0),
            speed_range: ValueRange::new(10.0, 30.0),
            agent_radius: 5.0,
        }
    }
}

impl AgentInitParams {
    pub fn validate(&self) -> SimulationResult<()> {
        if self.num_agents == 0 {
            return Err(SimulationError::invalid_config("num_agents must be at least 1"));
        }
        self.energy_range.validate("energy_range")?;
        self.speed_range.validate("speed_range")?;
        non_negative("agent_radius", self.agent_radius)
    }
}
