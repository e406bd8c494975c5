use crate::common::SimulationResult;
use crate::domains::simulation::{AgentInitParams, SimulationConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub agents: AgentInitParams,
    pub run: RunConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulated seconds to run for.
    pub duration: f64,
    /// Fixed seed for reproducible runs; fresh entropy when absent.
    pub seed: Option<u64>,
    /// How many progress lines to report over a run.
    pub progress_intervals: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration: 25.0,
            seed: None,
            progress_intervals: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Optional report file written through fast_log.
    pub file: Option<String>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Same checks the simulation constructors run, done up front so a bad file
    /// fails before anything is built.
    pub fn validate(&self) -> SimulationResult<()> {
        self.simulation.validate()?;
        crate::domains::geometry::Boundary::new(
            self.simulation.boundary_width,
            self.simulation.boundary_height,
        )?;
        self.agents.validate()?;
        if !(self.run.duration.is_finite() && self.run.duration >= 0.0) {
            return Err(crate::common::SimulationError::invalid_config(format!(
                "run duration must be non-negative, got {}",
                self.run.duration
            )));
        }
        Ok(())
    }
}
