use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid range for {name}: min {min}, max {max}")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Cannot normalize a zero-length vector")]
    DegenerateVector,
}

impl SimulationError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SimulationError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
