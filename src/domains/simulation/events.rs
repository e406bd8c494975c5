use crate::common::DomainEvent;
use crate::domains::geometry::Edge;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    AgentsInitialized {
        simulation_id: String,
        count: usize,
        step: u64,
        time: f64,
    },
    AgentStopped {
        simulation_id: String,
        agent: usize,
        step: u64,
        time: f64,
    },
    AgentsInteracted {
        simulation_id: String,
        first: usize,
        second: usize,
        step: u64,
        time: f64,
    },
    BoundaryContact {
        simulation_id: String,
        agent: usize,
        edge: Edge,
        step: u64,
        time: f64,
    },
}

impl DomainEvent for SimulationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SimulationEvent::AgentsInitialized { .. } => "AgentsInitialized",
            SimulationEvent::AgentStopped { .. } => "AgentStopped",
            SimulationEvent::AgentsInteracted { .. } => "AgentsInteracted",
            SimulationEvent::BoundaryContact { .. } => "BoundaryContact",
        }
    }

    fn simulation_id(&self) -> &str {
        match self {
            SimulationEvent::AgentsInitialized { simulation_id, .. } => simulation_id,
            SimulationEvent::AgentStopped { simulation_id, .. } => simulation_id,
            SimulationEvent::AgentsInteracted { simulation_id, .. } => simulation_id,
            SimulationEvent::BoundaryContact { simulation_id, .. } => simulation_id,
        }
    }

    fn step(&self) -> u64 {
        match self {
            SimulationEvent::AgentsInitialized { step, .. } => *step,
            SimulationEvent::AgentStopped { step, .. } => *step,
            SimulationEvent::AgentsInteracted { step, .. } => *step,
            SimulationEvent::BoundaryContact { step, .. } => *step,
        }
    }

    fn occurred_at(&self) -> f64 {
        match self {
            SimulationEvent::AgentsInitialized { time, .. } => *time,
            SimulationEvent::AgentStopped { time, .. } => *time,
            SimulationEvent::AgentsInteracted { time, .. } => *time,
            SimulationEvent::BoundaryContact { time, .. } => *time,
        }
    }
}
