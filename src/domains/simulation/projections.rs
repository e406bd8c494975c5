// Read models handed to consumers after a step. Always copies, never live references.
use super::aggregate::Simulation;
use crate::domains::agent::Agent;
use crate::domains::geometry::Vector2D;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: usize,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub energy: f64,
    pub movement_time: f64,
    pub is_moving: bool,
}

impl AgentState {
    pub fn from_agent(id: usize, agent: &Agent) -> Self {
        Self {
            id,
            position: agent.position(),
            velocity: agent.velocity(),
            energy: agent.energy(),
            movement_time: agent.movement_time(),
            is_moving: agent.can_move(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub simulation_id: String,
    pub step: u64,
    pub time: f64,
    pub agents: Vec<AgentState>,
}

impl SimulationSnapshot {
    pub fn capture(simulation: &Simulation) -> Self {
        Self {
            simulation_id: simulation.id.clone(),
            step: simulation.steps_taken(),
            time: simulation.current_time(),
            agents: simulation.get_agent_states(),
        }
    }

    pub fn moving_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_moving).count()
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
