use crate::common::{SimulationError, SimulationResult};
use crate::domains::geometry::{Boundary, Vector2D};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Two-state movement machine. `Stopped` is terminal under the current energy model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementState {
    Moving,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    position: Vector2D,
    velocity: Vector2D,
    /// Total movement time the agent may spend before stopping for good.
    energy: f64,
    movement_time: f64,
    radius: f64,
    state: MovementState,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D, energy: f64, radius: f64) -> SimulationResult<Self> {
        if !(energy.is_finite() && energy >= 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "agent energy must be non-negative, got {}",
                energy
            )));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "agent radius must be non-negative, got {}",
                radius
            )));
        }

        let state = if energy > 0.0 {
            MovementState::Moving
        } else {
            MovementState::Stopped
        };

        Ok(Self {
            position,
            velocity,
            energy,
            movement_time: 0.0,
            radius,
            state,
        })
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn movement_time(&self) -> f64 {
        self.movement_time
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn can_move(&self) -> bool {
        self.state == MovementState::Moving
    }

    /// Distance from the nearest edge at which this agent starts reacting to the boundary.
    pub fn boundary_threshold(&self, buffer: f64) -> f64 {
        self.radius + buffer
    }

    /// Advances the agent by one tick. Returns true when this call used up the
    /// remaining energy and the agent stopped.
    pub fn update<R: Rng + ?Sized>(&mut self, delta_time: f64, std_dev: f64, rng: &mut R) -> bool {
        if self.state == MovementState::Stopped {
            return false;
        }

        self.velocity = self.velocity.add_randomness(std_dev, rng);
        self.position = self.position + self.velocity * delta_time;
        self.movement_time += delta_time;

        if self.movement_time >= self.energy {
            // velocity is kept as-is, it just stops being applied
            self.state = MovementState::Stopped;
            return true;
        }
        false
    }

    /// Strict proximity test; the caller guarantees `other` is a different agent.
    pub fn detect_collision(&self, other: &Agent, radius: f64) -> bool {
        self.position.distance_to(other.position) < radius
    }

    /// Turns the velocity a quarter counter-clockwise from the radial direction towards
    /// `other_position`, keeping the speed. Stopped agents and coincident positions
    /// are left alone. Returns true when the velocity was rewritten.
    pub fn interact_with_agent(&mut self, other_position: Vector2D) -> bool {
        if !self.can_move() {
            return false;
        }
        let radial = match (other_position - self.position).normalize() {
            Ok(direction) => direction,
            Err(_) => return false,
        };
        let speed = self.velocity.magnitude();
        self.velocity = radial.perpendicular() * speed;
        true
    }

    /// Redirects the velocity along the boundary tangent and nudges the agent inward
    /// when it is within `threshold` of an edge. A stopped agent is only clamped back
    /// inside. Returns true when the agent was near the boundary.
    pub fn interact_with_boundary(&mut self, boundary: &Boundary, threshold: f64, push_factor: f64) -> bool {
        if !boundary.is_near_boundary(self.position, threshold) {
            return false;
        }

        if !self.can_move() {
            self.position = boundary.clamp(self.position);
            return true;
        }

        let tangent = boundary.get_tangent_at_point(self.position);
        let normal = boundary.get_normal_at_point(self.position);
        self.velocity = tangent * self.velocity.magnitude();
        self.position = boundary.clamp(boundary.clamp(self.position) + normal * push_factor);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn moving_agent(x: f64, y: f64, vx: f64, vy: f64) -> Agent {
        Agent::new(Vector2D::new(x, y), Vector2D::new(vx, vy), 10.0, 1.0).unwrap()
    }

    #[test]
    fn test_initial_state_follows_energy() {
        let a = Agent::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0), 0.0, 1.0).unwrap();
        assert_eq!(a.state(), MovementState::Stopped);
        let b = Agent::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0), 0.1, 1.0).unwrap();
        assert_eq!(b.state(), MovementState::Moving);
    }

    #[test]
    fn test_rejects_negative_energy_and_radius() {
        assert!(Agent::new(Vector2D::ZERO, Vector2D::ZERO, -1.0, 1.0).is_err());
        assert!(Agent::new(Vector2D::ZERO, Vector2D::ZERO, 1.0, -1.0).is_err());
    }

    #[test]
    fn test_update_moves_and_stops_on_energy() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut a = Agent::new(Vector2D::new(10.0, 10.0), Vector2D::new(2.0, 0.0), 1.0, 1.0).unwrap();

        assert!(!a.update(0.5, 0.0, &mut rng));
        assert_eq!(a.position(), Vector2D::new(11.0, 10.0));
        assert!(a.can_move());

        assert!(a.update(0.5, 0.0, &mut rng));
        assert_eq!(a.position(), Vector2D::new(12.0, 10.0));
        assert_eq!(a.state(), MovementState::Stopped);
        assert_eq!(a.velocity(), Vector2D::new(2.0, 0.0));

        // stopped is terminal
        assert!(!a.update(0.5, 1.0, &mut rng));
        assert_eq!(a.position(), Vector2D::new(12.0, 10.0));
        assert_eq!(a.movement_time(), 1.0);
    }

    #[test]
    fn test_update_persists_noise_into_velocity() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut a = moving_agent(50.0, 50.0, 1.0, 1.0);
        a.update(0.1, 0.5, &mut rng);
        assert_ne!(a.velocity(), Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn test_detect_collision_is_strict() {
        let a = moving_agent(0.0, 0.0, 1.0, 0.0);
        let b = moving_agent(3.0, 4.0, 1.0, 0.0);
        assert!(!a.detect_collision(&b, 5.0));
        assert!(a.detect_collision(&b, 5.0001));
        assert!(b.detect_collision(&a, 5.0001));
    }

    #[test]
    fn test_interaction_turns_tangential_and_keeps_speed() {
        let mut a = moving_agent(0.0, 0.0, 3.0, 0.0);
        assert!(a.interact_with_agent(Vector2D::new(2.0, 0.0)));
        // radial (1, 0) rotated +90 degrees, scaled by speed 3
        assert_eq!(a.velocity(), Vector2D::new(-0.0, 3.0));
    }

    #[test]
    fn test_interaction_skips_stopped_and_coincident() {
        let mut stopped = Agent::new(Vector2D::ZERO, Vector2D::new(1.0, 0.0), 0.0, 1.0).unwrap();
        assert!(!stopped.interact_with_agent(Vector2D::new(1.0, 1.0)));
        assert_eq!(stopped.velocity(), Vector2D::new(1.0, 0.0));

        let mut a = moving_agent(5.0, 5.0, 1.0, 0.0);
        assert!(!a.interact_with_agent(Vector2D::new(5.0, 5.0)));
        assert_eq!(a.velocity(), Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_boundary_interaction_redirects_and_pushes() {
        let boundary = Boundary::new(100.0, 100.0).unwrap();
        let mut a = moving_agent(2.0, 50.0, -4.0, 0.0);
        assert!(a.interact_with_boundary(&boundary, 5.0, 2.0));
        assert_eq!(a.velocity(), Vector2D::new(-0.0, 4.0));
        assert_eq!(a.position(), Vector2D::new(4.0, 50.0));
    }

    #[test]
    fn test_boundary_interaction_brings_outside_agent_back() {
        let boundary = Boundary::new(100.0, 100.0).unwrap();
        let mut a = moving_agent(-4.0, -4.0, -5.0, -5.0);
        assert!(a.interact_with_boundary(&boundary, 5.0, 2.0));
        assert!(boundary.is_within_bounds(a.position()));
        assert_eq!(a.position(), Vector2D::new(2.0, 0.0));
    }

    #[test]
    fn test_boundary_interaction_ignores_far_agents() {
        let boundary = Boundary::new(100.0, 100.0).unwrap();
        let mut a = moving_agent(50.0, 50.0, 1.0, 1.0);
        assert!(!a.interact_with_boundary(&boundary, 5.0, 2.0));
        assert_eq!(a.position(), Vector2D::new(50.0, 50.0));
        assert_eq!(a.velocity(), Vector2D::new(1.0, 1.0));
    }

    #[test]
    fn test_stopped_agent_is_only_clamped() {
        let boundary = Boundary::new(100.0, 100.0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut a = Agent::new(Vector2D::new(1.0, 50.0), Vector2D::new(-3.0, 0.0), 0.5, 1.0).unwrap();
        assert!(a.update(1.0, 0.0, &mut rng));
        assert_eq!(a.position(), Vector2D::new(-2.0, 50.0));

        assert!(a.interact_with_boundary(&boundary, 5.0, 2.0));
        assert_eq!(a.position(), Vector2D::new(0.0, 50.0));
        assert_eq!(a.velocity(), Vector2D::new(-3.0, 0.0));
    }
}
