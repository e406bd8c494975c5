use super::vector::Vector2D;
use crate::common::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `[0, width] x [0, height]` the agents live in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

impl Boundary {
    pub fn new(width: f64, height: f64) -> SimulationResult<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "boundary width must be positive, got {}",
                width
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "boundary height must be positive, got {}",
                height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn min_x(&self) -> f64 {
        0.0
    }

    pub fn max_x(&self) -> f64 {
        self.width
    }

    pub fn min_y(&self) -> f64 {
        0.0
    }

    pub fn max_y(&self) -> f64 {
        self.height
    }

    pub fn is_within_bounds(&self, p: Vector2D) -> bool {
        self.min_x() <= p.x && p.x <= self.max_x() && self.min_y() <= p.y && p.y <= self.max_y()
    }

    /// True when `p` is within `threshold` of an edge. Points outside the
    /// rectangle are always near.
    pub fn is_near_boundary(&self, p: Vector2D, threshold: f64) -> bool {
        if !self.is_within_bounds(p) {
            return true;
        }
        self.distance_to_edge(p, self.nearest_edge(p)) <= threshold
    }

    /// Edge closest to `p`. Ties go to Left, then Right, Bottom, Top.
    pub fn nearest_edge(&self, p: Vector2D) -> Edge {
        let mut best = Edge::Left;
        let mut best_dist = self.distance_to_edge(p, Edge::Left);
        for edge in [Edge::Right, Edge::Bottom, Edge::Top] {
            let dist = self.distance_to_edge(p, edge);
            if dist < best_dist {
                best = edge;
                best_dist = dist;
            }
        }
        best
    }

    fn distance_to_edge(&self, p: Vector2D, edge: Edge) -> f64 {
        match edge {
            Edge::Left => (p.x - self.min_x()).abs(),
            Edge::Right => (p.x - self.max_x()).abs(),
            Edge::Bottom => (p.y - self.min_y()).abs(),
            Edge::Top => (p.y - self.max_y()).abs(),
        }
    }

    /// Inward unit normal of the nearest edge.
    pub fn get_normal_at_point(&self, p: Vector2D) -> Vector2D {
        match self.nearest_edge(p) {
            Edge::Left => Vector2D::new(1.0, 0.0),
            Edge::Right => Vector2D::new(-1.0, 0.0),
            Edge::Bottom => Vector2D::new(0.0, 1.0),
            Edge::Top => Vector2D::new(0.0, -1.0),
        }
    }

    /// The inward normal turned a quarter counter-clockwise.
    pub fn get_tangent_at_point(&self, p: Vector2D) -> Vector2D {
        self.get_normal_at_point(p).perpendicular()
    }

    pub fn clamp(&self, p: Vector2D) -> Vector2D {
        Vector2D::new(
            p.x.clamp(self.min_x(), self.max_x()),
            p.y.clamp(self.min_y(), self.max_y()),
        )
    }
}
