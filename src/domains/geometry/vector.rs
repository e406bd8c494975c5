use crate::common::{SimulationError, SimulationResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Plain 2D value type used for positions, velocities and directions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of length `magnitude` pointing at `angle` radians from the +x axis.
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        Self::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }

    pub fn add(self, other: Vector2D) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Vector2D) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction. Zero-length input is an error, never a
    /// silently substituted direction.
    pub fn normalize(self) -> SimulationResult<Self> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(SimulationError::DegenerateVector);
        }
        Ok(Self::new(self.x / mag, self.y / mag))
    }

    pub fn distance_to(self, other: Vector2D) -> f64 {
        self.sub(other).magnitude()
    }

    pub fn dot(self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::new(self.x * cos_a - self.y * sin_a, self.x * sin_a + self.y * cos_a)
    }

    /// Exact counter-clockwise quarter turn, i.e. `rotate(PI / 2)` without rounding.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Adds independent N(0, std_dev) noise to each component. A zero deviation
    /// returns `self` untouched and consumes nothing from `rng`.
    pub fn add_randomness<R: Rng + ?Sized>(self, std_dev: f64, rng: &mut R) -> Self {
        if std_dev == 0.0 {
            return self;
        }
        let dx = gaussian(rng) * std_dev;
        let dy = gaussian(rng) * std_dev;
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Standard normal sample via Box-Muller.
fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

impl std::ops::Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector2D::add(self, rhs)
    }
}

impl std::ops::Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector2D::sub(self, rhs)
    }
}

impl std::ops::Mul<f64> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
