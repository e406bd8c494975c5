pub mod agent;
pub mod geometry;
pub mod logger;
pub mod simulation;

pub use agent::*;
pub use geometry::*;
pub use logger::*;
pub use simulation::*;
