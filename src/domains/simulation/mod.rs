pub mod aggregate;
pub mod events;
pub mod parameters;
pub mod projections;

pub use aggregate::*;
pub use events::*;
pub use parameters::*;
pub use projections::*;
