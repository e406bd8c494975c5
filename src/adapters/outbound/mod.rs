pub mod fan_out_logger;
pub mod file_logger;
pub mod tracing_logger;

pub use fan_out_logger::*;
pub use file_logger::*;
pub use tracing_logger::*;
