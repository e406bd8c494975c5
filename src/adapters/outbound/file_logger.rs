use crate::domains::logger::{DynLogger, FileLogger};
use std::sync::Arc;

/// Installs the file backend and hands back a logger the simulation service can take.
pub fn init_file_logger(path: &str, level: &str) -> Result<DynLogger, String> {
    let logger = FileLogger::init(path, level).map_err(|e| format!("Failed to initialize fast_log for {}: {}", path, e))?;
    Ok(Arc::new(logger))
}
