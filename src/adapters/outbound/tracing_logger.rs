use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
    }
}

struct Silent;

impl DomainLogger for Silent {
    fn info(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG` or `default_filter`.
///
/// Only the subscriber is installed. The `log` facade is left free so a file backend
/// (fast_log) can still claim it afterwards.
pub fn install_tracing_subscriber(default_filter: &str) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing::subscriber::set_global_default(tracing_subscriber::fmt().with_env_filter(filter).finish())
}

/// Routes reports into whatever `tracing` subscriber is installed.
pub fn init_tracing_logger() -> DynLogger {
    Arc::new(TracingBridge)
}

/// Drops every report.
pub fn init_noop_logger() -> DynLogger {
    Arc::new(Silent)
}
