use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Sends each report to every sink, in order.
#[derive(Default)]
pub struct FanOutLogger {
    sinks: Vec<DynLogger>,
}

impl FanOutLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }

    pub fn with(mut self, sink: DynLogger) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DomainLogger for FanOutLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }

    fn flush(&self) {
        self.sinks.iter().for_each(|s| s.flush());
    }
}

/// File logger plus `extra` sinks. When the file backend cannot be installed the
/// failure is reported on `fallback`, which is then used alone.
pub fn init_combined_logger(path: &str, level: &str, extra: Vec<DynLogger>, fallback: DynLogger) -> DynLogger {
    match super::file_logger::init_file_logger(path, level) {
        Ok(file_logger) => {
            let mut sinks = vec![file_logger];
            sinks.extend(extra);
            Arc::new(FanOutLogger::new(sinks))
        }
        Err(e) => {
            fallback.warn(&e);
            fallback
        }
    }
}
