use chrono::Utc;
use std::sync::Arc;

/// Reporting port for simulation progress. Infallible from the caller's side.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);

    /// Pushes buffered reports to their destination. Unbuffered sinks ignore it.
    fn flush(&self) {}
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// Report sink backed by a `fast_log` file appender.
pub struct FileLogger;

impl FileLogger {
    /// Claims the global `log` facade for `path`. Fails when another `log` backend is
    /// already installed. Unknown `level` names mean info.
    pub fn init(path: &str, level: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let filter = level.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info);
        fast_log::init(fast_log::config::Config::new().file(path).level(filter))?;
        Ok(Self)
    }

    fn write(&self, level: log::Level, msg: &str) {
        log::log!(level, "[{}] {}", Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"), msg);
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        self.write(log::Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.write(log::Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.write(log::Level::Error, msg);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}
