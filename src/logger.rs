//! Console logger behind the [`log`] facade.
//!
//! Each record is printed as `LEVEL [uptime] target - message`, where uptime
//! is the time since the logger was installed:
//!
//! ```text
//! INFO [2s 340ms] tune_rs::input_loop - Lateral kP: 11.00
//! WARN [2s 410ms] tune_rs::display_loop - Display write failed: I2C error: ...
//! ```

use std::{sync::OnceLock, time::Duration, time::Instant};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

pub struct TuneLogger {
    started: Instant,
}

impl TuneLogger {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since start, truncated to whole milliseconds.
    fn uptime(&self) -> FormattedDuration {
        let elapsed = self.started.elapsed();
        format_duration(Duration::from_millis(elapsed.as_millis() as u64))
    }
}

impl log::Log for TuneLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "{} [{}] {} - {}",
                record.level(),
                self.uptime(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        use std::io::Write;
        let _ = std::io::stdout().flush();
    }
}

static LOGGER: OnceLock<TuneLogger> = OnceLock::new();

/// Installs the console logger. Must be called once before logging.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(TuneLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
