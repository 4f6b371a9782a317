//! Stderr logger for the CLI and tests.
//!
//! Prints one line per record with the time since startup, so slow scans are
//! visible in batch runs. Install once with [`init_with_level`]; later calls
//! are no-ops.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger {
    max_level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Targets only matter when digging; keep info lines short.
        let line = if record.level() <= log::Level::Info {
            format!("{}", record.args())
        } else {
            format!("{}: {}", record.target(), record.args())
        };

        let _ = writeln!(
            std::io::stderr(),
            "{:8.3}s {:5} {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            line
        );
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger at the given level filter.
pub fn init_with_level(max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            max_level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(max_level);
    }
    Ok(())
}
