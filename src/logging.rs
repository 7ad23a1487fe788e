use std::{
    io::Write,
    sync::{OnceLock, RwLock},
};

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<CliLogger> = OnceLock::new();

pub fn get_logger() -> &'static CliLogger {
    LOGGER.get_or_init(|| CliLogger::new(LevelFilter::Warn))
}

/// Installs the logger, can only succeed once per process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_level(level);
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Writes records to stderr, one line each.
pub struct CliLogger {
    level: RwLock<LevelFilter>,
}

impl CliLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            level: RwLock::new(level),
        }
    }

    pub fn level(&self) -> LevelFilter {
        *self.level.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.level.write().unwrap_or_else(|e| e.into_inner()) = level;
    }
}

fn tag(level: Level) -> colored::ColoredString {
    match level {
        Level::Error => "error".red().bold(),
        Level::Warn => "warn".yellow().bold(),
        Level::Info => "info".green(),
        Level::Debug => "debug".blue(),
        Level::Trace => "trace".dimmed(),
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let target = record.module_path().unwrap_or_else(|| record.target());
        // nowhere left to report a failing stderr
        let _ = writeln!(
            std::io::stderr().lock(),
            "{} {} {}",
            tag(record.level()),
            target.dimmed(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
