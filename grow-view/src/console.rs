//! In-window log console.
//!
//! [`ConsoleLogger`] is the process-wide `log` backend of the viewer. It
//! timestamps each record and appends it to a shared [`Console`], which
//! the bottom panel renders.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

const MAX_LINES: usize = 500;

/// Crates whose records reach the console; GUI backend chatter is dropped.
const TARGETS: [&str; 2] = ["grow_core", "grow_view"];

/// Cloneable handle to a bounded list of console lines.
#[derive(Clone, Debug, Default)]
pub struct Console {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl Console {
    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == MAX_LINES {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Snapshot of the current lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

pub struct ConsoleLogger {
    console: Console,
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(console: Console, level: LevelFilter) -> Self {
        Self { console, level }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && TARGETS.iter().any(|t| metadata.target().starts_with(t))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let stamp = chrono::Local::now().format("%H:%M:%S");
        let line = match record.level() {
            Level::Info => format!("{stamp} {}", record.args()),
            level => format!("{stamp} [{level}] {}", record.args()),
        };
        if record.level() <= Level::Warn {
            eprintln!("{line}");
        }
        self.console.push(line);
    }

    fn flush(&self) {}
}

/// Installs a [`ConsoleLogger`] feeding `console` as the global logger.
pub fn install(console: Console, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger::new(console, level)))?;
    log::set_max_level(level);
    Ok(())
}
