//! Run logging to terminal and file
//!
//! Log lines go to stderr and to `logs/docscout.log` (appended across runs)
//! so fetch failures and discrepancy findings leave a trail after the
//! terminal scrolls away.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::Path;

const LOG_FILE: &str = "docscout.log";

/// Initialize the combined terminal+file logger. Falls back to the terminal
/// alone if the log file cannot be opened.
pub fn init(log_dir: &Path) {
    let level = LevelFilter::Info;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    match open_log_file(log_dir) {
        Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
        Err(err) => eprintln!("Warning: could not open log file: {}", err),
    }

    let _ = CombinedLogger::init(loggers);
}

fn open_log_file(log_dir: &Path) -> std::io::Result<fs::File> {
    fs::create_dir_all(log_dir)?;
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_dir.join(LOG_FILE))
}
