use std::env;
use std::fs::OpenOptions;

use anyhow::{Context, Result};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::LOG_ENV;

/// Logs to the file named by `GAME_CONSOLE_LOG`, if set. The screen
/// belongs to the game, so there is no terminal logger. Returns whether a
/// logger was installed.
pub fn init() -> Result<bool> {
    let path = match env::var_os(LOG_ENV) {
        Some(path) if !path.is_empty() => path,
        _ => return Ok(false),
    };

    // The launcher and the games it starts share one file
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Error opening log file {:?}", path))?;

    WriteLogger::init(LevelFilter::Debug, Config::default(), file).context("Error installing logger")?;
    Ok(true)
}
