//! Logging setup for the `log` facade.
//!
//! Builds a [`fern`] dispatcher from the `[logging]` config section: stdout
//! always, plus an optional log file.

use anyhow::{Context, Result};

use crate::config::LoggingConfig;

/// Install the global logger. A no-op when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let level = config
        .level
        .parse::<log::LevelFilter>()
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = &config.file {
        let file = fern::log_file(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().context("Failed to install logger")?;
    Ok(())
}
