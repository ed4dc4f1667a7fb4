//! Logger setup.
//!
//! The terminal belongs to the widget while it runs, so log records never go
//! to stdout or stderr. With `--log-file` they are appended to that file;
//! without it no logger is installed and the `log` macros are no-ops.

use crate::config::Config;
use crate::error::{Error, Result};
use env_logger::{Builder, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Installs the global logger described by `config`.
///
/// Returns `Ok(false)` when no log file was requested.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(false);
    };

    builder(path, config)?.try_init()?;
    log::debug!("logging to {}", path.display());
    Ok(true)
}

fn builder(path: &Path, config: &Config) -> Result<Builder> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let mut builder = Builder::new();
    builder
        .filter_level(config.log_level())
        .parse_default_env()
        .format_timestamp_secs()
        .target(Target::Pipe(Box::new(file)));
    Ok(builder)
}
