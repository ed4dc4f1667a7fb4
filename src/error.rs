//! Error types for the parts of the widget that touch the outside world.
//!
//! Timer and tree operations clamp their inputs and never fail; only setup
//! (log file, terminal program) can.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or running the widget.
#[derive(Debug, Error)]
pub enum Error {
    /// The log file could not be opened for appending.
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A global logger was already installed.
    #[error("logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// The terminal program failed to start or exited with an error.
    #[error("terminal program failed: {0}")]
    Program(#[from] bubbletea_rs::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_program_errors_convert_with_question_mark() {
        fn run() -> Result<()> {
            Err::<(), bubbletea_rs::Error>(io::Error::new(io::ErrorKind::Other, "tty gone").into())?;
            Ok(())
        }

        let err = run().unwrap_err();
        assert!(matches!(err, Error::Program(_)));
        assert!(err.to_string().starts_with("terminal program failed: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_log_file_error_keeps_io_source() {
        let err = Error::LogFile {
            path: PathBuf::from("/nonexistent/widget.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };

        assert_eq!(
            err.to_string(),
            "cannot open log file /nonexistent/widget.log: no such directory"
        );
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no such directory"));
    }
}
