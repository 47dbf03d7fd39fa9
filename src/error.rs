//! Errors surfaced by desktop setup and the terminal loop.
//!
//! The window manager itself never fails; everything here comes from the
//! host side (terminal I/O, command-line validation, log file setup).

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot open log file {}: {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DeskResult<T> = Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_part() {
        let err = DeskError::Log {
            path: PathBuf::from("/nope/desk.log"),
            source: std::io::Error::other("denied"),
        };
        assert_eq!(err.to_string(), "cannot open log file /nope/desk.log: denied");
        let err: DeskError = ConfigError::PollInterval(0).into();
        assert!(err.to_string().starts_with("invalid configuration: "));
    }
}
