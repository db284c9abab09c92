use crate::mapper::MapError;
use std::fmt::{self, Debug, Display};
use std::io;

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Returned from `main` so startup failures print with `Display` instead of `Debug`.
pub struct DisplayError(Error);

impl Debug for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T: Into<Error>> From<T> for DisplayError {
    fn from(display: T) -> Self {
        DisplayError(display.into())
    }
}

/// Startup errors while turning command-line rules into a mapping table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("got {from} --from patterns but {to} --to targets, they must pair up")]
    MismatchedRules { from: usize, to: usize },
    #[error("rule #{index} ({pattern:?}): {source}")]
    Mapping {
        index: usize,
        pattern: String,
        source: MapError,
    },
}

/// Errors on an accepted-then-dropped connection; the listener itself is still usable.
pub fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}
