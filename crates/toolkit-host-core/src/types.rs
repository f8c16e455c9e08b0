// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Type definitions

use std::fmt;
use std::path::PathBuf;

/// Terminal result of a toolkit run.
///
/// Matches the toolkit's exported error-code enum: the entry point returns
/// one of exactly these two values as a 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum RunStatus {
    Failed = 0,
    Succeeded = 1,
}

impl RunStatus {
    /// Decode a raw status integer returned by the toolkit.
    ///
    /// Anything outside the two defined values is surfaced as
    /// [`HostError::UnexpectedStatus`] rather than coerced into one of them.
    pub fn from_raw(raw: i32) -> Result<Self, HostError> {
        match raw {
            0 => Ok(Self::Failed),
            1 => Ok(Self::Succeeded),
            other => Err(HostError::UnexpectedStatus(other)),
        }
    }

    /// The wire value of this status.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed => write!(f, "failed"),
            Self::Succeeded => write!(f, "succeeded"),
        }
    }
}

/// Error types for the host
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The toolkit library could not be opened. Distinct from the toolkit
    /// itself reporting [`RunStatus::Failed`] on exit.
    #[error("Failed to load toolkit library {path:?}: {source}")]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("Toolkit library has no `{symbol}` entry point: {source}")]
    EntryMissing {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("Program name cannot cross the C boundary: {0}")]
    InvalidProgramName(#[from] std::ffi::NulError),

    #[error("Toolkit returned an undefined status code: {0}")]
    UnexpectedStatus(i32),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::FileIo(err.to_string())
    }
}
