//! Exit status codes for the CLI
//!
//! postforge follows standard Unix exit code conventions:
//! - 0: Success
//! - 1: Any error (bad input tree, unwritable output directory, etc.)
//!
//! Recoverable per-file problems never reach the process boundary; they are
//! collected and reported while the batch continues.

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution
    Success = 0,
    /// Any uncaught top-level failure
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}
