//! Error types for GpuWard
//!
//! Every failure is reported synchronously to the immediate caller. The variants
//! follow four categories: construction failures, precondition violations,
//! validation failures and device-reported failures.

use std::fmt;
use crate::device::StageKind;

/// Result type for GpuWard operations
pub type Result<T> = std::result::Result<T, Error>;

/// GpuWard errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The device refused to create an object
    CreationFailed(String),

    /// Operation not legal in the object's current state
    InvalidState(String),

    /// Argument out of range or otherwise unusable
    InvalidArgument(String),

    /// Flag combination or uniform shape rejected before any device call
    ValidationFailed(String),

    /// Shader stage failed to compile
    CompileFailed {
        /// Stage that was being compiled
        stage: StageKind,
        /// Compiler info log
        log: String,
    },

    /// Program failed to link (carries the linker info log)
    LinkFailed(String),

    /// Program linked but failed the device validation pass
    ProgramValidationFailed(String),

    /// Device reported the mapped data store as corrupted on unmap
    DataCorrupted(String),

    /// Backend-specific error (loader, missing entry points, ...)
    BackendError(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Device refused to allocate; the instance is unusable until reset
    Construction,
    /// Wrong phase, bad range or missing object; nothing was changed
    Precondition,
    /// Rejected before any device call was issued
    Validation,
    /// Reported by the device, with its diagnostic text attached
    Device,
}

impl Error {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::CreationFailed(_) => ErrorCategory::Construction,
            Error::InvalidState(_) | Error::InvalidArgument(_) => ErrorCategory::Precondition,
            Error::ValidationFailed(_) => ErrorCategory::Validation,
            Error::CompileFailed { .. }
            | Error::LinkFailed(_)
            | Error::ProgramValidationFailed(_)
            | Error::DataCorrupted(_)
            | Error::BackendError(_) => ErrorCategory::Device,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CreationFailed(msg) => write!(f, "Creation failed: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            Error::CompileFailed { stage, log } => {
                write!(f, "Shader compile failed ({}):\n{}", stage.name(), log)
            }
            Error::LinkFailed(log) => write!(f, "Program link failed:\n{}", log),
            Error::ProgramValidationFailed(log) => write!(f, "Program validation failed:\n{}", log),
            Error::DataCorrupted(msg) => write!(f, "Data corrupted: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error and build the matching [`Error`] variant
///
/// The variant must be one of the single-message variants.
///
/// # Example
///
/// ```no_run
/// # use gpu_ward::ward_err;
/// let err = ward_err!("ward::Buffer", InvalidArgument, "offset {} may not be negative", -4);
/// ```
#[macro_export]
macro_rules! ward_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::ward_error!($source, "{}", message);
        $crate::ward::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function
///
/// # Example
///
/// ```no_run
/// # use gpu_ward::ward_bail;
/// fn check(len: i64) -> gpu_ward::ward::Result<()> {
///     if len <= 0 {
///         ward_bail!("ward::Buffer", InvalidArgument, "length must be greater than 0");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ward_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::ward_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
