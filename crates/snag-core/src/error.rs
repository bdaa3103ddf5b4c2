//! # Error Types
//!
//! Errors for the fallible plumbing around checks.
//!
//! A failed check is never an error value: it is reported and execution
//! continues. These variants cover the operations that *can* fail, mostly the
//! platform query asking whether a debugger is attached.
//!
//! We use `thiserror` to generate the `Error` trait implementations.

use thiserror::Error;

/// Main error type for snag operations
///
/// ## Error Categories
///
/// 1. **Probe errors**: ProbeFailed, Unsupported
/// 2. **Input errors**: InvalidArgument
/// 3. **I/O errors**: Io (reading `/proc`, writing reports)
#[derive(Error, Debug)]
pub enum SnagError
{
    /// The OS query for debugger attachment returned an error
    ///
    /// On macOS this wraps a failed `proc_pidinfo()` call; on Linux a
    /// `/proc/self/status` without a parsable `TracerPid` line.
    #[error("Debugger probe failed: {0}")]
    ProbeFailed(String),

    /// The current platform has no way to answer the question asked
    #[error("Unsupported on this platform: {0}")]
    Unsupported(&'static str),

    /// Invalid argument passed to a snag function
    ///
    /// Examples:
    /// - A merged view width other than 8, 16 or 32
    /// - A numeric literal that does not parse
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error (for reading procfs, writing to a report sink, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, SnagError>`
///
/// ```rust
/// use snag_core::error::SnagResult;
/// fn foo() -> SnagResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type SnagResult<T> = std::result::Result<T, SnagError>;
