//! # procfs Debug Host
//!
//! Linux (and anything else exposing a Linux-style `/proc`) reports the pid
//! of the tracing process in the `TracerPid:` line of `/proc/self/status`.
//! Zero means nobody is tracing us.
//!
//! The break raises `SIGINT`, which gdb and lldb both stop on.
//!
//! ## Caveat
//!
//! Any tracer sets `TracerPid`, not only debuggers. Under `strace` or a
//! similar tool a failed check counts as attached, the tracer passes the
//! `SIGINT` straight through, and the default action terminates the
//! process. Build with `disable-breakpoints` (or install a [`Reporter`]
//! with breakpoints off) when running under such tools.
//!
//! [`Reporter`]: crate::report::Reporter

use std::fs;
use std::io;

use tracing::trace;

use crate::debugger::DebugHost;
use crate::error::{SnagError, SnagResult};

const STATUS_PATH: &str = "/proc/self/status";

/// Debug host backed by `/proc/self/status`
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

impl NativeHost
{
    /// Pid of the process tracing us, if any
    ///
    /// ## Errors
    ///
    /// `Unsupported` when procfs is not mounted, `ProbeFailed` when the status
    /// file has no usable `TracerPid` line.
    pub fn tracer_pid(&self) -> SnagResult<Option<u32>>
    {
        let status = match fs::read_to_string(STATUS_PATH) {
            Ok(status) => status,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SnagError::Unsupported("no /proc/self/status on this system"));
            }
            Err(e) => return Err(e.into()),
        };
        let tracer = parse_tracer_pid(&status)?;
        trace!(?tracer, "read TracerPid");
        Ok(tracer)
    }
}

impl DebugHost for NativeHost
{
    fn is_attached(&self) -> SnagResult<bool>
    {
        Ok(self.tracer_pid()?.is_some())
    }

    fn trigger_break(&self)
    {
        // SAFETY: raising a signal on the current thread is always sound.
        unsafe {
            libc::raise(libc::SIGINT);
        }
    }
}

/// Extract the `TracerPid` value from the contents of a status file
///
/// Returns `None` for `TracerPid: 0`.
///
/// ## Errors
///
/// `ProbeFailed` if the line is missing or its value is not a number.
pub fn parse_tracer_pid(status: &str) -> SnagResult<Option<u32>>
{
    let value = status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .ok_or_else(|| SnagError::ProbeFailed("no TracerPid line in process status".to_string()))?;

    let pid = value
        .trim()
        .parse::<u32>()
        .map_err(|e| SnagError::ProbeFailed(format!("bad TracerPid value {:?}: {e}", value.trim())))?;

    Ok((pid != 0).then_some(pid))
}
