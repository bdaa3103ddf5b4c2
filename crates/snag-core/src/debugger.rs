//! # Debug Host Trait
//!
//! The capability a failed check needs from its environment: "is a debugger
//! watching this process?" and "stop here".
//!
//! Each platform implements this trait with its own system APIs:
//!
//! - **macOS / iOS**: `proc_pidinfo()` traced flag, `int3` / `brk` / `SIGINT`
//! - **Linux and other procfs systems**: `TracerPid` in `/proc/self/status`, `SIGINT`
//! - **Windows**: `IsDebuggerPresent()`, `DebugBreak()`
//!
//! ## Why use a trait?
//!
//! Check macros only ever talk to a [`DebugHost`]. Tests swap in a host that
//! records break requests instead of executing a trap instruction (see
//! [`crate::report::scoped`]).

use tracing::{debug, trace, warn};

use crate::error::SnagResult;
pub use crate::platform::NativeHost;

/// Debugger attachment query and breakpoint trigger
pub trait DebugHost
{
    /// Ask the OS whether a debugger is attached to the current process
    ///
    /// This is a synchronous, read-only query. It is repeated every time it is
    /// needed because a debugger can attach or detach at any moment.
    ///
    /// ## Errors
    ///
    /// Returns an error if the platform query fails or the platform has no
    /// such query.
    fn is_attached(&self) -> SnagResult<bool>;

    /// Stop the process as if a breakpoint were hit
    ///
    /// Callers are expected to check [`DebugHost::is_attached`] first: with no
    /// debugger present the trap is delivered to the process itself.
    fn trigger_break(&self);

    /// Trigger a break only when a debugger is attached
    ///
    /// A failed query counts as "not attached". Returns whether the break was
    /// triggered.
    fn break_if_attached(&self) -> bool
    {
        match self.is_attached() {
            Ok(true) => {
                debug!("debugger attached, triggering break");
                self.trigger_break();
                true
            }
            Ok(false) => {
                trace!("no debugger attached, skipping break");
                false
            }
            Err(e) => {
                warn!(error = %e, "could not determine debugger attachment, skipping break");
                false
            }
        }
    }
}

impl<H: DebugHost + ?Sized> DebugHost for &H
{
    fn is_attached(&self) -> SnagResult<bool>
    {
        (**self).is_attached()
    }

    fn trigger_break(&self)
    {
        (**self).trigger_break();
    }
}

impl<H: DebugHost + ?Sized> DebugHost for Box<H>
{
    fn is_attached(&self) -> SnagResult<bool>
    {
        (**self).is_attached()
    }

    fn trigger_break(&self)
    {
        (**self).trigger_break();
    }
}

/// Ask the native platform backend whether a debugger is attached
///
/// ## Example
///
/// ```rust,no_run
/// if snag_core::debugger::is_attached().unwrap_or(false) {
///     println!("running under a debugger");
/// }
/// ```
///
/// ## Errors
///
/// See [`DebugHost::is_attached`].
pub fn is_attached() -> SnagResult<bool>
{
    NativeHost.is_attached()
}
