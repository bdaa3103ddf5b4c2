//! # Windows Debug Host
//!
//! `IsDebuggerPresent()` answers the attachment query and `DebugBreak()`
//! raises the breakpoint exception the attached debugger catches.
//!
//! ## References
//!
//! - [IsDebuggerPresent](https://learn.microsoft.com/en-us/windows/win32/api/debugapi/nf-debugapi-isdebuggerpresent)
//! - [DebugBreak](https://learn.microsoft.com/en-us/windows/win32/api/debugapi/nf-debugapi-debugbreak)

use crate::debugger::DebugHost;
use crate::error::SnagResult;

#[link(name = "kernel32")]
extern "system" {
    fn IsDebuggerPresent() -> i32;
    fn DebugBreak();
}

/// Debug host backed by the Win32 debugging API
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

impl DebugHost for NativeHost
{
    fn is_attached(&self) -> SnagResult<bool>
    {
        // SAFETY: takes no arguments and only reads the PEB.
        Ok(unsafe { IsDebuggerPresent() } != 0)
    }

    fn trigger_break(&self)
    {
        // SAFETY: raises EXCEPTION_BREAKPOINT for the attached debugger.
        unsafe { DebugBreak() }
    }
}
