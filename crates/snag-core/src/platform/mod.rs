//! # Platform-Specific Implementations
//!
//! One [`DebugHost`](crate::debugger::DebugHost) backend per platform family,
//! selected at compile time and exported as `NativeHost`:
//!
//! - **darwin** (macOS, iOS): `proc_pidinfo()` traced flag
//!   - See: [proc_info.h](https://github.com/apple-oss-distributions/xnu/blob/main/bsd/sys/proc_info.h)
//! - **procfs** (Linux, Android and other non-Apple unix): `TracerPid` in `/proc/self/status`
//!   - See: [proc_pid_status(5)](https://man7.org/linux/man-pages/man5/proc_pid_status.5.html)
//! - **windows**: `IsDebuggerPresent()` / `DebugBreak()`
//!   - See: [Debugging Functions](https://learn.microsoft.com/en-us/windows/win32/debug/debugging-functions)
//! - **fallback**: everything else; the query reports `Unsupported`
//!
//! Exactly one module is compiled in, so the families cannot be mixed.

#[cfg(target_vendor = "apple")]
pub mod darwin;
#[cfg(target_vendor = "apple")]
pub use darwin::NativeHost;

#[cfg(all(unix, not(target_vendor = "apple")))]
pub mod procfs;
#[cfg(all(unix, not(target_vendor = "apple")))]
pub use procfs::NativeHost;

#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
pub use self::windows::NativeHost;

#[cfg(not(any(unix, windows)))]
pub mod fallback;
#[cfg(not(any(unix, windows)))]
pub use fallback::NativeHost;
