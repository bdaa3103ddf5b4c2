//! # libproc FFI Declarations
//!
//! On macOS `proc_pidinfo()`, `struct proc_bsdinfo` and `PROC_PIDTBSDINFO`
//! come from the `libc` crate. Its bindings stop at macOS, so on the other
//! Apple targets the function is declared here and the result is read from a
//! buffer of the same size.
//!
//! ## References
//!
//! - [bsd/sys/proc_info.h](https://github.com/apple-oss-distributions/xnu/blob/main/bsd/sys/proc_info.h)

#[cfg(not(target_os = "macos"))]
use libc::{c_int, c_void};

/// `PROC_FLAG_TRACED` bit in `proc_bsdinfo.pbi_flags`
///
/// Set while the process is being traced (a debugger is attached).
pub const PROC_FLAG_TRACED: u32 = 0x2;

/// `sizeof(struct proc_bsdinfo)` in 8-byte words
///
/// `pbi_flags` is the first field, so it sits in the first four bytes.
pub const PROC_BSDINFO_WORDS: usize = 17;

/// `PROC_PIDTBSDINFO` flavor for `proc_pidinfo()`
#[cfg(not(target_os = "macos"))]
pub const PROC_PIDTBSDINFO: c_int = 3;

#[cfg(not(target_os = "macos"))]
#[link(name = "c", kind = "dylib")]
extern "C" {
    /// Fill `buffer` with information about `pid`
    ///
    /// Returns the number of bytes written, or `<= 0` on failure with `errno` set.
    pub fn proc_pidinfo(pid: c_int, flavor: c_int, arg: u64, buffer: *mut c_void, buffersize: c_int) -> c_int;
}
