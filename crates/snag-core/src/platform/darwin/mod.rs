//! # Darwin Debug Host
//!
//! Attachment comes from the `PROC_FLAG_TRACED` bit that the kernel reports
//! for the current pid through `proc_pidinfo(PROC_PIDTBSDINFO)`.
//!
//! The break is a trap instruction on macOS (`int3` on Intel, `brk #0xf000`
//! on Apple Silicon, which lldb steps over). On iOS the process sends itself
//! `SIGINT`.

pub mod ffi;

use std::io;
use std::mem;

use libc::c_int;
use tracing::trace;

use self::ffi::PROC_FLAG_TRACED;
use crate::debugger::DebugHost;
use crate::error::{SnagError, SnagResult};

/// Debug host backed by libproc
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

impl NativeHost
{
    /// Read `pbi_flags` for the current process
    #[cfg(target_os = "macos")]
    fn process_flags() -> SnagResult<u32>
    {
        // SAFETY: `proc_bsdinfo` is plain integers and arrays; all zeroes is valid.
        let mut info: libc::proc_bsdinfo = unsafe { mem::zeroed() };
        let size = mem::size_of::<libc::proc_bsdinfo>() as c_int;

        // SAFETY: `info` is a valid, writable `proc_bsdinfo` of `size` bytes.
        let written = unsafe {
            libc::proc_pidinfo(
                libc::getpid(),
                libc::PROC_PIDTBSDINFO,
                0,
                (&mut info as *mut libc::proc_bsdinfo).cast(),
                size,
            )
        };
        expect_full_read(written, size)?;

        trace!(flags = info.pbi_flags, "read process flags");
        Ok(info.pbi_flags)
    }

    /// Read `pbi_flags` for the current process
    #[cfg(not(target_os = "macos"))]
    fn process_flags() -> SnagResult<u32>
    {
        let mut buffer = [0u64; ffi::PROC_BSDINFO_WORDS];
        let size = mem::size_of_val(&buffer) as c_int;

        // SAFETY: `buffer` is writable, 8-byte aligned and `size` bytes long.
        let written = unsafe {
            ffi::proc_pidinfo(libc::getpid(), ffi::PROC_PIDTBSDINFO, 0, buffer.as_mut_ptr().cast(), size)
        };
        expect_full_read(written, size)?;

        let [a, b, c, d, ..] = buffer[0].to_ne_bytes();
        let flags = u32::from_ne_bytes([a, b, c, d]);
        trace!(flags, "read process flags");
        Ok(flags)
    }
}

fn expect_full_read(written: c_int, size: c_int) -> SnagResult<()>
{
    if written == size {
        return Ok(());
    }
    let os_error = io::Error::last_os_error();
    Err(SnagError::ProbeFailed(format!(
        "proc_pidinfo(PROC_PIDTBSDINFO) returned {written} (expected {size}): {os_error}"
    )))
}

impl DebugHost for NativeHost
{
    fn is_attached(&self) -> SnagResult<bool>
    {
        Ok(Self::process_flags()? & PROC_FLAG_TRACED != 0)
    }

    #[cfg(all(target_os = "macos", any(target_arch = "x86", target_arch = "x86_64")))]
    fn trigger_break(&self)
    {
        // SAFETY: `int3` only raises a trap; the debugger resumes after it.
        unsafe {
            std::arch::asm!("int3");
        }
    }

    #[cfg(all(target_os = "macos", target_arch = "aarch64"))]
    fn trigger_break(&self)
    {
        // SAFETY: `brk #0xf000` is the debug trap lldb recognizes and steps over.
        unsafe {
            std::arch::asm!("brk #0xf000");
        }
    }

    #[cfg(not(all(target_os = "macos", any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))))]
    fn trigger_break(&self)
    {
        // SAFETY: signalling our own pid has no memory-safety implications.
        unsafe {
            libc::kill(libc::getpid(), libc::SIGINT);
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[cfg(target_os = "macos")]
    #[test]
    fn test_bsdinfo_buffer_matches_libc_layout()
    {
        assert_eq!(mem::size_of::<libc::proc_bsdinfo>(), ffi::PROC_BSDINFO_WORDS * 8);
    }

    #[test]
    fn test_process_flags_readable()
    {
        assert!(NativeHost::process_flags().is_ok());
    }
}
