//! Tests for the native debug host
//!
//! These run against the real OS query. Under `cargo test` nothing is
//! tracing the process, unless the suite itself is run inside a debugger.

use snag_core::{debugger, DebugHost, NativeHost};

#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
#[test]
fn test_native_attachment_query_succeeds()
{
    let attached = NativeHost.is_attached();
    assert!(attached.is_ok(), "query failed: {:?}", attached.err());
    assert_eq!(attached.ok(), debugger::is_attached().ok());
}

#[cfg(target_os = "linux")]
#[test]
fn test_tracer_pid_matches_attachment()
{
    let tracer = NativeHost.tracer_pid().unwrap();
    assert_eq!(tracer.is_some(), NativeHost.is_attached().unwrap());
}
