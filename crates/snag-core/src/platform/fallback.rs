//! # Fallback Debug Host
//!
//! Targets without a known attachment query. Checks still report, they just
//! never stop.

use crate::debugger::DebugHost;
use crate::error::{SnagError, SnagResult};

/// Debug host for platforms with no debugger query
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeHost;

impl DebugHost for NativeHost
{
    fn is_attached(&self) -> SnagResult<bool>
    {
        Err(SnagError::Unsupported("no debugger attachment query for this target"))
    }

    fn trigger_break(&self) {}
}
