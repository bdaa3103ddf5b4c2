//! Common module for library exports

pub use crate::check::{Tolerance, Truthy};
pub use crate::config::{BuildConfig, PlatformFamily, BREAKPOINTS_ENABLED, CHECKS_ENABLED};
pub use crate::debugger::{DebugHost, NativeHost};
pub use crate::error::{SnagError, SnagResult};
pub use crate::report::{CaptureBuffer, CheckFailure, Relation, Reporter};
pub use crate::types::{s16, s32, s64, s8, Merged16, Merged32, Merged8};
pub use crate::{
    breakpoint, check, check_eq, check_ge, check_gt, check_le, check_lt, check_ne, check_within, check_within_float,
    debug_code, debug_message, static_check,
};
