//! # snag-core
//!
//! Debug-build checks that stop in an attached debugger, plus merged integer
//! views.
//!
//! This crate provides:
//! - Check macros ([`check!`], [`check_eq!`], [`check_within!`], ...) that
//!   report a failed relation and break into the debugger only if one is
//!   attached
//! - A [`DebugHost`] capability with one backend per platform
//! - Compile-time configuration of checks and breakpoints ([`config`])
//! - Merged values ([`types::Merged32`], [`types::Merged16`], [`types::Merged8`])
//!   and signed integer aliases
//!
//! ## Quick Start
//!
//! ```rust
//! use snag_core::{check, check_eq, check_within};
//!
//! let frames = 60;
//! check!(frames > 0);
//! check_eq!(frames % 30, 0, "frame budget is not a multiple of 30");
//! check_within!(frames, 64, 8);
//! ```
//!
//! ## Platform Support
//!
//! - **macOS / iOS**: `proc_pidinfo()` traced flag
//! - **Linux**: `TracerPid` from `/proc/self/status`
//! - **Windows**: `IsDebuggerPresent()`
//!
//! ## Why unsafe code is needed
//!
//! Asking the kernel about the current process and executing a trap
//! instruction both go through FFI or inline assembly. Those calls are
//! wrapped in the safe [`DebugHost`] implementations under [`platform`].

#![allow(unsafe_code)] // Required for libproc, Win32 and trap instructions

pub mod check;
pub mod config;
pub mod debugger;
pub mod error;
pub mod platform;
pub mod prelude;
pub mod report;
pub mod types;

pub use config::BuildConfig;
pub use debugger::{DebugHost, NativeHost};
// Re-export commonly used types
pub use error::{SnagError, SnagResult};
pub use report::{CheckFailure, Relation, Reporter};
pub use types::{Merged16, Merged32, Merged8};
