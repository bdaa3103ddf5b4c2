//! Build script for snag-core
//!
//! Checks toolchain requirements before compilation:
//! - Minimum Rust version (stable `asm!` landed in Rust 1.59.0)
//! - Check configuration features that cannot be combined
//!
//! ## Requirements
//!
//! - **Rust**: 1.59.0 or newer
//! - **Features**: at most one of `force-checks` / `strip-checks`

use std::env;

fn main()
{
    // Breakpoint instructions on macOS are emitted with `asm!`
    if let Ok(rustc_version) = rustc_version::version() {
        let min_rust_version = rustc_version::Version::parse("1.59.0").unwrap();

        if rustc_version < min_rust_version {
            panic!(
                "snag-core requires Rust {} or newer (stable inline assembly), found {}",
                min_rust_version, rustc_version
            );
        }
    } else {
        // If we can't get version (e.g., in some build environments), just warn
        println!("cargo:warning=could not verify Rust version");
    }

    // The crate itself rejects this combination with `compile_error!`, but
    // failing here names both features before any rustc diagnostics.
    let force = env::var_os("CARGO_FEATURE_FORCE_CHECKS").is_some();
    let strip = env::var_os("CARGO_FEATURE_STRIP_CHECKS").is_some();
    if force && strip {
        panic!("snag-core: `force-checks` and `strip-checks` are mutually exclusive");
    }
}
