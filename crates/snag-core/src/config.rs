//! # Build Configuration
//!
//! Compile-time switches consumed by the check macros.
//!
//! Nothing here is mutable at runtime. The values are decided by the build:
//!
//! - **Checks**: active when `debug_assertions` is on. The `force-checks`
//!   feature keeps them in release builds, `strip-checks` removes them from
//!   debug builds.
//! - **Breakpoints**: a failed check stops in an attached debugger unless the
//!   `disable-breakpoints` feature is set.
//! - **Platform family**: derived from `target_os`.
//!
//! Because [`CHECKS_ENABLED`] is a `const`, a disabled check is a branch on
//! `false` and the optimizer removes it together with its operands.

use std::fmt;

#[cfg(all(feature = "force-checks", feature = "strip-checks"))]
compile_error!("snag-core: `force-checks` and `strip-checks` cannot both be enabled");

/// True when check macros evaluate their operands
pub const CHECKS_ENABLED: bool = if cfg!(feature = "force-checks") {
    true
} else if cfg!(feature = "strip-checks") {
    false
} else {
    cfg!(debug_assertions)
};

/// True when a failed check may stop in an attached debugger
pub const BREAKPOINTS_ENABLED: bool = !cfg!(feature = "disable-breakpoints");

/// Operating system family the debugger backend was compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFamily
{
    /// iOS, tvOS and watchOS devices and simulators
    Ios,
    /// macOS
    MacOs,
    /// Windows
    Windows,
    /// Everything else; Linux-like systems answer through procfs
    Other,
}

impl PlatformFamily
{
    /// The family of the current compilation target
    pub const fn current() -> Self
    {
        if cfg!(any(target_os = "ios", target_os = "tvos", target_os = "watchos")) {
            PlatformFamily::Ios
        } else if cfg!(target_os = "macos") {
            PlatformFamily::MacOs
        } else if cfg!(target_os = "windows") {
            PlatformFamily::Windows
        } else {
            PlatformFamily::Other
        }
    }

    /// Short lowercase name
    pub const fn name(self) -> &'static str
    {
        match self {
            PlatformFamily::Ios => "ios",
            PlatformFamily::MacOs => "macos",
            PlatformFamily::Windows => "windows",
            PlatformFamily::Other => "other",
        }
    }
}

impl fmt::Display for PlatformFamily
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.name())
    }
}

/// Snapshot of every compile-time switch
///
/// ## Example
///
/// ```rust
/// use snag_core::config::BuildConfig;
///
/// let config = BuildConfig::current();
/// assert_eq!(config.checks, snag_core::config::CHECKS_ENABLED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig
{
    /// Check macros are active
    pub checks: bool,
    /// Failed checks may break into a debugger
    pub breakpoints: bool,
    /// Platform backend compiled in
    pub platform: PlatformFamily,
    /// Width of a pointer in bits
    pub pointer_width: u32,
}

impl BuildConfig
{
    /// The configuration this crate was compiled with
    pub const fn current() -> Self
    {
        BuildConfig {
            checks: CHECKS_ENABLED,
            breakpoints: BREAKPOINTS_ENABLED,
            platform: PlatformFamily::current(),
            pointer_width: usize::BITS,
        }
    }

    /// `"debug"` when checks are active, `"release"` otherwise
    pub const fn profile(&self) -> &'static str
    {
        if self.checks {
            "debug"
        } else {
            "release"
        }
    }
}

impl Default for BuildConfig
{
    fn default() -> Self
    {
        Self::current()
    }
}

impl fmt::Display for BuildConfig
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "checks={} ({}) breakpoints={} platform={} pointer_width={}",
            self.checks,
            self.profile(),
            self.breakpoints,
            self.platform,
            self.pointer_width
        )
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_checks_follow_features_and_profile()
    {
        if cfg!(feature = "force-checks") {
            assert!(CHECKS_ENABLED);
        } else if cfg!(feature = "strip-checks") {
            assert!(!CHECKS_ENABLED);
        } else {
            assert_eq!(CHECKS_ENABLED, cfg!(debug_assertions));
        }
    }

    #[test]
    fn test_breakpoints_follow_feature()
    {
        assert_eq!(BREAKPOINTS_ENABLED, !cfg!(feature = "disable-breakpoints"));
    }

    #[test]
    fn test_platform_family_current()
    {
        let family = PlatformFamily::current();
        #[cfg(target_os = "linux")]
        assert_eq!(family, PlatformFamily::Other);
        #[cfg(target_os = "macos")]
        assert_eq!(family, PlatformFamily::MacOs);
        #[cfg(target_os = "windows")]
        assert_eq!(family, PlatformFamily::Windows);
        assert_eq!(family.to_string(), family.name());
    }

    #[test]
    fn test_build_config_display()
    {
        let config = BuildConfig {
            checks: false,
            breakpoints: true,
            platform: PlatformFamily::Windows,
            pointer_width: 64,
        };
        assert_eq!(config.profile(), "release");
        assert_eq!(
            config.to_string(),
            "checks=false (release) breakpoints=true platform=windows pointer_width=64"
        );
        assert_eq!(BuildConfig::default(), BuildConfig::current());
    }
}
