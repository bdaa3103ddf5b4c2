//! # Check Macros
//!
//! Assertion-style checks for development builds.
//!
//! | Macro | Fails when |
//! |---|---|
//! | [`check!`](crate::check!) | expression is false / zero |
//! | [`check_eq!`](crate::check_eq!) | `left != right` |
//! | [`check_ne!`](crate::check_ne!) | `left == right` |
//! | [`check_lt!`](crate::check_lt!) | `left >= right` |
//! | [`check_gt!`](crate::check_gt!) | `left <= right` |
//! | [`check_le!`](crate::check_le!) | `left > right` |
//! | [`check_ge!`](crate::check_ge!) | `left < right` |
//! | [`check_within!`](crate::check_within!) | `left` outside `right ± tolerance` |
//! | [`check_within_float!`](crate::check_within_float!) | same, compared as `f64` |
//!
//! A failed check prints a report (see [`crate::report`]) and, if a debugger
//! is attached, stops in it. Execution then continues: a check never panics
//! and never returns an error.
//!
//! ## Debug and release builds
//!
//! When [`CHECKS_ENABLED`](crate::config::CHECKS_ENABLED) is false every
//! check is a branch on a constant `false`. Operands are type-checked but
//! **never evaluated**, so side effects inside a check disappear from
//! release builds:
//!
//! ```rust
//! let mut polled = 0;
//! let mut poll = || {
//!     polled += 1;
//!     true
//! };
//! snag_core::check!(poll());
//! assert_eq!(polled, if snag_core::config::CHECKS_ENABLED { 1 } else { 0 });
//! ```
//!
//! When checks are enabled each operand is evaluated exactly once.

/// Values a truthiness check can inspect
///
/// `bool` is itself, numbers are true when non-zero, `Option` when `Some`,
/// raw pointers when non-null.
pub trait Truthy
{
    /// Whether the value counts as true
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool
{
    fn is_truthy(&self) -> bool
    {
        *self
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t
            {
                fn is_truthy(&self) -> bool
                {
                    *self != 0
                }
            }
        )*
    };
}

truthy_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Truthy for f32
{
    fn is_truthy(&self) -> bool
    {
        *self != 0.0
    }
}

impl Truthy for f64
{
    fn is_truthy(&self) -> bool
    {
        *self != 0.0
    }
}

impl<T> Truthy for Option<T>
{
    fn is_truthy(&self) -> bool
    {
        self.is_some()
    }
}

impl<T: ?Sized> Truthy for *const T
{
    fn is_truthy(&self) -> bool
    {
        !self.is_null()
    }
}

impl<T: ?Sized> Truthy for *mut T
{
    fn is_truthy(&self) -> bool
    {
        !self.is_null()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T
{
    fn is_truthy(&self) -> bool
    {
        (**self).is_truthy()
    }
}

/// Range test behind `check_within!`
pub trait Tolerance
{
    /// True when `self < target - tolerance` or `self > target + tolerance`
    ///
    /// Integer bounds saturate at the type limits instead of overflowing, so
    /// a bound that would fall outside the type excludes nothing. Floats use
    /// plain IEEE comparisons, so a NaN operand is never outside, the same as
    /// `check_lt!` and friends.
    fn outside_tolerance(&self, target: &Self, tolerance: &Self) -> bool;
}

macro_rules! tolerance_int {
    ($($t:ty),*) => {
        $(
            impl Tolerance for $t
            {
                fn outside_tolerance(&self, target: &Self, tolerance: &Self) -> bool
                {
                    *self < target.saturating_sub(*tolerance) || *self > target.saturating_add(*tolerance)
                }
            }
        )*
    };
}

tolerance_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! tolerance_float {
    ($($t:ty),*) => {
        $(
            impl Tolerance for $t
            {
                fn outside_tolerance(&self, target: &Self, tolerance: &Self) -> bool
                {
                    *self < *target - *tolerance || *self > *target + *tolerance
                }
            }
        )*
    };
}

tolerance_float!(f32, f64);

/// Number of elements in a fixed-size array
///
/// ```rust
/// static PALETTE: [u32; 16] = [0; 16];
/// assert_eq!(snag_core::check::array_count(&PALETTE), 16);
/// ```
pub const fn array_count<T, const N: usize>(_array: &[T; N]) -> usize
{
    N
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_truthy {
    ($enabled:expr; $expression:expr; $message:expr) => {
        if $enabled {
            if !$crate::check::Truthy::is_truthy(&($expression)) {
                $crate::report::dispatch(&$crate::report::CheckFailure::truthy(
                    ::core::stringify!($expression),
                    $message,
                    ::core::file!(),
                    ::core::line!(),
                ));
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_compare {
    ($enabled:expr; $relation:ident, $fails:tt; $left:expr, $right:expr; $message:expr) => {
        if $enabled {
            match (&$left, &$right) {
                (left_val, right_val) => {
                    if *left_val $fails *right_val {
                        $crate::report::dispatch(&$crate::report::CheckFailure::compare(
                            $crate::report::Relation::$relation,
                            [::core::stringify!($left), ::core::stringify!($right)],
                            [::std::format!("{:?}", left_val), ::std::format!("{:?}", right_val)],
                            $message,
                            ::core::file!(),
                            ::core::line!(),
                        ));
                    }
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_within {
    ($enabled:expr; $left:expr, $right:expr, $tolerance:expr; $message:expr) => {
        if $enabled {
            match (&$left, &$right, &$tolerance) {
                (left_val, right_val, tolerance_val) => {
                    if $crate::check::Tolerance::outside_tolerance(left_val, right_val, tolerance_val) {
                        $crate::report::dispatch(&$crate::report::CheckFailure::compare(
                            $crate::report::Relation::WithinRange,
                            [
                                ::core::stringify!($left),
                                ::core::stringify!($right),
                                ::core::stringify!($tolerance),
                            ],
                            [
                                ::std::format!("{:?}", left_val),
                                ::std::format!("{:?}", right_val),
                                ::std::format!("{:?}", tolerance_val),
                            ],
                            $message,
                            ::core::file!(),
                            ::core::line!(),
                        ));
                    }
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_within_float {
    ($enabled:expr; $left:expr, $right:expr, $tolerance:expr; $message:expr) => {
        if $enabled {
            match (($left) as f64, ($right) as f64, ($tolerance) as f64) {
                (left_val, right_val, tolerance_val) => {
                    if $crate::check::Tolerance::outside_tolerance(&left_val, &right_val, &tolerance_val) {
                        $crate::report::dispatch(&$crate::report::CheckFailure::compare(
                            $crate::report::Relation::WithinRangeFloat,
                            [
                                ::core::stringify!($left),
                                ::core::stringify!($right),
                                ::core::stringify!($tolerance),
                            ],
                            [
                                ::std::format!("{:.6}", left_val),
                                ::std::format!("{:.6}", right_val),
                                ::std::format!("{:.6}", tolerance_val),
                            ],
                            $message,
                            ::core::file!(),
                            ::core::line!(),
                        ));
                    }
                }
            }
        }
    };
}

/// Check that an expression is true (or non-zero, `Some`, non-null)
///
/// ```rust
/// let queue: Vec<u32> = vec![1];
/// snag_core::check!(!queue.is_empty());
/// snag_core::check!(queue.len(), "queue drained before flush");
/// ```
#[macro_export]
macro_rules! check {
    ($expression:expr $(,)?) => {
        $crate::__check_truthy!($crate::config::CHECKS_ENABLED; $expression; ::core::option::Option::None)
    };
    ($expression:expr, $($arg:tt)+) => {
        $crate::__check_truthy!(
            $crate::config::CHECKS_ENABLED;
            $expression;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that two expressions are equal
///
/// ```rust
/// snag_core::check_eq!(2 + 2, 4);
/// snag_core::check_eq!(2 + 2, 4, "arithmetic in frame {}", 7);
/// ```
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__check_compare!($crate::config::CHECKS_ENABLED; Equal, !=; $left, $right; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__check_compare!(
            $crate::config::CHECKS_ENABLED;
            Equal, !=;
            $left, $right;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that two expressions differ
#[macro_export]
macro_rules! check_ne {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__check_compare!($crate::config::CHECKS_ENABLED; NotEqual, ==; $left, $right; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__check_compare!(
            $crate::config::CHECKS_ENABLED;
            NotEqual, ==;
            $left, $right;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that `left < right`
#[macro_export]
macro_rules! check_lt {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__check_compare!($crate::config::CHECKS_ENABLED; LessThan, >=; $left, $right; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__check_compare!(
            $crate::config::CHECKS_ENABLED;
            LessThan, >=;
            $left, $right;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that `left > right`
#[macro_export]
macro_rules! check_gt {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__check_compare!($crate::config::CHECKS_ENABLED; GreaterThan, <=; $left, $right; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__check_compare!(
            $crate::config::CHECKS_ENABLED;
            GreaterThan, <=;
            $left, $right;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that `left <= right`
#[macro_export]
macro_rules! check_le {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__check_compare!($crate::config::CHECKS_ENABLED; LessOrEqual, >; $left, $right; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__check_compare!(
            $crate::config::CHECKS_ENABLED;
            LessOrEqual, >;
            $left, $right;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that `left >= right`
#[macro_export]
macro_rules! check_ge {
    ($left:expr, $right:expr $(,)?) => {
        $crate::__check_compare!($crate::config::CHECKS_ENABLED; GreaterOrEqual, <; $left, $right; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        $crate::__check_compare!(
            $crate::config::CHECKS_ENABLED;
            GreaterOrEqual, <;
            $left, $right;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that `left` lies within `right ± tolerance`
///
/// All three operands must have the same type. Bounds saturate instead of
/// overflowing.
///
/// ```rust
/// let latency_ms: u32 = 7;
/// snag_core::check_within!(latency_ms, 10, 4);
/// ```
#[macro_export]
macro_rules! check_within {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        $crate::__check_within!($crate::config::CHECKS_ENABLED; $left, $right, $tolerance; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        $crate::__check_within!(
            $crate::config::CHECKS_ENABLED;
            $left, $right, $tolerance;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Check that `left` lies within `right ± tolerance`, all cast to `f64`
///
/// Operands may be any primitive numeric type (`as f64` is applied).
///
/// ```rust
/// let gain: f32 = 0.98;
/// snag_core::check_within_float!(gain, 1, 0.05);
/// ```
#[macro_export]
macro_rules! check_within_float {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        $crate::__check_within_float!($crate::config::CHECKS_ENABLED; $left, $right, $tolerance; ::core::option::Option::None)
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        $crate::__check_within_float!(
            $crate::config::CHECKS_ENABLED;
            $left, $right, $tolerance;
            ::core::option::Option::Some(::std::format!($($arg)+))
        )
    };
}

/// Stop in the debugger if one is attached
///
/// Active only when checks are enabled. Unlike failed checks it ignores the
/// `disable-breakpoints` feature.
#[macro_export]
macro_rules! breakpoint {
    () => {
        if $crate::config::CHECKS_ENABLED {
            $crate::report::breakpoint();
        }
    };
}

/// Write a formatted line to the report sink when checks are enabled
///
/// ```rust
/// snag_core::debug_message!("loaded {} textures", 12);
/// ```
#[macro_export]
macro_rules! debug_message {
    ($($arg:tt)+) => {
        if $crate::config::CHECKS_ENABLED {
            $crate::report::message(::core::format_args!($($arg)+));
        }
    };
}

/// Run statements only when checks are enabled
///
/// The statements form their own block, so bindings do not escape it. Like
/// the check operands, they are type-checked in every build.
///
/// ```rust
/// let mut audits = 0;
/// snag_core::debug_code! {
///     audits += 1;
/// }
/// assert!(audits <= 1);
/// ```
#[macro_export]
macro_rules! debug_code {
    ($($code:tt)*) => {
        if $crate::config::CHECKS_ENABLED {
            $($code)*
        }
    };
}

/// Compile-time assertion, typically about array dimensions
///
/// Fails the build when the condition is false. Always evaluated, whatever
/// the check configuration.
///
/// ```rust
/// const LANES: [u8; 4] = [0; 4];
/// snag_core::static_check!(LANES.len() == 4, "lane table must cover four lanes");
/// ```
#[macro_export]
macro_rules! static_check {
    ($condition:expr $(,)?) => {
        const _: () = ::core::assert!($condition);
    };
    ($condition:expr, $message:literal $(,)?) => {
        const _: () = ::core::assert!($condition, $message);
    };
}

/// Number of elements in a fixed-size array expression
#[macro_export]
macro_rules! array_count {
    ($array:expr) => {
        $crate::check::array_count(&$array)
    };
}
