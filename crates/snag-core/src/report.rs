//! # Failure Reports
//!
//! What happens after a check fails: the failure is rendered to a sink,
//! logged through `tracing`, and handed to a [`DebugHost`] that may stop in
//! the debugger.
//!
//! ## Report Format
//!
//! ```text
//! Check failed, should be = : frame counter drifted
//!     frames != expected
//!     3 != 4
//!     src/render.rs
//!     Line 42
//! ```
//!
//! The header names the relation that should have held, the second line is
//! the operand source text joined by the operator that *did* hold, the third
//! line carries the operand values, and the last two locate the check.
//!
//! ## Reporters
//!
//! By default failures go to stderr and the native debug host. A
//! [`Reporter`] with a different sink or host can be installed for the
//! current thread with [`scoped`]:
//!
//! ```rust
//! use snag_core::report::{self, CaptureBuffer, Reporter};
//! use snag_core::debugger::NativeHost;
//!
//! let buffer = CaptureBuffer::new();
//! let reporter = Reporter::new(buffer.clone(), NativeHost).with_breakpoints(false);
//! report::scoped(reporter, || {
//!     snag_core::check_eq!(1 + 1, 3);
//! });
//! if snag_core::config::CHECKS_ENABLED {
//!     assert!(buffer.contents().contains("1 + 1 != 3"));
//! }
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::{error, warn};

use crate::config::BREAKPOINTS_ENABLED;
use crate::debugger::{DebugHost, NativeHost};

/// The relation a check expects to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation
{
    /// Expression is true / non-zero
    Truthy,
    /// `left == right`
    Equal,
    /// `left != right`
    NotEqual,
    /// `left < right`
    LessThan,
    /// `left > right`
    GreaterThan,
    /// `left <= right`
    LessOrEqual,
    /// `left >= right`
    GreaterOrEqual,
    /// `right - tolerance <= left <= right + tolerance`
    WithinRange,
    /// Same as `WithinRange`, compared as `f64`
    WithinRangeFloat,
}

impl Relation
{
    /// Header line fragment describing what should have held
    pub const fn expectation(self) -> &'static str
    {
        match self {
            Relation::Truthy => "should be non-zero",
            Relation::Equal => "should be =",
            Relation::NotEqual => "should be !=",
            Relation::LessThan => "should be <",
            Relation::GreaterThan => "should be >",
            Relation::LessOrEqual => "should be <=",
            Relation::GreaterOrEqual => "should be >=",
            Relation::WithinRange | Relation::WithinRangeFloat => "outside of tolerance",
        }
    }

    /// Operator that held instead, used to join operands in the report
    pub const fn violation(self) -> &'static str
    {
        match self {
            Relation::Truthy => "",
            Relation::Equal | Relation::WithinRange | Relation::WithinRangeFloat => "!=",
            Relation::NotEqual => "==",
            Relation::LessThan => ">=",
            Relation::GreaterThan => "<=",
            Relation::LessOrEqual => ">",
            Relation::GreaterOrEqual => "<",
        }
    }
}

impl fmt::Display for Relation
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let name = match self {
            Relation::Truthy => "truthy",
            Relation::Equal => "equal",
            Relation::NotEqual => "not-equal",
            Relation::LessThan => "less-than",
            Relation::GreaterThan => "greater-than",
            Relation::LessOrEqual => "less-or-equal",
            Relation::GreaterOrEqual => "greater-or-equal",
            Relation::WithinRange => "within-range",
            Relation::WithinRangeFloat => "within-range-float",
        };
        f.write_str(name)
    }
}

/// Everything known about one failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure
{
    /// Relation that did not hold
    pub relation: Relation,
    /// Extra message supplied at the call site
    pub message: Option<String>,
    /// Source text of each operand, in order (tolerance last)
    pub expressions: Vec<&'static str>,
    /// Rendered operand values; empty for [`Relation::Truthy`]
    pub values: Vec<String>,
    /// Source file of the check
    pub file: &'static str,
    /// Source line of the check
    pub line: u32,
}

impl CheckFailure
{
    /// Failure of a single-expression truthiness check
    pub fn truthy(expression: &'static str, message: Option<String>, file: &'static str, line: u32) -> Self
    {
        CheckFailure {
            relation: Relation::Truthy,
            message,
            expressions: vec![expression],
            values: Vec::new(),
            file,
            line,
        }
    }

    /// Failure of a comparison or range check
    pub fn compare<const N: usize>(
        relation: Relation,
        expressions: [&'static str; N],
        values: [String; N],
        message: Option<String>,
        file: &'static str,
        line: u32,
    ) -> Self
    {
        CheckFailure {
            relation,
            message,
            expressions: Vec::from(expressions),
            values: Vec::from(values),
            file,
            line,
        }
    }

    /// First report line
    pub fn header(&self) -> String
    {
        match &self.message {
            Some(message) => format!("Check failed, {} : {message}", self.relation.expectation()),
            None => format!("Check failed, {}", self.relation.expectation()),
        }
    }

    fn join<S: AsRef<str>>(&self, parts: &[S]) -> String
    {
        let op = self.relation.violation();
        match parts {
            [] => String::new(),
            [only] => only.as_ref().to_string(),
            [left, right] => format!("{} {op} {}", left.as_ref(), right.as_ref()),
            [left, right, tolerance, ..] => format!("{} {op} {} +- {}", left.as_ref(), right.as_ref(), tolerance.as_ref()),
        }
    }
}

impl fmt::Display for CheckFailure
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        writeln!(f, "{}", self.header())?;
        writeln!(f, "    {}", self.join(&self.expressions))?;
        if !self.values.is_empty() {
            writeln!(f, "    {}", self.join(&self.values))?;
        }
        writeln!(f, "    {}", self.file)?;
        writeln!(f, "    Line {}", self.line)
    }
}

/// Sink, debug host and breakpoint policy used for failed checks
pub struct Reporter
{
    sink: Box<dyn Write>,
    host: Box<dyn DebugHost>,
    breakpoints: bool,
}

impl Reporter
{
    /// stderr, the native debug host and the compile-time breakpoint policy
    pub fn native() -> Self
    {
        Self::new(io::stderr(), NativeHost)
    }

    /// Reporter writing to `sink` and breaking through `host`
    ///
    /// Breakpoints follow the `disable-breakpoints` feature until changed
    /// with [`Reporter::with_breakpoints`].
    pub fn new(sink: impl Write + 'static, host: impl DebugHost + 'static) -> Self
    {
        Reporter {
            sink: Box::new(sink),
            host: Box::new(host),
            breakpoints: BREAKPOINTS_ENABLED,
        }
    }

    /// Override whether failed checks may break into the debugger
    #[must_use]
    pub fn with_breakpoints(mut self, enabled: bool) -> Self
    {
        self.breakpoints = enabled;
        self
    }

    /// Whether failed checks may break into the debugger
    pub fn breakpoints(&self) -> bool
    {
        self.breakpoints
    }

    /// Print `failure`, log it, and break if allowed and a debugger is attached
    ///
    /// Returns whether a break was triggered.
    pub fn report(&mut self, failure: &CheckFailure) -> bool
    {
        error!(
            relation = %failure.relation,
            file = failure.file,
            line = failure.line,
            detail = failure.message.as_deref().unwrap_or(""),
            "check failed"
        );

        // Whole block in a single write; stderr locks per call
        let rendered = failure.to_string();
        if let Err(e) = self.sink.write_all(rendered.as_bytes()).and_then(|()| self.sink.flush()) {
            warn!(error = %e, "failed to write check report");
        }

        self.breakpoints && self.host.break_if_attached()
    }

    /// Write one free-form line to the sink
    pub fn message(&mut self, args: fmt::Arguments<'_>)
    {
        if let Err(e) = writeln!(self.sink, "{args}") {
            warn!(error = %e, "failed to write debug message");
        }
    }

    /// Break if a debugger is attached, regardless of the breakpoint policy
    pub fn breakpoint(&self) -> bool
    {
        self.host.break_if_attached()
    }
}

impl fmt::Debug for Reporter
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Reporter").field("breakpoints", &self.breakpoints).finish_non_exhaustive()
    }
}

thread_local! {
    static CURRENT: RefCell<Option<Reporter>> = const { RefCell::new(None) };
}

/// Restores the previously installed reporter on drop
struct ScopeGuard
{
    previous: Option<Reporter>,
}

impl Drop for ScopeGuard
{
    fn drop(&mut self)
    {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

/// Run `f` with `reporter` handling failed checks on this thread
///
/// The previous reporter is restored when `f` returns or unwinds. Scopes nest.
pub fn scoped<R>(reporter: Reporter, f: impl FnOnce() -> R) -> R
{
    let previous = CURRENT.with(|current| current.borrow_mut().replace(reporter));
    let _guard = ScopeGuard { previous };
    f()
}

fn with_current<R>(f: impl FnOnce(&mut Reporter) -> R) -> R
{
    CURRENT.with(|current| match current.try_borrow_mut() {
        Ok(mut slot) => match slot.as_mut() {
            Some(reporter) => f(reporter),
            None => f(&mut Reporter::native()),
        },
        // A check failed while the installed reporter was busy
        Err(_) => f(&mut Reporter::native()),
    })
}

/// Report a failed check through the current reporter
pub fn dispatch(failure: &CheckFailure) -> bool
{
    with_current(|reporter| reporter.report(failure))
}

/// Write a line through the current reporter
pub fn message(args: fmt::Arguments<'_>)
{
    with_current(|reporter| reporter.message(args));
}

/// Break through the current reporter's host if a debugger is attached
pub fn breakpoint() -> bool
{
    with_current(|reporter| reporter.breakpoint())
}

/// In-memory report sink that can be cloned and read back
///
/// All clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer(Rc<RefCell<Vec<u8>>>);

impl CaptureBuffer
{
    /// Empty buffer
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String
    {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool
    {
        self.0.borrow().is_empty()
    }

    /// Discard everything written so far
    pub fn clear(&self)
    {
        self.0.borrow_mut().clear();
    }
}

impl Write for CaptureBuffer
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>
    {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()>
    {
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use std::cell::Cell;

    use super::*;
    use crate::error::SnagResult;

    #[derive(Clone, Default)]
    struct CountingHost
    {
        breaks: Rc<Cell<u32>>,
    }

    impl DebugHost for CountingHost
    {
        fn is_attached(&self) -> SnagResult<bool>
        {
            Ok(true)
        }

        fn trigger_break(&self)
        {
            self.breaks.set(self.breaks.get() + 1);
        }
    }

    fn sample() -> CheckFailure
    {
        CheckFailure::compare(
            Relation::Equal,
            ["frames", "expected"],
            ["3".to_string(), "4".to_string()],
            Some("frame counter drifted".to_string()),
            "src/render.rs",
            42,
        )
    }

    #[test]
    fn test_failure_display()
    {
        assert_eq!(
            sample().to_string(),
            "Check failed, should be = : frame counter drifted\n    frames != expected\n    3 != 4\n    src/render.rs\n    Line 42\n"
        );
    }

    #[test]
    fn test_truthy_display_has_no_values()
    {
        let failure = CheckFailure::truthy("ready", None, "src/lib.rs", 7);
        assert_eq!(failure.to_string(), "Check failed, should be non-zero\n    ready\n    src/lib.rs\n    Line 7\n");
    }

    #[test]
    fn test_range_display()
    {
        let failure = CheckFailure::compare(
            Relation::WithinRange,
            ["a", "b", "tol"],
            ["5".to_string(), "10".to_string(), "4".to_string()],
            None,
            "x.rs",
            1,
        );
        let text = failure.to_string();
        assert!(text.starts_with("Check failed, outside of tolerance\n"));
        assert!(text.contains("    a != b +- tol\n"));
        assert!(text.contains("    5 != 10 +- 4\n"));
    }

    #[test]
    fn test_violation_operators()
    {
        assert_eq!(Relation::NotEqual.violation(), "==");
        assert_eq!(Relation::LessThan.violation(), ">=");
        assert_eq!(Relation::GreaterThan.violation(), "<=");
        assert_eq!(Relation::LessOrEqual.violation(), ">");
        assert_eq!(Relation::GreaterOrEqual.violation(), "<");
    }

    /// Sink counting `write` calls
    #[derive(Clone, Default)]
    struct CountingSink
    {
        writes: Rc<Cell<u32>>,
    }

    impl Write for CountingSink
    {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>
        {
            self.writes.set(self.writes.get() + 1);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()>
        {
            Ok(())
        }
    }

    #[test]
    fn test_report_is_written_in_one_call()
    {
        let sink = CountingSink::default();
        let mut reporter = Reporter::new(sink.clone(), CountingHost::default()).with_breakpoints(false);
        reporter.report(&sample());
        assert_eq!(sink.writes.get(), 1);
    }

    #[test]
    fn test_reporter_default_policy()
    {
        let reporter = Reporter::new(CaptureBuffer::new(), CountingHost::default());
        assert_eq!(reporter.breakpoints(), BREAKPOINTS_ENABLED);
        assert_eq!(Reporter::native().breakpoints(), BREAKPOINTS_ENABLED);
    }

    #[test]
    fn test_reporter_breaks_when_allowed()
    {
        let host = CountingHost::default();
        let mut reporter = Reporter::new(CaptureBuffer::new(), host.clone()).with_breakpoints(true);
        assert!(reporter.report(&sample()));
        assert_eq!(host.breaks.get(), 1);
    }

    #[test]
    fn test_reporter_disabled_breakpoints_still_print()
    {
        let buffer = CaptureBuffer::new();
        let host = CountingHost::default();
        let mut reporter = Reporter::new(buffer.clone(), host.clone()).with_breakpoints(false);
        assert!(!reporter.report(&sample()));
        assert_eq!(host.breaks.get(), 0);
        assert!(buffer.contents().contains("frames != expected"));
    }

    #[test]
    fn test_explicit_breakpoint_ignores_policy()
    {
        let host = CountingHost::default();
        let reporter = Reporter::new(CaptureBuffer::new(), host.clone()).with_breakpoints(false);
        assert!(reporter.breakpoint());
        assert_eq!(host.breaks.get(), 1);
    }

    #[test]
    fn test_scoped_restores_previous()
    {
        let outer = CaptureBuffer::new();
        let inner = CaptureBuffer::new();
        let host = CountingHost::default();

        scoped(Reporter::new(outer.clone(), host.clone()).with_breakpoints(false), || {
            scoped(Reporter::new(inner.clone(), host.clone()).with_breakpoints(false), || {
                dispatch(&sample());
            });
            message(format_args!("after inner"));
        });

        assert!(inner.contents().contains("Line 42"));
        assert_eq!(outer.contents(), "after inner\n");
        assert!(CURRENT.with(|current| current.borrow().is_none()));
    }

    #[test]
    fn test_capture_buffer_clear()
    {
        let mut buffer = CaptureBuffer::new();
        assert!(buffer.is_empty());
        buffer.write_all(b"abc").unwrap();
        assert_eq!(buffer.contents(), "abc");
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
