//! Tests for error handling

use snag_core::error::{SnagError, SnagResult};

#[test]
fn test_snag_error_probe_failed()
{
    let error = SnagError::ProbeFailed("proc_pidinfo returned 0".to_string());
    let message = format!("{}", error);
    assert!(message.contains("probe failed"));
    assert!(message.contains("proc_pidinfo"));
}

#[test]
fn test_snag_error_unsupported()
{
    let error = SnagError::Unsupported("no procfs");
    let message = format!("{}", error);
    assert!(message.contains("Unsupported"));
    assert!(message.contains("no procfs"));
}

#[test]
fn test_snag_error_invalid_argument()
{
    let error = SnagError::InvalidArgument("width 24".to_string());
    let message = format!("{}", error);
    assert!(message.contains("Invalid argument"));
    assert!(message.contains("width 24"));
}

#[test]
fn test_snag_error_from_io()
{
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let snag_error: SnagError = io_error.into();

    match snag_error {
        SnagError::Io(_) => {
            // Expected: io::Error converts to the Io variant
        }
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_result_type_alias()
{
    fn returns_result() -> SnagResult<u32>
    {
        Ok(42)
    }

    assert_eq!(returns_result().unwrap(), 42);
}
