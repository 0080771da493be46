//! Error Extension Tests

use std::io;

use wirebox_domain::error::{Error, Result};
use wirebox_infrastructure::error_ext::ErrorContext;

fn not_found() -> std::result::Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[test]
fn test_io_context() {
    let result: Result<()> = not_found().io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_context_produces_configuration_error() {
    let result: Result<()> = not_found().context("failed to load settings");

    match result {
        Err(Error::Configuration { message, source }) => {
            assert_eq!(message, "failed to load settings: file not found");
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context built for a success") })
        .unwrap();
    assert_eq!(value, 1);

    let result: Result<()> = not_found().with_context(|| format!("attempt {}", 3));
    assert!(matches!(result, Err(Error::Configuration { message, .. }) if message.starts_with("attempt 3")));
}
