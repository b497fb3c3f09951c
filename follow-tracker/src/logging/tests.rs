use crate::config::{ConsoleTarget, LogFormat, LogLevel, LoggingConfig};
use tempfile::tempdir;

#[test]
fn test_init_console_logging_twice() {
    let config = LoggingConfig {
        level: LogLevel::Debug,
        format: LogFormat::Compact,
        file: None,
        console: ConsoleTarget::Stderr,
    };

    // The second call finds a subscriber already installed and keeps it
    assert!(crate::logging::init(&config).is_ok());
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_init_with_console_off_installs_nothing() {
    let config = LoggingConfig {
        console: ConsoleTarget::Off,
        ..LoggingConfig::default()
    };

    let guard = crate::logging::init(&config).unwrap();
    assert!(guard.is_none());
}

#[test]
fn test_log_file_directory_is_created() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("tracker.log");

    let (_writer, _guard) = super::create_non_blocking_file(&log_path).unwrap();

    assert!(temp_dir.path().join("nested").is_dir());
}

#[test]
fn test_already_initialized_errors_are_recognized() {
    let dispatcher: Box<dyn std::error::Error + Send + Sync> =
        "a global default trace dispatcher has already been set".into();
    assert!(super::is_already_initialized(dispatcher.as_ref()));

    let logger: Box<dyn std::error::Error + Send + Sync> =
        "attempted to set a logger after the logging system was already initialized".into();
    assert!(super::is_already_initialized(logger.as_ref()));

    let other: Box<dyn std::error::Error + Send + Sync> = "invalid filter directive".into();
    assert!(!super::is_already_initialized(other.as_ref()));
}
