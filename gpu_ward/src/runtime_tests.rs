//! Unit tests for the Ward logging facade
//!
//! LOGGER and LOG_LEVEL are process-wide, so every test is #[serial] and
//! restores the defaults before returning.

use super::*;
use crate::log::MemoryLogger;
use serial_test::serial;

// ============================================================================
// HELPERS
// ============================================================================

fn install_memory_logger() -> MemoryLogger {
    let logger = MemoryLogger::new();
    Ward::set_logger(logger.clone());
    Ward::set_log_level(LogSeverity::Trace);
    logger
}

/// Entries logged by this file only (other tests may log concurrently)
fn own_entries(logger: &MemoryLogger) -> Vec<LogEntry> {
    logger.entries().into_iter().filter(|e| e.source == "ward::RuntimeTest").collect()
}

fn restore_defaults() {
    Ward::reset_logger();
    Ward::set_log_level(LogSeverity::Trace);
}

// ============================================================================
// LOGGER ROUTING
// ============================================================================

#[test]
#[serial]
fn test_log_reaches_installed_logger() {
    let logger = install_memory_logger();

    Ward::log(LogSeverity::Info, "ward::RuntimeTest", "hello".to_string());

    let entries = own_entries(&logger);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].source, "ward::RuntimeTest");
    assert_eq!(entries[0].message, "hello");
    assert!(entries[0].file.is_none());

    restore_defaults();
}

#[test]
#[serial]
fn test_log_detailed_keeps_location() {
    let logger = install_memory_logger();

    Ward::log_detailed(LogSeverity::Error, "ward::RuntimeTest", "boom".to_string(), "src/x.rs", 12);

    let entries = own_entries(&logger);
    assert_eq!(entries[0].file, Some("src/x.rs"));
    assert_eq!(entries[0].line, Some(12));

    restore_defaults();
}

#[test]
#[serial]
fn test_macros_route_through_facade() {
    let logger = install_memory_logger();

    crate::ward_trace!("ward::RuntimeTest", "trace {}", 1);
    crate::ward_debug!("ward::RuntimeTest", "debug {}", 2);
    crate::ward_info!("ward::RuntimeTest", "info {}", 3);
    crate::ward_warn!("ward::RuntimeTest", "warn {}", 4);
    crate::ward_error!("ward::RuntimeTest", "error {}", 5);

    let entries = own_entries(&logger);
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[4].severity, LogSeverity::Error);
    assert_eq!(entries[4].message, "error 5");
    assert!(entries[4].line.is_some());

    restore_defaults();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let logger = install_memory_logger();
    Ward::reset_logger();

    Ward::log(LogSeverity::Trace, "ward::RuntimeTest", "not captured".to_string());
    assert!(own_entries(&logger).is_empty());

    restore_defaults();
}

// ============================================================================
// LOG LEVEL
// ============================================================================

#[test]
#[serial]
fn test_log_level_filters_lower_severities() {
    let logger = install_memory_logger();
    Ward::set_log_level(LogSeverity::Warn);
    assert_eq!(Ward::log_level(), LogSeverity::Warn);

    Ward::log(LogSeverity::Debug, "ward::RuntimeTest", "dropped".to_string());
    Ward::log(LogSeverity::Info, "ward::RuntimeTest", "dropped".to_string());
    Ward::log(LogSeverity::Warn, "ward::RuntimeTest", "kept".to_string());
    Ward::log(LogSeverity::Error, "ward::RuntimeTest", "kept".to_string());

    let entries = own_entries(&logger);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.message == "kept"));

    restore_defaults();
}

#[test]
#[serial]
fn test_ward_err_logs_at_error_level() {
    let logger = install_memory_logger();

    let err = crate::ward_err!("ward::RuntimeTest", InvalidState, "Buffer is already mapped");

    assert_eq!(err, crate::ward::Error::InvalidState("Buffer is already mapped".to_string()));
    let entries = own_entries(&logger);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);

    restore_defaults();
}
