use super::*;
use std::time::{Duration, UNIX_EPOCH};

// ============================================================================
// HELPERS
// ============================================================================

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        source: "ward::Test".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

#[test]
fn test_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_severity_round_trips_through_u8() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(LogSeverity::from_u8(severity as u8), severity);
    }
    assert_eq!(LogSeverity::from_u8(200), LogSeverity::Error);
}

#[test]
fn test_severity_labels_have_fixed_width() {
    assert_eq!(LogSeverity::Info.label(), "INFO ");
    assert_eq!(LogSeverity::Error.label(), "ERROR");
    assert!(
        [LogSeverity::Trace, LogSeverity::Debug, LogSeverity::Info, LogSeverity::Warn, LogSeverity::Error]
            .iter()
            .all(|s| s.label().len() == 5)
    );
}

// ============================================================================
// DEFAULT LOGGER
// ============================================================================

#[test]
fn test_format_plain_without_location() {
    let text = DefaultLogger::format_plain(&entry(LogSeverity::Warn, "careful"));
    assert!(text.contains("[WARN ] [ward::Test] careful"));
    assert!(!text.contains(".rs:"));
}

#[test]
fn test_format_plain_with_location() {
    let mut e = entry(LogSeverity::Error, "broken");
    e.file = Some("src/buffer.rs");
    e.line = Some(42);
    let text = DefaultLogger::format_plain(&e);
    assert!(text.ends_with("[ERROR] [ward::Test] broken (src/buffer.rs:42)"));
}

#[test]
fn test_default_logger_defaults_to_trace() {
    assert_eq!(DefaultLogger::default().min_severity, LogSeverity::Trace);
}

// ============================================================================
// MEMORY LOGGER
// ============================================================================

#[test]
fn test_memory_logger_captures_entries() {
    let logger = MemoryLogger::new();
    assert!(logger.is_empty());

    logger.log(&entry(LogSeverity::Debug, "first"));
    logger.log(&entry(LogSeverity::Error, "second"));

    assert_eq!(logger.len(), 2);
    assert!(logger.contains("sec"));
    assert!(!logger.contains("third"));
    assert_eq!(logger.entries_at(LogSeverity::Error).len(), 1);
    assert_eq!(logger.entries()[0].message, "first");
}

#[test]
fn test_memory_logger_clones_share_storage() {
    let logger = MemoryLogger::new();
    let observer = logger.clone();

    logger.log(&entry(LogSeverity::Info, "shared"));
    assert_eq!(observer.len(), 1);

    observer.clear();
    assert!(logger.is_empty());
}
