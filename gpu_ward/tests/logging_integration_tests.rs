//! Integration tests for the logging facade
//!
//! These tests install a capturing logger and check what resources report.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use gpu_ward::ward::device::{BufferKind, DeviceErrorCode, MockDevice, StageKind};
use gpu_ward::ward::log::{LogSeverity, MemoryLogger};
use gpu_ward::ward::{Buffer, Config, Context, MapAccess, Program, ShaderStage, Ward};
use serial_test::serial;

fn install() -> MemoryLogger {
    let logger = MemoryLogger::new();
    Ward::set_logger(logger.clone());
    Ward::set_log_level(LogSeverity::Trace);
    logger
}

fn restore() {
    Ward::reset_logger();
    Ward::set_log_level(LogSeverity::Trace);
}

fn context(debug_checks: bool) -> (Context, MockDevice) {
    let device = MockDevice::new();
    let ctx = Context::new(device.clone(), Config { debug_checks, label: "logging".to_string() });
    (ctx, device)
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_context_creation_logged() {
    let logger = install();
    let (_ctx, _device) = context(true);

    let info = logger.entries_at(LogSeverity::Info);
    assert!(info.iter().any(|e| e.source == "ward::Context" && e.message.contains("'logging'")));
    restore();
}

#[test]
#[serial]
fn test_integration_rejected_call_logs_error_with_location() {
    let logger = install();
    let (ctx, _device) = context(true);
    let mut buffer = Buffer::new(&ctx, BufferKind::Vertex).unwrap();

    assert!(buffer.unmap().is_err());

    let errors = logger.entries_at(LogSeverity::Error);
    let entry = errors.iter().find(|e| e.source == "ward::Buffer").unwrap();
    assert!(entry.message.contains("not mapped"));
    assert!(entry.file.is_some());
    assert!(entry.line.is_some());
    restore();
}

#[test]
#[serial]
fn test_integration_device_errors_logged_only_with_debug_checks() {
    let logger = install();

    let (quiet, quiet_device) = context(false);
    quiet_device.push_error(DeviceErrorCode::InvalidEnum);
    quiet.check_errors("quiet");
    assert!(!logger.contains("INVALID_ENUM"));

    let (loud, loud_device) = context(true);
    loud_device.push_error(DeviceErrorCode::InvalidEnum);
    loud.check_errors("loud");
    assert!(logger.contains("INVALID_ENUM raised by loud"));
    restore();
}

#[test]
#[serial]
fn test_integration_failed_map_logs_device_error() {
    let logger = install();
    let (ctx, device) = context(true);
    let mut buffer = Buffer::new(&ctx, BufferKind::Vertex).unwrap();
    buffer.upload(16, None, gpu_ward::ward::device::BufferUsage::StaticDraw).unwrap();

    device.fail_next_map();
    assert!(buffer.map_range(0, 16, MapAccess::READ).is_err());
    assert!(logger.contains("OUT_OF_MEMORY"));
    assert!(!buffer.is_mapped());
    restore();
}

#[test]
#[serial]
fn test_integration_compile_failure_logged() {
    let logger = install();
    let (ctx, _device) = context(true);

    assert!(ShaderStage::with_source(&ctx, StageKind::Vertex, "#error broken\nvoid main() {}").is_err());
    let errors = logger.entries_at(LogSeverity::Error);
    assert!(errors.iter().any(|e| e.source == "ward::ShaderStage" && e.message.contains("broken")));
    restore();
}

#[test]
#[serial]
fn test_integration_log_level_filters_resource_traces() {
    let logger = install();
    Ward::set_log_level(LogSeverity::Info);
    let (ctx, _device) = context(true);
    let _buffer = Buffer::new(&ctx, BufferKind::Vertex).unwrap();

    assert!(logger.entries_at(LogSeverity::Trace).is_empty());
    assert!(!logger.entries_at(LogSeverity::Info).is_empty());
    restore();
}

#[test]
#[serial]
fn test_integration_reset_traces_creation_for_every_resource() {
    let logger = install();
    let (ctx, _device) = context(true);
    let mut buffer = Buffer::new(&ctx, BufferKind::Vertex).unwrap();
    let mut stage = ShaderStage::new(&ctx, StageKind::Fragment).unwrap();
    let mut program = Program::new(&ctx).unwrap();

    buffer.reset().unwrap();
    stage.reset().unwrap();
    program.reset().unwrap();

    let created = |source: &str| {
        logger
            .entries_at(LogSeverity::Trace)
            .iter()
            .filter(|e| e.source == source && e.message.starts_with("Created"))
            .count()
    };
    assert_eq!(created("ward::Buffer"), 2);
    assert_eq!(created("ward::ShaderStage"), 2);
    assert_eq!(created("ward::Program"), 2);
    assert!(logger.contains(&format!("Created program {}", program.handle())));
    assert!(logger.contains(&format!("Created FRAGMENT shader {}", stage.handle())));
    restore();
}
