use super::*;
use crate::context::Config;
use crate::device::MockDevice;
use std::io;

// ============================================================================
// HELPERS
// ============================================================================

const VALID: &str = "#version 460\nuniform vec4 uColor;\nvoid main() {}\n";

fn setup() -> (Context, MockDevice) {
    let device = MockDevice::new();
    let ctx = Context::new(device.clone(), Config { debug_checks: true, label: "shader-tests".to_string() });
    (ctx, device)
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_new_stage_is_uncompiled() {
    let (ctx, _device) = setup();
    let stage = ShaderStage::new(&ctx, StageKind::Fragment).unwrap();
    assert!(stage.exists());
    assert!(!stage.compiled());
    assert_eq!(stage.kind(), StageKind::Fragment);
}

#[test]
fn test_creation_failure() {
    let (ctx, device) = setup();
    device.refuse_allocations(true);
    let err = ShaderStage::new(&ctx, StageKind::Geometry).unwrap_err();
    assert!(matches!(err, Error::CreationFailed(ref msg) if msg.contains("GEOMETRY")));
}

#[test]
fn test_with_source_compiles() {
    let (ctx, _device) = setup();
    let stage = ShaderStage::with_source(&ctx, StageKind::Vertex, VALID).unwrap();
    assert!(stage.compiled());
    assert_eq!(stage.info_log().unwrap(), "");
}

#[test]
fn test_from_reader_compiles() {
    let (ctx, _device) = setup();
    let stage = ShaderStage::from_reader(&ctx, StageKind::Vertex, VALID.as_bytes()).unwrap();
    assert!(stage.compiled());
}

#[test]
fn test_release_and_reset() {
    let (ctx, device) = setup();
    let mut stage = ShaderStage::with_source(&ctx, StageKind::Vertex, VALID).unwrap();
    stage.release();
    stage.release();
    assert!(!stage.exists());
    assert!(!stage.compiled());
    assert_eq!(device.call_count("delete_shader"), 1);
    assert!(matches!(stage.compile(VALID), Err(Error::InvalidState(_))));

    stage.reset().unwrap();
    assert!(stage.exists());
    assert_eq!(stage.kind(), StageKind::Vertex);
    stage.compile(VALID).unwrap();
}

// ============================================================================
// COMPILE
// ============================================================================

#[test]
fn test_compile_failure_carries_stage_and_log() {
    let (ctx, _device) = setup();
    let mut stage = ShaderStage::new(&ctx, StageKind::Fragment).unwrap();
    let err = stage.compile("#error nope\nvoid main() {}").unwrap_err();

    match &err {
        Error::CompileFailed { stage: kind, log } => {
            assert_eq!(*kind, StageKind::Fragment);
            assert!(log.contains("nope"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().starts_with("Shader compile failed (FRAGMENT):\n"));
    assert!(!stage.compiled());
    assert!(stage.exists());
}

#[test]
fn test_recompile_drops_previous_state() {
    let (ctx, _device) = setup();
    let mut stage = ShaderStage::with_source(&ctx, StageKind::Vertex, VALID).unwrap();
    assert!(stage.compile("no entry point").is_err());
    assert!(!stage.compiled());

    // Retry on the same object
    stage.compile(VALID).unwrap();
    assert!(stage.compiled());
}

#[test]
fn test_nul_source_rejected_before_device() {
    let (ctx, device) = setup();
    let mut stage = ShaderStage::with_source(&ctx, StageKind::Vertex, VALID).unwrap();
    device.clear_calls();
    assert!(matches!(stage.compile("void main() {}\0"), Err(Error::InvalidArgument(_))));
    assert_eq!(device.call_count("compile_shader"), 0);
    // Rejected before anything changed
    assert!(stage.compiled());
}

#[test]
fn test_reader_errors() {
    let (ctx, _device) = setup();
    let mut stage = ShaderStage::new(&ctx, StageKind::Vertex).unwrap();

    let err = stage.compile_reader(FailingReader).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(ref msg) if msg.contains("disk on fire")));

    let invalid_utf8: &[u8] = &[0xff, 0xfe, 0x00];
    assert!(matches!(stage.compile_reader(invalid_utf8), Err(Error::InvalidArgument(_))));
    assert!(!stage.compiled());
}
