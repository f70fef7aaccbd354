//! Unit tests for the surface boundary
//!
//! Uses a scripted surface that closes after a fixed number of frames.

use super::*;
use crate::error::Error;
use crate::ward_err;
use std::collections::VecDeque;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceId, TouchPhase};

// ============================================================================
// HELPERS
// ============================================================================

#[derive(Default)]
struct ScriptedSurface {
    current: bool,
    frames_left: u32,
    swaps: u32,
    /// Events returned by each successive poll
    script: VecDeque<Vec<SurfaceEvent>>,
    fail_make_current: bool,
}

impl Surface for ScriptedSurface {
    fn make_current(&mut self) -> Result<()> {
        if self.fail_make_current {
            return Err(ward_err!("test::Surface", BackendError, "no context"));
        }
        self.current = true;
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.frames_left == 0
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.swaps += 1;
        self.frames_left -= 1;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.script.pop_front().unwrap_or_default()
    }
}

#[derive(Default)]
struct RecordingHandler {
    frames: u32,
    events: Vec<SurfaceEvent>,
    fail_on_frame: Option<u32>,
}

impl SurfaceHandler for RecordingHandler {
    fn on_event(&mut self, event: &SurfaceEvent) {
        self.events.push(event.clone());
    }

    fn on_frame(&mut self) -> Result<()> {
        self.frames += 1;
        if self.fail_on_frame == Some(self.frames) {
            return Err(ward_err!("test::Handler", InvalidState, "frame {} failed", self.frames));
        }
        Ok(())
    }
}

fn device_id() -> DeviceId {
    // SAFETY: only compared, never passed back to the platform
    unsafe { DeviceId::dummy() }
}

// ============================================================================
// FRAME LOOP
// ============================================================================

#[test]
fn test_run_surface_counts_frames() {
    let mut surface = ScriptedSurface { frames_left: 3, ..Default::default() };
    let mut handler = RecordingHandler::default();

    let frames = run_surface(&mut surface, &mut handler).unwrap();
    assert_eq!(frames, 3);
    assert_eq!(handler.frames, 3);
    assert_eq!(surface.swaps, 3);
    assert!(surface.current);
}

#[test]
fn test_run_surface_dispatches_events_in_order() {
    let mut surface = ScriptedSurface {
        frames_left: 2,
        script: VecDeque::from(vec![
            vec![SurfaceEvent::Focused(true), SurfaceEvent::Resized { width: 640, height: 480 }],
            vec![SurfaceEvent::CloseRequested],
        ]),
        ..Default::default()
    };
    let mut handler = RecordingHandler::default();

    run_surface(&mut surface, &mut handler).unwrap();
    assert_eq!(
        handler.events,
        vec![
            SurfaceEvent::Focused(true),
            SurfaceEvent::Resized { width: 640, height: 480 },
            SurfaceEvent::CloseRequested,
        ]
    );
}

#[test]
fn test_run_surface_already_closed() {
    let mut surface = ScriptedSurface::default();
    let mut handler = RecordingHandler::default();
    assert_eq!(run_surface(&mut surface, &mut handler).unwrap(), 0);
    assert_eq!(handler.frames, 0);
}

#[test]
fn test_run_surface_stops_on_frame_error() {
    let mut surface = ScriptedSurface { frames_left: 5, ..Default::default() };
    let mut handler = RecordingHandler { fail_on_frame: Some(2), ..Default::default() };

    let err = run_surface(&mut surface, &mut handler).unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
    assert_eq!(surface.swaps, 1);
}

#[test]
fn test_run_surface_make_current_failure() {
    let mut surface = ScriptedSurface { frames_left: 1, fail_make_current: true, ..Default::default() };
    let mut handler = RecordingHandler::default();

    assert!(matches!(run_surface(&mut surface, &mut handler), Err(Error::BackendError(_))));
    assert_eq!(handler.frames, 0);
}

// ============================================================================
// WINIT TRANSLATION
// ============================================================================

#[test]
fn test_from_winit_window_events() {
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::Resized(PhysicalSize::new(800, 600))),
        Some(SurfaceEvent::Resized { width: 800, height: 600 })
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::Moved(PhysicalPosition::new(10, -20))),
        Some(SurfaceEvent::Moved { x: 10, y: -20 })
    );
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::CloseRequested), Some(SurfaceEvent::CloseRequested));
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::Focused(false)), Some(SurfaceEvent::Focused(false)));
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::Occluded(true)), Some(SurfaceEvent::Occluded(true)));
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::Occluded(false)), Some(SurfaceEvent::Occluded(false)));
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::RedrawRequested), Some(SurfaceEvent::Refresh));
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::DroppedFile(PathBuf::from("mesh.obj"))),
        Some(SurfaceEvent::DroppedFile(PathBuf::from("mesh.obj")))
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::Ime(Ime::Commit("é".to_string()))),
        Some(SurfaceEvent::Text("é".to_string()))
    );
}

#[test]
fn test_from_winit_pointer_events() {
    let device_id = device_id();

    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::CursorMoved { device_id, position: PhysicalPosition::new(1.5, 2.5) }),
        Some(SurfaceEvent::CursorMoved { x: 1.5, y: 2.5 })
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::CursorEntered { device_id }),
        Some(SurfaceEvent::CursorEntered(true))
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::CursorLeft { device_id }),
        Some(SurfaceEvent::CursorEntered(false))
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::MouseWheel {
            device_id,
            delta: MouseScrollDelta::LineDelta(0.0, -1.0),
            phase: TouchPhase::Moved,
        }),
        Some(SurfaceEvent::Scroll { x: 0.0, y: -1.0 })
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::MouseInput {
            device_id,
            state: ElementState::Pressed,
            button: MouseButton::Right,
        }),
        Some(SurfaceEvent::MouseButton { button: 1, pressed: true })
    );
    assert_eq!(
        SurfaceEvent::from_winit(&WindowEvent::MouseInput {
            device_id,
            state: ElementState::Released,
            button: MouseButton::Other(9),
        }),
        Some(SurfaceEvent::MouseButton { button: 9, pressed: false })
    );
}

#[test]
fn test_from_winit_ignores_unmapped_events() {
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::Destroyed), None);
    assert_eq!(SurfaceEvent::from_winit(&WindowEvent::HoveredFileCancelled), None);
}

#[test]
fn test_mouse_button_index() {
    assert_eq!(mouse_button_index(MouseButton::Left), 0);
    assert_eq!(mouse_button_index(MouseButton::Middle), 2);
    assert_eq!(mouse_button_index(MouseButton::Back), 3);
    assert_eq!(mouse_button_index(MouseButton::Forward), 4);
}
