/// Windowing boundary
///
/// A `Surface` is whatever owns the device context and the event queue: a
/// winit window with a GL context, an offscreen buffer, or a scripted fake in
/// tests. The resources in this crate never talk to it; they only require
/// that `make_current` was called on the thread that uses them.

use std::path::PathBuf;

use winit::event::{ElementState, Ime, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::error::Result;
use crate::{ward_debug, ward_trace};

const SOURCE: &str = "ward::Surface";

/// Window or input event delivered by a surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Drawable size in physical pixels
    Resized { width: u32, height: u32 },
    CloseRequested,
    Focused(bool),
    /// Cursor entered (true) or left (false) the window
    CursorEntered(bool),
    CursorMoved { x: f64, y: f64 },
    Scroll { x: f64, y: f64 },
    Key {
        code: Option<KeyCode>,
        pressed: bool,
        repeat: bool,
        text: Option<String>,
    },
    /// Buttons are numbered left 0, right 1, middle 2, back 3, forward 4
    MouseButton { button: u16, pressed: bool },
    /// Committed text input
    Text(String),
    DroppedFile(PathBuf),
    Moved { x: i32, y: i32 },
    ScaleChanged(f64),
    /// Window fully hidden from view (true) or visible again (false)
    Occluded(bool),
    /// Window contents must be redrawn
    Refresh,
}

impl SurfaceEvent {
    /// Translate a winit window event. Events with no counterpart give `None`.
    pub fn from_winit(event: &WindowEvent) -> Option<Self> {
        let translated = match event {
            WindowEvent::Resized(size) => SurfaceEvent::Resized { width: size.width, height: size.height },
            WindowEvent::Moved(position) => SurfaceEvent::Moved { x: position.x, y: position.y },
            WindowEvent::CloseRequested => SurfaceEvent::CloseRequested,
            WindowEvent::DroppedFile(path) => SurfaceEvent::DroppedFile(path.clone()),
            WindowEvent::Focused(focused) => SurfaceEvent::Focused(*focused),
            WindowEvent::KeyboardInput { event, .. } => SurfaceEvent::Key {
                code: match event.physical_key {
                    PhysicalKey::Code(code) => Some(code),
                    PhysicalKey::Unidentified(_) => None,
                },
                pressed: event.state == ElementState::Pressed,
                repeat: event.repeat,
                text: event.text.as_ref().map(|t| t.to_string()),
            },
            WindowEvent::Ime(Ime::Commit(text)) => SurfaceEvent::Text(text.clone()),
            WindowEvent::CursorMoved { position, .. } => SurfaceEvent::CursorMoved { x: position.x, y: position.y },
            WindowEvent::CursorEntered { .. } => SurfaceEvent::CursorEntered(true),
            WindowEvent::CursorLeft { .. } => SurfaceEvent::CursorEntered(false),
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x as f64, *y as f64),
                    MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
                };
                SurfaceEvent::Scroll { x, y }
            }
            WindowEvent::MouseInput { state, button, .. } => SurfaceEvent::MouseButton {
                button: mouse_button_index(*button),
                pressed: *state == ElementState::Pressed,
            },
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => SurfaceEvent::ScaleChanged(*scale_factor),
            WindowEvent::Occluded(occluded) => SurfaceEvent::Occluded(*occluded),
            WindowEvent::RedrawRequested => SurfaceEvent::Refresh,
            _ => return None,
        };
        Some(translated)
    }
}

fn mouse_button_index(button: MouseButton) -> u16 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(id) => id,
    }
}

/// Owner of a device context and its event queue
pub trait Surface {
    /// Make this surface's device context current on the calling thread
    fn make_current(&mut self) -> Result<()>;

    fn should_close(&self) -> bool;

    fn swap_buffers(&mut self) -> Result<()>;

    /// Events received since the last call
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
}

/// Application side of the frame loop
pub trait SurfaceHandler {
    fn on_event(&mut self, _event: &SurfaceEvent) {}

    /// Render one frame. An error stops the loop.
    fn on_frame(&mut self) -> Result<()>;
}

/// Drive `surface` until it asks to close
///
/// Each iteration renders a frame, presents it, then dispatches the pending
/// events. Returns the number of frames rendered.
pub fn run_surface<S, H>(surface: &mut S, handler: &mut H) -> Result<u64>
where
    S: Surface + ?Sized,
    H: SurfaceHandler + ?Sized,
{
    surface.make_current()?;
    ward_debug!(SOURCE, "Frame loop started");

    let mut frames = 0u64;
    while !surface.should_close() {
        handler.on_frame()?;
        surface.swap_buffers()?;
        frames += 1;

        for event in surface.poll_events() {
            ward_trace!(SOURCE, "{:?}", event);
            handler.on_event(&event);
        }
    }

    ward_debug!(SOURCE, "Frame loop finished after {} frames", frames);
    Ok(frames)
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
