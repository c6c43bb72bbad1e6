//! Platform-agnostic input events.
//!
//! The engine consumes these instead of raw windowing events so hit
//! testing works the same whether events arrive from winit, a web
//! bridge, or tests. The viewer captures cursor and click events at the
//! window level and forwards them here.

/// Platform-agnostic input events fed to
/// [`NavRenderEngine::handle_input`](crate::engine::NavRenderEngine::handle_input).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Last known cursor position, in physical pixels.
///
/// Transient per-event state — consumed by hover and click hit tests,
/// never persisted beyond the current frame's dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Cursor position, `None` until the first move event.
    pub position: Option<(f32, f32)>,
}

impl PointerState {
    /// Record a cursor move.
    pub fn moved(&mut self, x: f32, y: f32) {
        self.position = Some((x, y));
    }
}
