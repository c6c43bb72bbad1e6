//! Standalone header window backed by winit.
//!
//! ```no_run
//! # use ripplenav::Viewer;
//! Viewer::builder()
//!     .with_font_path("assets/fonts/nav.typeface.json")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowId},
};

use crate::{
    error::NavError,
    navigation::{LogNavigator, Navigator},
    options::Options,
    scene::{self, NavItem},
    InputEvent, MouseButton, NavRenderEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    font_path: PathBuf,
    items: Option<Vec<NavItem>>,
    navigator: Option<Box<dyn Navigator>>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "ripplenav",
    /// default items, logging navigator).
    fn new() -> Self {
        Self {
            font_path: PathBuf::from("assets/fonts/nav.typeface.json"),
            items: None,
            navigator: None,
            options: None,
            title: "ripplenav".into(),
        }
    }

    /// Set the font-outline file path.
    #[must_use]
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = path.into();
        self
    }

    /// Replace the default nav items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<NavItem>) -> Self {
        self.items = Some(items);
        self
    }

    /// Supply the host navigator (defaults to a logging stub).
    #[must_use]
    pub fn with_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            font_path: self.font_path,
            items: self.items.unwrap_or_else(scene::default_items),
            navigator: self
                .navigator
                .unwrap_or_else(|| Box::new(LogNavigator::default())),
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the navigation header.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    font_path: PathBuf,
    items: Vec<NavItem>,
    navigator: Box<dyn Navigator>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed; the engine (and every GPU resource) is dropped on
    /// return.
    pub fn run(self) -> Result<(), NavError> {
        let event_loop =
            EventLoop::new().map_err(|e| NavError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            font_path: self.font_path,
            items: Some(self.items),
            navigator: Some(self.navigator),
            options: Some(self.options),
            title: self.title,
            hover_shown: false,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| NavError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<NavRenderEngine>,
    font_path: PathBuf,
    items: Option<Vec<NavItem>>,
    navigator: Option<Box<dyn Navigator>>,
    options: Option<Options>,
    title: String,
    /// Whether the pointer cursor is currently shown for a hover.
    hover_shown: bool,
}

impl ViewerApp {
    /// Apply hover cursor feedback after any event that can change the
    /// hovered label.
    fn apply_hover_cursor(&mut self) {
        let Some(engine) = &self.engine else {
            return;
        };
        if !engine.options().display.hover_cursor {
            return;
        }
        let hovering = engine.hovered().is_some();
        if hovering != self.hover_shown {
            self.hover_shown = hovering;
            if let Some(window) = &self.window {
                window.set_cursor(if hovering {
                    CursorIcon::Pointer
                } else {
                    CursorIcon::Default
                });
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));

        let engine_result = pollster::block_on(NavRenderEngine::new(
            window.clone(),
            size,
            self.font_path.clone(),
            self.items.take().unwrap_or_else(scene::default_items),
            self.navigator
                .take()
                .unwrap_or_else(|| Box::new(LogNavigator::default())),
            self.options.take().unwrap_or_default(),
        ));

        let engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width.max(1), size.height.max(1));
                }
                self.apply_hover_cursor();
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                engine.resize(
                                    inner.width.max(1),
                                    inner.height.max(1),
                                );
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::CursorMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
                self.apply_hover_cursor();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_input(InputEvent::MouseButton {
                        button: MouseButton::from(button),
                        pressed: state == ElementState::Pressed,
                    });
                }
            }

            _ => (),
        }
    }
}
