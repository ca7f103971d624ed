//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use atomviz::Viewer;
//! Viewer::builder()
//!     .with_title("Atom")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::AtomVizError, input::DOLLY_PER_PIXEL, options::Options, AtomEngine,
    InputEvent, MouseButton,
};

/// Fraction of the primary monitor the window covers on startup.
const INITIAL_WINDOW_FRACTION: f64 = 0.75;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "atomviz".into(),
        }
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
            options: self.options.unwrap_or_default(),
            title: self.title,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the animated atom.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    stop: Arc<AtomicBool>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Flag that ends the frame loop when set. Checked before each frame.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the stop handle is set.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), AtomVizError> {
        let event_loop =
            EventLoop::new().map_err(|e| AtomVizError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            stop: self.stop,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| AtomVizError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<AtomEngine>,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
    stop: Arc<AtomicBool>,
}

/// Surface size for a window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Wheel delta in notches, positive when scrolling away from the user.
#[allow(clippy::cast_possible_truncation)]
fn scroll_notches(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * DOLLY_PER_PIXEL,
    }
}

impl ViewerApp {
    fn window_attributes(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> winit::window::WindowAttributes {
        let attrs = Window::default_attributes().with_title(&self.title);
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let Some(monitor) = monitor else {
            return attrs;
        };
        let size = monitor.size().to_logical::<f64>(monitor.scale_factor());
        attrs.with_inner_size(winit::dpi::LogicalSize::new(
            size.width * INITIAL_WINDOW_FRACTION,
            size.height * INITIAL_WINDOW_FRACTION,
        ))
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.stop.load(Ordering::Relaxed) {
            log::info!("stop requested, closing viewer");
            event_loop.exit();
            return;
        }
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match engine.frame() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let (w, h) = viewport_size(window.inner_size());
                engine.recover_surface(w, h);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window =
            match event_loop.create_window(self.window_attributes(event_loop)) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("failed to create window: {e}");
                    event_loop.exit();
                    return;
                }
            };

        let size = viewport_size(window.inner_size());
        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(AtomEngine::new(
            Arc::clone(&window),
            size,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("failed to initialize engine: {e}");
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
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw(event_loop);
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                let _ = engine.resize(w, h);
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let Some(button) = MouseButton::from_winit(button) else {
                    return;
                };
                let _ = engine.handle_input(InputEvent::MouseButton {
                    button,
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let _ = engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } => {
                let _ = engine.handle_input(InputEvent::CursorLeft);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let _ = engine.handle_input(InputEvent::Scroll {
                    delta: scroll_notches(delta),
                });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                let _ = engine.handle_input(InputEvent::ModifiersChanged {
                    pan_modifier: state.shift_key()
                        || state.control_key()
                        || state.super_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let _ = engine.handle_key_press(&format!("{code:?}"));
            }

            _ => (),
        }
    }
}
