//! Window shell: winit event loop + softbuffer presentation.
//!
//! Single-threaded and event-driven: key events are delivered and processed
//! synchronously, one at a time, and the viewport is only ever touched from
//! this thread. A window closed externally is the `SurfaceClosed` fault; the
//! policy is to reinitialize the window and replay the last successful render
//! from scratch, with a bounded number of attempts.

use crate::controller::{ViewCommand, ViewController};
use crate::error::{Error, Result};
use crate::fit::FitOptions;
use crate::raster::RasterSurface;
use crate::viewport::PanDirection;
use carta::MapDocument;
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

/// Restarts allowed after external window closes before giving up.
pub const MAX_SURFACE_RESTARTS: u32 = 3;

/// Tracks reinitialize-and-replay attempts after external window closes.
///
/// Holds the terminal decision apart from the event loop so it can be
/// exercised without a window system.
#[derive(Debug, Default)]
struct RestartBudget {
    used: u32,
}

impl RestartBudget {
    /// Account for one external close. Returns the attempt number when
    /// another restart is allowed, or [`Error::SurfaceExhausted`] once the
    /// budget is spent.
    fn on_surface_closed(&mut self) -> Result<u32> {
        if self.used >= MAX_SURFACE_RESTARTS {
            return Err(Error::SurfaceExhausted {
                attempts: self.used,
            });
        }
        self.used += 1;
        Ok(self.used)
    }
}

/// Load an SVG file and view it interactively.
///
/// Keyboard surface: `i` zoom in, `o` zoom out, arrow keys pan, `q` or
/// Escape quit.
pub fn view_file(path: &std::path::Path) -> Result<()> {
    let doc = MapDocument::read_file(path)?;
    if doc.is_empty() {
        return Err(Error::EmptyInput);
    }
    let controller = ViewController::new(doc.paths, &FitOptions::default())?;
    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "carta".to_string());
    run(controller, title)
}

/// Run the event loop until quit, terminal failure, or restart exhaustion.
pub fn run(controller: ViewController, title: String) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| Error::Window(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp {
        controller,
        title,
        window: None,
        surface: None,
        restarts: RestartBudget::default(),
        outcome: Ok(()),
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| Error::Window(e.to_string()))?;
    app.outcome
}

struct ViewerApp {
    controller: ViewController,
    title: String,
    window: Option<Arc<Window>>,
    surface: Option<softbuffer::Surface<Arc<Window>, Arc<Window>>>,
    restarts: RestartBudget,
    outcome: Result<()>,
}

impl ViewerApp {
    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.controller.window_size();
        // Sized to the fitted content; zoom and pan change what is visible,
        // not the window geometry.
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| Error::Window(e.to_string()))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| Error::Window(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| Error::Window(e.to_string()))?;

        window.request_redraw();
        self.window = Some(window);
        self.surface = Some(surface);
        Ok(())
    }

    /// Rasterize the current view and blit it to the window.
    fn redraw(&mut self) -> Result<()> {
        let Some(window) = &self.window else {
            return Ok(());
        };
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let mut raster = RasterSurface::new(width, height, self.controller.viewport)?;
        self.controller.render(&mut raster)?;

        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| Error::Window("no softbuffer surface".to_string()))?;
        surface
            .resize(
                NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
                NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
            )
            .map_err(|e| Error::Window(e.to_string()))?;

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| Error::Window(e.to_string()))?;
        for (dst, src) in buffer
            .iter_mut()
            .zip(raster.pixmap().data().chunks_exact(4))
        {
            *dst = (u32::from(src[0]) << 16) | (u32::from(src[1]) << 8) | u32::from(src[2]);
        }
        buffer.present().map_err(|e| Error::Window(e.to_string()))?;
        Ok(())
    }

    /// Full restart after an external close: new window, replay the render.
    fn handle_surface_closed(&mut self, event_loop: &ActiveEventLoop) {
        let attempt = match self.restarts.on_surface_closed() {
            Ok(n) => n,
            Err(err) => {
                self.outcome = Err(err);
                event_loop.exit();
                return;
            }
        };

        tracing::warn!(
            fault = %Error::SurfaceClosed,
            restart = attempt,
            max = MAX_SURFACE_RESTARTS,
            "reinitializing drawing surface"
        );
        self.window = None;
        self.surface = None;
        if let Err(err) = self.create_surface(event_loop) {
            self.outcome = Err(err);
            event_loop.exit();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        self.outcome = Err(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.create_surface(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.handle_surface_closed(event_loop);
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let Some(command) = command_for_key(&event.logical_key) else {
                    return;
                };
                if command == ViewCommand::Quit {
                    event_loop.exit();
                    return;
                }
                if self.controller.apply(command) {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }

            _ => {}
        }
    }
}

/// One handler per key; duplicate bindings cannot exist by construction.
fn command_for_key(key: &Key) -> Option<ViewCommand> {
    match key {
        Key::Character(text) => match text.as_str() {
            "i" => Some(ViewCommand::ZoomIn),
            "o" => Some(ViewCommand::ZoomOut),
            "q" => Some(ViewCommand::Quit),
            _ => None,
        },
        Key::Named(named) => match named {
            NamedKey::ArrowLeft => Some(ViewCommand::Pan(PanDirection::Left)),
            NamedKey::ArrowRight => Some(ViewCommand::Pan(PanDirection::Right)),
            NamedKey::ArrowUp => Some(ViewCommand::Pan(PanDirection::Up)),
            NamedKey::ArrowDown => Some(ViewCommand::Pan(PanDirection::Down)),
            NamedKey::Escape => Some(ViewCommand::Quit),
            _ => None,
        },
        _ => None,
    }
}
