#![allow(dead_code)]

mod app;
mod background;
mod camera;
mod config;
mod constants;
mod error;
mod input;
mod interpolate;
mod renderer;
mod transform;
mod zoom;

use std::path::PathBuf;
use std::sync::Arc;

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use background::Background;
use camera::{CameraSettings, CameraState};
use config::AppConfig;
use error::AppError;
use input::{CameraBindings, InputState};
use renderer::Renderer;
use transform::{BackgroundInfo, Viewport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    let settings = config.camera_settings()?;

    // Keep the server alive for the whole run
    let _profiler = if config.profiling {
        start_profiler()
    } else {
        None
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, settings);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn start_profiler() -> Option<puffin_http::Server> {
    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            puffin::set_scopes_on(true);
            log::info!("Serving puffin profile data on {}", addr);
            Some(server)
        }
        Err(e) => {
            log::warn!("Failed to start puffin server on {}: {}", addr, e);
            None
        }
    }
}

struct App {
    config: AppConfig,
    settings: CameraSettings,
    bindings: CameraBindings,
    state: Option<AppState>,
    /// Startup failure raised inside the event loop, reported after it exits
    error: Option<AppError>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,

    // Rendering
    renderer: Renderer,
    background: Background,
    background_info: BackgroundInfo,
    viewport: Viewport,

    // Camera and input
    camera: CameraState,
    input: InputState,
}

impl App {
    fn new(config: AppConfig, settings: CameraSettings) -> Self {
        Self {
            config,
            settings,
            bindings: CameraBindings::default(),
            state: None,
            error: None,
        }
    }

    fn init_state(&self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
        } = app::create_window(event_loop, &self.config.window)?;

        let size = window.inner_size();
        let viewport = Viewport::new(size.width as f32, size.height as f32);

        let renderer = Renderer::new(Arc::clone(&gl))?;
        renderer.resize(size.width as i32, size.height as i32);

        let background = Background::load(gl, &self.config.background.path)?;
        let background_info = background.info(&self.config.background);

        Ok(AppState {
            window,
            gl_surface,
            gl_context,
            renderer,
            background,
            background_info,
            viewport,
            camera: CameraState::new(&self.settings, viewport),
            input: InputState::new(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Startup failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.renderer.resize(size.width as i32, size.height as i32);
                log::debug!("Resized to {}x{}", size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                state.input.release_all();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    state.input.on_key(key, event.state, event.repeat);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.input.on_cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state: btn_state, button, .. } => {
                state.input.on_mouse_button(button, btn_state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                state.input.on_scroll(delta);
            }
            WindowEvent::RedrawRequested => {
                puffin::GlobalProfiler::lock().new_frame();

                if state.update(&self.bindings) {
                    event_loop.exit();
                    return;
                }
                if let Err(e) = state.render() {
                    log::error!("Render failed: {}", e);
                    event_loop.exit();
                    return;
                }
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    /// Input, then targets, then interpolation. Returns true on quit.
    fn update(&mut self, bindings: &CameraBindings) -> bool {
        puffin::profile_function!();

        let size = self.window.inner_size();
        if size.width > 0 && size.height > 0 {
            self.viewport = Viewport::new(size.width as f32, size.height as f32);
            self.camera.set_viewport(self.viewport);
        }

        let intent = input::apply_camera_input(&self.input, bindings, &mut self.camera);
        self.camera.advance();
        self.input.end_frame();

        intent.quit
    }

    /// Rebuild the matrices from the advanced state and draw.
    fn render(&mut self) -> Result<(), AppError> {
        puffin::profile_function!();

        let uniforms = transform::frame_uniforms(&self.camera, self.viewport, &self.background_info);
        self.renderer.render(&uniforms, &self.background);

        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| AppError::Gl(format!("Failed to swap buffers: {}", e)))
    }
}
