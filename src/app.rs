//! Application window and OpenGL context management.
//!
//! This module handles window creation, OpenGL context setup, and surface
//! resizing. It keeps platform/graphics concerns out of the camera code.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::config::WindowConfig;
use crate::error::AppError;

/// Result of window and GL context creation.
pub struct WindowContext {
    pub window: Window,
    pub gl_surface: glutin::surface::Surface<WindowSurface>,
    pub gl_context: glutin::context::PossiblyCurrentContext,
    pub gl: Arc<glow::Context>,
}

/// Create a resizable window with an OpenGL 3.3 context.
pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
) -> Result<WindowContext, AppError> {
    let window_attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(true);

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            // glutin only calls the picker with a non-empty set
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .expect("no GL configs offered")
        })
        .map_err(|e| AppError::Window(e.to_string()))?;

    let window = window.ok_or_else(|| AppError::Window("no window was created".to_string()))?;
    let window_handle = window
        .window_handle()
        .map_err(|e| AppError::Window(e.to_string()))?;
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window_handle.as_raw()));

    let gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attrs)
            .map_err(|e| AppError::Gl(format!("Failed to create OpenGL context: {}", e)))?
    };

    let size = window.inner_size();
    let (width, height) = non_zero_size(size.width, size.height)
        .ok_or_else(|| AppError::Window("window has zero size".to_string()))?;
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle.as_raw(),
        width,
        height,
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .map_err(|e| AppError::Gl(format!("Failed to create surface: {}", e)))?
    };

    let gl_context = gl_context
        .make_current(&gl_surface)
        .map_err(|e| AppError::Gl(format!("Failed to make context current: {}", e)))?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(&s) as *const _,
            Err(_) => std::ptr::null(),
        })
    });

    log::info!("Created {}x{} window with OpenGL 3.3", size.width, size.height);

    Ok(WindowContext {
        window,
        gl_surface,
        gl_context,
        gl,
    })
}

/// Resize the GL surface to match the window size.
///
/// Minimized windows report a zero size; the surface keeps its old size then.
pub fn resize_surface(
    gl_surface: &glutin::surface::Surface<WindowSurface>,
    gl_context: &glutin::context::PossiblyCurrentContext,
    width: u32,
    height: u32,
) {
    if let Some((width, height)) = non_zero_size(width, height) {
        gl_surface.resize(gl_context, width, height);
    }
}

fn non_zero_size(width: u32, height: u32) -> Option<(NonZeroU32, NonZeroU32)> {
    Some((NonZeroU32::new(width)?, NonZeroU32::new(height)?))
}
