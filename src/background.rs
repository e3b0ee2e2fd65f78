//! Background image loading and texture upload.

use std::path::Path;
use std::sync::Arc;

use glow::HasContext;
use image::{Rgba, RgbaImage};

use crate::config::BackgroundConfig;
use crate::constants::{BACKGROUND_FALLBACK_CELL, BACKGROUND_FALLBACK_SIZE};
use crate::error::AppError;
use crate::transform::BackgroundInfo;

/// The repeating background, resident on the GPU.
pub struct Background {
    gl: Arc<glow::Context>,
    pub texture: glow::Texture,
    pub width: u32,
    pub height: u32,
}

impl Background {
    /// Load the configured image, falling back to a generated checkerboard
    /// when it cannot be read.
    pub fn load(gl: Arc<glow::Context>, path: &Path) -> Result<Self, AppError> {
        let img = match image::open(path) {
            Ok(img) => img.into_rgba8(),
            Err(e) => {
                log::warn!(
                    "Failed to load background {}: {}; using checkerboard",
                    path.display(),
                    e
                );
                checkerboard(BACKGROUND_FALLBACK_SIZE, BACKGROUND_FALLBACK_CELL)
            }
        };

        let (width, height) = img.dimensions();

        let texture = unsafe {
            let tex = gl
                .create_texture()
                .map_err(|e| AppError::Gl(format!("Failed to create texture: {}", e)))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));

            // Wrap addressing is what tiles the image past [0, 1]
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);

            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(img.as_raw()),
            );

            gl.bind_texture(glow::TEXTURE_2D, None);
            tex
        };

        log::info!("Background texture {}x{}", width, height);

        Ok(Self {
            gl,
            texture,
            width,
            height,
        })
    }

    /// Metadata the UV transform needs, with tiling from the config.
    pub fn info(&self, config: &BackgroundConfig) -> BackgroundInfo {
        BackgroundInfo {
            width: self.width as f32,
            height: self.height as f32,
            tiling: config.tiling,
            offset: config.offset(),
        }
    }

    /// Bind this texture to a texture unit
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}

/// Two-tone checkerboard that tiles seamlessly.
fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([54, 62, 86, 255])
        } else {
            Rgba([32, 36, 52, 255])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_tiles_seamlessly() {
        let img = checkerboard(64, 16);
        assert_eq!(img.dimensions(), (64, 64));
        // An even number of cells keeps the pattern continuous across the wrap.
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(63, 0));
        assert_eq!(img.get_pixel(0, 0), img.get_pixel(63, 63));
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(16, 0));
    }
}
