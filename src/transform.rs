//! Matrices derived from the camera each frame.
//!
//! All matrices use glam's column-vector convention, so a product applies
//! right to left. Screen space is in pixels with the origin at the top-left
//! corner and y pointing down, matching cursor coordinates.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::CameraState;

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the viewport; zoom and rotation pivot around it.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Background image metadata plus how it is laid over the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundInfo {
    /// Image width in pixels
    pub width: f32,
    /// Image height in pixels
    pub height: f32,
    /// Tiling density: world pixels covered by one image pixel
    pub tiling: f32,
    /// Sub-pixel shift of the tiling grid, in world pixels
    pub offset: Vec2,
}

/// Uniform inputs for the tiling shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub view_projection: Mat4,
    pub uv_transform: Mat4,
}

/// World-to-screen transform.
///
/// Applied to a point: shift by `-origin`, shift by `-offset`, rotate, scale,
/// then shift back by `+origin`. Zoom and rotation therefore pivot around the
/// viewport center rather than the world origin.
pub fn view_matrix(camera: &CameraState) -> Mat4 {
    let origin = camera.origin().extend(0.0);
    let scale = camera.scale();

    Mat4::from_translation(origin)
        * Mat4::from_scale(Vec3::new(scale, scale, 1.0))
        * Mat4::from_rotation_z(camera.rotation())
        * Mat4::from_translation(-camera.offset.extend(0.0))
        * Mat4::from_translation(-origin)
}

/// Screen-to-world transform.
///
/// Relies on the scale never reaching zero, which `ZoomRange` guarantees.
pub fn inverse_view_matrix(camera: &CameraState) -> Mat4 {
    view_matrix(camera).inverse()
}

pub fn screen_to_world(camera: &CameraState, screen: Vec2) -> Vec2 {
    inverse_view_matrix(camera)
        .transform_point3(screen.extend(0.0))
        .truncate()
}

pub fn world_to_screen(camera: &CameraState, world: Vec2) -> Vec2 {
    view_matrix(camera)
        .transform_point3(world.extend(0.0))
        .truncate()
}

/// Maps the unit quad onto the full viewport in clip space.
///
/// The y axis is flipped so that quad corner (0, 0) lands at the top-left.
pub fn quad_view_projection(viewport: Viewport) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, viewport.width, viewport.height, 0.0, -1.0, 1.0)
        * Mat4::from_scale(Vec3::new(viewport.width, viewport.height, 1.0))
}

/// Maps normalized screen coordinates (the quad's texcoords, `[0, 1]` across
/// the viewport) to background sample coordinates.
///
/// This is the inverse of laying the image into the world: image UV to image
/// pixels, times tiling, plus offset, through the view, divided by the
/// viewport size. Results outside `[0, 1]` are expected and rely on a
/// repeating sampler to tile the image.
pub fn uv_transform(camera: &CameraState, viewport: Viewport, background: &BackgroundInfo) -> Mat4 {
    Mat4::from_scale(Vec3::new(1.0 / background.width, 1.0 / background.height, 1.0))
        * Mat4::from_scale(Vec3::new(1.0 / background.tiling, 1.0 / background.tiling, 1.0))
        * Mat4::from_translation(-background.offset.extend(0.0))
        * inverse_view_matrix(camera)
        * Mat4::from_scale(Vec3::new(viewport.width, viewport.height, 1.0))
}

/// Rebuilds every uniform from scratch for the current camera state.
pub fn frame_uniforms(
    camera: &CameraState,
    viewport: Viewport,
    background: &BackgroundInfo,
) -> FrameUniforms {
    FrameUniforms {
        view_projection: quad_view_projection(viewport),
        uv_transform: uv_transform(camera, viewport, background),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use crate::zoom::{ZoomMapping, ZoomRange};
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-3;

    fn settings(initial_scale: f32) -> CameraSettings {
        CameraSettings {
            speed: 1.0,
            snap_distance: 0.001,
            rotation_step: FRAC_PI_2,
            initial_scale: Some(initial_scale),
            zoom: ZoomRange::new(0.1, 10.0, 0.25, ZoomMapping::NegativeLog).unwrap(),
        }
    }

    fn camera(initial_scale: f32) -> CameraState {
        CameraState::new(&settings(initial_scale), Viewport::new(800.0, 600.0))
    }

    fn background() -> BackgroundInfo {
        BackgroundInfo {
            width: 256.0,
            height: 128.0,
            tiling: 2.0,
            offset: Vec2::new(0.5, 0.25),
        }
    }

    #[test]
    fn test_default_camera_view_is_identity() {
        let cam = camera(1.0);
        assert!(view_matrix(&cam).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_origin_stays_fixed_under_zoom_and_rotation() {
        let mut cam = camera(2.0);
        cam.rotate_left();
        cam.advance();

        let center = Vec2::new(400.0, 300.0);
        assert!(world_to_screen(&cam, center).abs_diff_eq(center, EPS));
    }

    #[test]
    fn test_scale_doubles_distance_from_center() {
        let cam = camera(2.0);
        let screen = world_to_screen(&cam, Vec2::new(500.0, 300.0));
        assert!(screen.abs_diff_eq(Vec2::new(600.0, 300.0), EPS));
    }

    #[test]
    fn test_offset_moves_world_left_on_screen() {
        let mut cam = camera(1.0);
        cam.offset = Vec2::new(50.0, -20.0);
        let screen = world_to_screen(&cam, Vec2::new(450.0, 280.0));
        assert!(screen.abs_diff_eq(Vec2::new(400.0, 300.0), EPS));
    }

    #[test]
    fn test_inverse_view_round_trip() {
        let mut cam = camera(3.0);
        cam.offset = Vec2::new(-123.0, 45.5);
        cam.rotate_right();
        cam.advance();

        let view = view_matrix(&cam);
        assert!((inverse_view_matrix(&cam) * view).abs_diff_eq(Mat4::IDENTITY, 1e-3));

        for screen in [Vec2::ZERO, Vec2::new(800.0, 600.0), Vec2::new(17.0, 512.0)] {
            let world = screen_to_world(&cam, screen);
            assert!(world_to_screen(&cam, world).abs_diff_eq(screen, EPS));
        }
    }

    #[test]
    fn test_uv_transform_inverts_image_layout() {
        let mut cam = camera(1.5);
        cam.offset = Vec2::new(10.0, 20.0);
        cam.rotate_left();
        cam.advance();
        let viewport = Viewport::new(800.0, 600.0);
        let bg = background();

        let forward = Mat4::from_scale(Vec3::new(1.0 / viewport.width, 1.0 / viewport.height, 1.0))
            * view_matrix(&cam)
            * Mat4::from_translation(bg.offset.extend(0.0))
            * Mat4::from_scale(Vec3::new(bg.tiling, bg.tiling, 1.0))
            * Mat4::from_scale(Vec3::new(bg.width, bg.height, 1.0));

        let uv = uv_transform(&cam, viewport, &bg);
        assert!((uv * forward).abs_diff_eq(Mat4::IDENTITY, 1e-3));
    }

    #[test]
    fn test_uv_one_period_per_tiled_image_width() {
        let cam = camera(1.0);
        let viewport = Viewport::new(800.0, 600.0);
        let bg = BackgroundInfo {
            width: 100.0,
            height: 100.0,
            tiling: 1.0,
            offset: Vec2::ZERO,
        };
        let uv = uv_transform(&cam, viewport, &bg);

        // 800 screen pixels at scale 1 cover eight 100px tiles.
        let left = uv.transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let right = uv.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!(((right.x - left.x) - 8.0).abs() < EPS);
    }

    #[test]
    fn test_quad_covers_clip_space() {
        let vp = quad_view_projection(Viewport::new(640.0, 480.0));
        let top_left = vp.transform_point3(Vec3::new(0.0, 0.0, 0.0));
        let bottom_right = vp.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!(top_left.truncate().abs_diff_eq(Vec2::new(-1.0, 1.0), 1e-6));
        assert!(bottom_right.truncate().abs_diff_eq(Vec2::new(1.0, -1.0), 1e-6));
    }
}
