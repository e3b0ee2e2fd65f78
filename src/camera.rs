use glam::Vec2;

use crate::interpolate::interpolate;
use crate::transform::{self, Viewport};
use crate::zoom::ZoomRange;

/// Tuning the camera is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Interpolation rate per frame, in (0, 1]
    pub speed: f32,
    /// Gap below which current values snap onto their targets
    pub snap_distance: f32,
    /// Radians added or removed per rotate keypress
    pub rotation_step: f32,
    /// Starting scale; `None` starts at the zoom range's maximum
    pub initial_scale: Option<f32>,
    pub zoom: ZoomRange,
}

/// Pan, zoom and rotation of the single viewport over the background.
///
/// Input sets targets; [`CameraState::advance`] moves the current values one
/// step toward them per frame. Pan is applied directly while dragging.
pub struct CameraState {
    /// World-space pan, in background pixels
    pub offset: Vec2,
    scale: f32,
    target_scale: f32,
    rotation: f32,
    target_rotation: f32,
    speed: f32,
    snap_distance: f32,
    rotation_step: f32,
    zoom: ZoomRange,
    origin: Vec2,
    // Drag session
    drag_anchor: Vec2,
    is_dragged: bool,
    mouse_world: Vec2,
}

impl CameraState {
    pub fn new(settings: &CameraSettings, viewport: Viewport) -> Self {
        let scale = settings
            .zoom
            .clamp(settings.initial_scale.unwrap_or(settings.zoom.max_scale()));

        Self {
            offset: Vec2::ZERO,
            scale,
            target_scale: scale,
            rotation: 0.0,
            target_rotation: 0.0,
            speed: settings.speed,
            snap_distance: settings.snap_distance,
            rotation_step: settings.rotation_step,
            zoom: settings.zoom,
            origin: viewport.origin(),
            drag_anchor: Vec2::ZERO,
            is_dragged: false,
            mouse_world: Vec2::ZERO,
        }
    }

    /// Recompute the zoom/rotation pivot from the current viewport size.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.origin = viewport.origin();
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn target_rotation(&self) -> f32 {
        self.target_rotation
    }

    pub fn is_dragged(&self) -> bool {
        self.is_dragged
    }

    pub fn mouse_world(&self) -> Vec2 {
        self.mouse_world
    }

    /// Step the target scale by scroll notches (positive zooms in).
    pub fn scroll(&mut self, notches: f32) {
        if notches != 0.0 {
            self.target_scale = self.zoom.scroll(self.target_scale, notches);
        }
    }

    // Rotation accumulates without wrapping.
    pub fn rotate_left(&mut self) {
        self.target_rotation += self.rotation_step;
    }

    pub fn rotate_right(&mut self) {
        self.target_rotation -= self.rotation_step;
    }

    /// Map the cursor into world space using the transform as it stands now,
    /// before this frame's pan is applied.
    pub fn sample_mouse(&mut self, screen: Vec2) {
        self.mouse_world = transform::screen_to_world(self, screen);
    }

    pub fn begin_drag(&mut self) {
        self.drag_anchor = self.mouse_world;
        self.is_dragged = true;
        log::debug!("drag started at world {:?}", self.drag_anchor);
    }

    /// Pan so the anchored world point sits under the cursor again.
    pub fn continue_drag(&mut self) {
        if !self.is_dragged {
            return;
        }
        self.offset += self.drag_anchor - self.mouse_world;
        self.mouse_world = self.drag_anchor;
    }

    pub fn end_drag(&mut self) {
        if self.is_dragged {
            self.is_dragged = false;
            log::debug!("drag ended, offset {:?}", self.offset);
        }
    }

    /// Move scale and rotation one interpolation step toward their targets.
    ///
    /// Scale is interpolated in the zoom distance domain so the animation
    /// slows down uniformly at every zoom level.
    pub fn advance(&mut self) {
        let mapping = self.zoom.mapping();
        let target_distance = mapping.to_distance(self.target_scale);
        let distance = interpolate(
            mapping.to_distance(self.scale),
            target_distance,
            self.speed,
            self.snap_distance,
        );
        // Land exactly on the target instead of a round-trip approximation.
        self.scale = if distance == target_distance {
            self.target_scale
        } else {
            mapping.from_distance(distance)
        };

        self.rotation = interpolate(
            self.rotation,
            self.target_rotation,
            self.speed,
            self.snap_distance,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoom::ZoomMapping;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f32::consts::{FRAC_PI_4, FRAC_PI_8};

    fn settings(min: f32, max: f32, step: f32, initial: Option<f32>) -> CameraSettings {
        CameraSettings {
            speed: 0.08,
            snap_distance: 0.001,
            rotation_step: FRAC_PI_8,
            initial_scale: initial,
            zoom: ZoomRange::new(min, max, step, ZoomMapping::NegativeLog).unwrap(),
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn settle(camera: &mut CameraState) {
        for _ in 0..2000 {
            camera.advance();
        }
    }

    #[test]
    fn test_starts_at_max_scale_without_initial_scale() {
        let camera = CameraState::new(&settings(0.5, 4.0, 0.1, None), viewport());
        assert_eq!(camera.scale(), 4.0);
        assert_eq!(camera.target_scale(), 4.0);
        assert_eq!(camera.rotation(), 0.0);
        assert_eq!(camera.offset, Vec2::ZERO);
        assert_eq!(camera.origin(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_initial_scale_is_clamped() {
        let camera = CameraState::new(&settings(0.5, 4.0, 0.1, Some(100.0)), viewport());
        assert_eq!(camera.scale(), 4.0);
    }

    #[test]
    fn test_zoom_in_scenario_capped_at_max() {
        let mut camera = CameraState::new(&settings(0.1, 1.0, 0.001, Some(1.0)), viewport());
        camera.scroll(3.0);
        assert_eq!(camera.target_scale(), 1.0);
        camera.advance();
        assert_eq!(camera.scale(), 1.0);
    }

    #[test]
    fn test_zoom_in_scenario_moves_monotonically() {
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.001, Some(1.0)), viewport());
        camera.scroll(3.0);
        let target = camera.target_scale();
        assert!((target - 0.003_f32.exp()).abs() < 1e-6);

        let mut previous = camera.scale();
        for _ in 0..500 {
            camera.advance();
            assert!(camera.scale() >= previous);
            assert!(camera.scale() <= target);
            previous = camera.scale();
        }
        assert_eq!(camera.scale(), target);
    }

    #[test]
    fn test_zoom_out_settles_on_target() {
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.25, Some(1.0)), viewport());
        camera.scroll(-4.0);
        settle(&mut camera);
        assert_eq!(camera.scale(), camera.target_scale());
        assert!((camera.scale() - (-1.0_f32).exp()).abs() < 1e-5);
    }

    #[test]
    fn test_zero_scroll_is_noop() {
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.25, Some(2.0)), viewport());
        camera.scroll(0.0);
        assert_eq!(camera.target_scale(), 2.0);
    }

    #[test]
    fn test_two_left_rotations_settle_at_quarter_pi() {
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.25, Some(1.0)), viewport());
        camera.rotate_left();
        camera.rotate_left();
        assert!((camera.target_rotation() - FRAC_PI_4).abs() < 1e-6);

        settle(&mut camera);
        assert_eq!(camera.rotation(), camera.target_rotation());
        camera.advance();
        assert_eq!(camera.rotation(), camera.target_rotation());
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.25, Some(1.0)), viewport());
        for _ in 0..20 {
            camera.rotate_left();
        }
        assert!((camera.target_rotation() - 20.0 * FRAC_PI_8).abs() < 1e-5);
    }

    #[test]
    fn test_continue_drag_without_session_is_noop() {
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.25, Some(1.0)), viewport());
        camera.sample_mouse(Vec2::new(10.0, 10.0));
        camera.continue_drag();
        assert_eq!(camera.offset, Vec2::ZERO);
    }

    #[test]
    fn test_drag_keeps_anchor_under_cursor() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut camera = CameraState::new(&settings(0.1, 10.0, 0.25, Some(1.0)), viewport());
        camera.scroll(3.0);
        camera.rotate_left();
        camera.rotate_left();
        camera.rotate_left();
        settle(&mut camera);

        let start = Vec2::new(200.0, 150.0);
        camera.sample_mouse(start);
        camera.begin_drag();
        let anchor = camera.mouse_world();
        camera.advance();

        for _ in 0..100 {
            let cursor = Vec2::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
            camera.sample_mouse(cursor);
            camera.continue_drag();
            camera.advance();

            assert_eq!(camera.mouse_world(), anchor);
            let under_cursor = transform::screen_to_world(&camera, cursor);
            assert!(
                under_cursor.abs_diff_eq(anchor, 1e-2),
                "{under_cursor:?} drifted from {anchor:?}"
            );
        }

        camera.end_drag();
        assert!(!camera.is_dragged());
    }
}
