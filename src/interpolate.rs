//! Per-frame damped approach of a scalar toward a target.
//!
//! Storing the result back into the value every frame gives a smooth ease-out
//! over multiple frames. The step is a fixed fraction per call and is not
//! scaled by elapsed time, so the feel assumes a steady (vsync-locked) cadence.

/// Move `current` a fraction `speed` of the way to `target`.
///
/// The blended value is clamped between `current` and `target`, so the result
/// never overshoots even when `speed > 1`. Once the remaining gap is below
/// `snap`, `target` is returned exactly, which ends the asymptotic approach.
pub fn interpolate(current: f32, target: f32, speed: f32, snap: f32) -> f32 {
    let blended = current + (target - current) * speed;

    let blended = if current < target {
        blended.clamp(current, target)
    } else {
        blended.clamp(target, current)
    };

    if (target - blended).abs() < snap {
        target
    } else {
        blended
    }
}
