//! Shared vector helpers for connector geometry.
//!
//! All angles are in radians, measured with `atan2(dy, dx)` in the SVG
//! coordinate system (y grows downward).

pub(crate) fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Angle of the ray from `a` to `b`. Callers must special-case identical
/// points; `atan2(0, 0)` is 0 by convention, which reads as "due right" and
/// would silently skew downstream offsets.
pub(crate) fn angle_between(a: (f32, f32), b: (f32, f32)) -> f32 {
    (b.1 - a.1).atan2(b.0 - a.0)
}

/// Displacement rotated 90 degrees from `angle`, scaled by `magnitude`.
/// The `(sin, -cos)` convention is load-bearing: every caller relies on
/// increasing magnitude moving consistently to the same side of the ray so
/// that fan-out slots stay symmetric.
pub(crate) fn perpendicular_offset(angle: f32, magnitude: f32) -> (f32, f32) {
    (angle.sin() * magnitude, -angle.cos() * magnitude)
}
