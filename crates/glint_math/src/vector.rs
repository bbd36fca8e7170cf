//! Vector helpers that glam does not provide in the form the tracer needs.

use crate::Vec3;

/// Threshold below which every component counts as zero.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Normalize `v`, returning the zero vector for zero-length input instead of NaNs.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// True if all three components are smaller than [`NEAR_ZERO_EPSILON`] in magnitude.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the plane with normal `n`.
/// `n` is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n` (Snell's law).
///
/// `etai_over_etat` is the ratio of refractive indices on the incoming and
/// outgoing side. The radicand is clamped at zero so rounding noise near the
/// critical angle cannot produce NaN.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).max(0.0).sqrt() * n;
    r_out_perp + r_out_parallel
}
