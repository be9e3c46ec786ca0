use glam::{Quat, Vec3, Vec4};

/// Above this `|q0 · q1|` the slerp weights lose precision (sin θ → 0), so
/// rotation falls back to normalized component-wise lerp.
pub const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self;
}

/// Hermite basis `(s0, s1, s2, s3)` for `p0, m0, p1, m1`.
#[inline]
fn hermite_basis(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;

    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;
    (s0, s1, s2, s3)
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        s0 * v0 + s1 * (out_tangent0 * dt) + s2 * v1 + s3 * (in_tangent1 * dt)
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);
        v0 * s0 + (out_tangent0 * dt) * s1 + v1 * s2 + (in_tangent1 * dt) * s3
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        slerp_shortest(start, end, t)
    }

    fn interpolate_cubic(v0: Self, out_tangent0: Self, in_tangent1: Self, v1: Self, t: f32, dt: f32) -> Self {
        let (s0, s1, s2, s3) = hermite_basis(t);

        let result = Vec4::from(v0) * s0
            + Vec4::from(out_tangent0) * (dt * s1)
            + Vec4::from(v1) * s2
            + Vec4::from(in_tangent1) * (dt * s3);

        normalize_or_identity(result)
    }
}

/// Spherical linear interpolation along the shorter arc.
///
/// The result is always unit length.
#[must_use]
pub fn slerp_shortest(q0: Quat, q1: Quat, t: f32) -> Quat {
    let a = Vec4::from(q0);
    let mut b = Vec4::from(q1);
    let mut dot = a.dot(b);

    // q and -q are the same rotation; blending toward the wrong one takes the long way round.
    if dot < 0.0 {
        b = -b;
        dot = -dot;
    }

    if dot > SLERP_LINEAR_THRESHOLD {
        return normalize_or_identity(a + (b - a) * t);
    }

    let theta = dot.acos();
    let sin_theta = theta.sin();
    let w0 = ((1.0 - t) * theta).sin() / sin_theta;
    let w1 = (t * theta).sin() / sin_theta;

    normalize_or_identity(a * w0 + b * w1)
}

/// Renormalizes a quaternion stored as `Vec4`; degenerate input yields identity.
#[inline]
#[must_use]
pub fn normalize_or_identity(v: Vec4) -> Quat {
    v.try_normalize().map_or(Quat::IDENTITY, Quat::from_vec4)
}
