use crate::{error::Error, pose::Point};

/// Rays shorter than this cannot carry a direction, so the angle is
/// undefined and the caller skips whatever rule needed it.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Angle in degrees at vertex `b`, formed by the rays `b -> a` and `b -> c`.
///
/// Returns `None` when either ray is degenerate (coincident landmarks), never
/// NaN. The cosine is clamped before `acos` so collinear points come out at
/// exactly 0 or 180 despite rounding.
pub(crate) fn angle_at(a: Point, b: Point, c: Point) -> Option<f32> {
    let ba = a - b;
    let bc = c - b;
    let mag_ba = ba.dot(ba).sqrt();
    let mag_bc = bc.dot(bc).sqrt();
    if mag_ba < DEGENERATE_EPSILON || mag_bc < DEGENERATE_EPSILON {
        return None;
    }
    let cosine = (ba.dot(bc) / (mag_ba * mag_bc)).clamp(-1.0, 1.0);
    Some(cosine.acos().to_degrees())
}

pub(crate) fn midpoint(p: Point, q: Point) -> Result<Point, Error> {
    Point::new((p.x() + q.x()) / 2.0, (p.y() + q.y()) / 2.0)
}
