// Joint angle geometry over normalized landmarks

use crate::models::pose::Landmark;
use std::f64::consts::PI;

/// Interior angle at vertex `b` formed by arms `a` and `c`, in degrees [0, 180].
///
/// The result does not depend on the winding order of the arms, so
/// `calculate_angle(a, b, c) == calculate_angle(c, b, a)`.
pub fn calculate_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (bx, by) = (f64::from(b.x), f64::from(b.y));
    let (cx, cy) = (f64::from(c.x), f64::from(c.y));

    let radians = (cy - by).atan2(cx - bx) - (ay - by).atan2(ax - bx);
    let angle = (radians * 180.0 / PI).abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Horizontal distance between two landmarks
pub fn horizontal_span(a: &Landmark, b: &Landmark) -> f64 {
    (f64::from(a.x) - f64::from(b.x)).abs()
}

/// Vertical distance between two landmarks
pub fn vertical_offset(a: &Landmark, b: &Landmark) -> f64 {
    (f64::from(a.y) - f64::from(b.y)).abs()
}

/// Mean `y` of a pair of landmarks
pub fn mean_y(a: &Landmark, b: &Landmark) -> f64 {
    (f64::from(a.y) + f64::from(b.y)) / 2.0
}
