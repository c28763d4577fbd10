use super::types::Point;

/// Angle between `a` and `b` in degrees.
///
/// `acos` alone only yields `[0, 180]`. With `fix_reflex`, a negative cross
/// product `a × b` maps the result to `360 - angle`, so walking `a → b`
/// counterclockwise gives the full `[0, 360)` range. Zero-length inputs yield 0.
pub fn angle(a: Point, b: Point, fix_reflex: bool) -> f64 {
    let len = a.norm() * b.norm();
    if len <= 0.0 || !len.is_finite() {
        return 0.0;
    }
    let cos = (a.dot(&b) / len).clamp(-1.0, 1.0);
    let deg = cos.acos().to_degrees();
    if fix_reflex && cross(a, b) < 0.0 {
        360.0 - deg
    } else {
        deg
    }
}

/// Signed angle in degrees that rotates `from` onto the direction of `to`, in `(-180, 180]`.
#[inline]
pub fn signed_angle(from: Point, to: Point) -> f64 {
    cross(from, to).atan2(from.dot(&to)).to_degrees()
}

#[inline]
pub(crate) fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Shoelace sum / 2. Positive for counterclockwise vertex order.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        acc += cross(p, q);
    }
    0.5 * acc
}

/// Vertex mean. Zero for an empty slice.
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::zeros();
    }
    let sum = points.iter().fold(Point::zeros(), |acc, p| acc + p);
    sum / points.len() as f64
}

/// Rotate `p` about `center` by `deg` degrees (counterclockwise).
#[inline]
pub fn rotate_about(p: Point, center: Point, deg: f64) -> Point {
    let (s, c) = deg.to_radians().sin_cos();
    let d = p - center;
    center + Point::new(c * d.x - s * d.y, s * d.x + c * d.y)
}

/// Rotate a point set about `center`.
pub fn rotate_points(points: &[Point], center: Point, deg: f64) -> Vec<Point> {
    points.iter().map(|&p| rotate_about(p, center, deg)).collect()
}

/// Reduce `deg` into `[0, period)`.
#[inline]
pub fn normalize_degrees(deg: f64, period: f64) -> f64 {
    let r = deg.rem_euclid(period);
    // rem_euclid can return `period` itself for tiny negative inputs
    if r >= period {
        0.0
    } else {
        r
    }
}

/// Nearest candidate within `tol`, else `None`. Ties go to the earlier candidate.
pub fn snap_to(value: f64, candidates: &[f64], tol: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &c in candidates {
        let d = (value - c).abs();
        if d <= tol && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((c, d));
        }
    }
    best.map(|(c, _)| c)
}

/// Snap to the nearest non-zero multiple `k·step` (`k = 1..max_k`) within `tol`;
/// returns `value` unchanged when nothing is close enough.
pub fn snap_to_multiple(value: f64, step: f64, max_k: u32, tol: f64) -> f64 {
    let k = (value / step).round();
    if k >= 1.0 && k <= max_k as f64 && (value - k * step).abs() <= tol {
        k * step
    } else {
        value
    }
}
