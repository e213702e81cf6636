//! Monotone-in-x cubic smoothing (Steffen's method), sampled into a polyline.
//!
//! The interpolant passes through every input point and never overshoots between two
//! neighbouring points, so a monotone series stays monotone on screen.

/// Smooth `points` (sorted by x) into a polyline with `samples` steps per segment.
///
/// Fewer than three points (or `samples < 2`) are returned as straight segments.
pub fn monotone_x(points: &[(f64, f64)], samples: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 || samples < 2 {
        return points.to_vec();
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_slope(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_slope(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_slope(points[n - 2], points[n - 1], tangents[n - 2]);

    let mut out = Vec::with_capacity((n - 1) * samples + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let dx = (x1 - x0) / 3.0;
        let c1 = (x0 + dx, y0 + dx * tangents[i]);
        let c2 = (x1 - dx, y1 - dx * tangents[i + 1]);
        for k in 1..=samples {
            let t = k as f64 / samples as f64;
            out.push(cubic_bezier(points[i], c1, c2, points[i + 1], t));
        }
    }
    out
}

/// Sign with `sign(0) == 0`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn interior_slope(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let m = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if m.is_finite() { m } else { 0.0 }
}

fn end_slope(a: (f64, f64), b: (f64, f64), neighbour: f64) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (b.1 - a.1) / h - neighbour) / 2.0
    }
}

fn cubic_bezier(
    p0: (f64, f64),
    c1: (f64, f64),
    c2: (f64, f64),
    p1: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * c1.0 + c * c2.0 + d * p1.0,
        a * p0.1 + b * c1.1 + c * c2.1 + d * p1.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn passes_through_inputs() {
        let pts = [(0.0, 0.0), (1.0, 2.0), (2.0, 2.5), (3.0, 5.0)];
        let out = monotone_x(&pts, 4);
        assert_eq!(out.len(), 3 * 4 + 1);
        for (i, p) in pts.iter().enumerate() {
            let q = out[i * 4];
            assert_relative_eq!(q.0, p.0, epsilon = 1e-9);
            assert_relative_eq!(q.1, p.1, epsilon = 1e-9);
        }
    }

    #[test]
    fn monotone_data_stays_monotone() {
        let pts = [(0.0, 0.0), (1.0, 0.1), (2.0, 5.0), (3.0, 5.1), (4.0, 9.0)];
        let out = monotone_x(&pts, 10);
        assert!(out.windows(2).all(|w| w[1].0 >= w[0].0 && w[1].1 >= w[0].1 - 1e-12));
    }

    #[test]
    fn flat_segment_has_no_overshoot() {
        let pts = [(0.0, 0.0), (1.0, 1.0), (2.0, 1.0), (3.0, 0.0)];
        let out = monotone_x(&pts, 10);
        assert!(out.iter().all(|p| p.1 <= 1.0 + 1e-12 && p.1 >= -1e-12));
    }

    #[test]
    fn short_inputs_pass_through() {
        assert!(monotone_x(&[], 8).is_empty());
        assert_eq!(monotone_x(&[(1.0, 1.0), (2.0, 3.0)], 8), vec![(1.0, 1.0), (2.0, 3.0)]);
    }
}
