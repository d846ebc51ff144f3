use curves::*;
use curves::bezier;

use std::f64;

///
/// A cubic bezier segment as it appears in a `Draw::BezierCurve` instruction: (end point, control point 1, control point 2)
///
pub type BezierSegment = ((f64, f64), (f64, f64), (f64, f64));

///
/// Approximates a circular arc with cubic bezier segments, each sweeping at most a quarter turn
///
/// The arc starts at `start` and turns around `center` by `sweep` radians (positive values are
/// counterclockwise).
///
pub fn arc_to_beziers(start: (f64, f64), center: (f64, f64), sweep: f64) -> Vec<BezierSegment> {
    let num_segments    = ((sweep.abs() / (f64::consts::PI / 2.0)) - 1e-9).ceil().max(1.0) as usize;
    let step            = sweep / (num_segments as f64);
    let kappa           = 4.0/3.0 * (step/4.0).tan();

    let (cx, cy)        = center;
    let radius          = ((start.0-cx).powi(2) + (start.1-cy).powi(2)).sqrt();
    let start_angle     = (start.1-cy).atan2(start.0-cx);

    (0..num_segments)
        .map(|segment| {
            let a1          = start_angle + step*(segment as f64);
            let a2          = a1 + step;

            let (x1, y1)    = (cx + radius*a1.cos(), cy + radius*a1.sin());
            let (x2, y2)    = (cx + radius*a2.cos(), cy + radius*a2.sin());

            // Control points lie along the tangents at each end
            let cp1         = (x1 - kappa*(y1-cy), y1 + kappa*(x1-cx));
            let cp2         = (x2 + kappa*(y2-cy), y2 - kappa*(x2-cx));

            ((x2, y2), cp1, cp2)
        })
        .collect()
}

///
/// Approximates the quarter ellipse running from `p0` to `p1` around `center` with a cubic bezier
///
/// `p0 - center` and `p1 - center` are conjugate semi-diameters of the ellipse.
///
pub fn quarter_ellipse_to_bezier(center: (f64, f64), p0: (f64, f64), p1: (f64, f64)) -> BezierSegment {
    let kappa   = 4.0/3.0 * (f64::consts::PI/8.0).tan();
    let u       = (p0.0-center.0, p0.1-center.1);
    let v       = (p1.0-center.0, p1.1-center.1);

    (p1, (p0.0 + kappa*v.0, p0.1 + kappa*v.1), (p1.0 + kappa*u.0, p1.1 + kappa*u.1))
}

///
/// Raises a quadratic bezier to the equivalent cubic
///
pub fn elevate_quadratic(start: (f64, f64), control: (f64, f64), end: (f64, f64)) -> BezierSegment {
    let cp1 = (start.0 + 2.0/3.0*(control.0-start.0), start.1 + 2.0/3.0*(control.1-start.1));
    let cp2 = (end.0 + 2.0/3.0*(control.0-end.0), end.1 + 2.0/3.0*(control.1-end.1));

    (end, cp1, cp2)
}

///
/// Approximates a cubic bezier with a series of points, finishing at the end point
///
/// The number of points is chosen so that the chords are no longer than `max_chord` (measured
/// along the control polygon).
///
pub fn flatten_bezier(start: (f64, f64), cp1: (f64, f64), cp2: (f64, f64), end: (f64, f64), max_chord: f64) -> Vec<(f64, f64)> {
    let distance        = |a: (f64, f64), b: (f64, f64)| ((a.0-b.0).powi(2) + (a.1-b.1).powi(2)).sqrt();
    let polygon_length  = distance(start, cp1) + distance(cp1, cp2) + distance(cp2, end);
    let num_points      = if max_chord > 0.0 { (polygon_length / max_chord).ceil().max(1.0).min(256.0) as usize } else { 16 };

    let w1 = Coord2(start.0, start.1);
    let w2 = Coord2(cp1.0, cp1.1);
    let w3 = Coord2(cp2.0, cp2.1);
    let w4 = Coord2(end.0, end.1);

    (1..=num_points)
        .map(|idx| {
            if idx == num_points {
                end
            } else {
                let t       = (idx as f64) / (num_points as f64);
                let point   = bezier::basis(t, w1, w2, w3, w4);
                (point.x(), point.y())
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0-b.0).abs() < 1e-6 && (a.1-b.1).abs() < 1e-6
    }

    #[test]
    fn quarter_arc_is_one_segment() {
        let segments = arc_to_beziers((1.0, 0.0), (0.0, 0.0), std::f64::consts::PI/2.0);

        assert!(segments.len() == 1);
        assert!(close(segments[0].0, (0.0, 1.0)));

        // Standard quarter-circle control points
        assert!(close(segments[0].1, (1.0, 0.5522847498)));
        assert!(close(segments[0].2, (0.5522847498, 1.0)));
    }

    #[test]
    fn clockwise_half_arc_is_two_segments() {
        let segments = arc_to_beziers((1.0, 0.0), (0.0, 0.0), -std::f64::consts::PI);

        assert!(segments.len() == 2);
        assert!(close(segments[0].0, (0.0, -1.0)));
        assert!(close(segments[1].0, (-1.0, 0.0)));
    }

    #[test]
    fn quarter_ellipse_matches_quarter_circle() {
        let from_arc        = arc_to_beziers((1.0, 0.0), (0.0, 0.0), std::f64::consts::PI/2.0)[0];
        let from_ellipse    = quarter_ellipse_to_bezier((0.0, 0.0), (1.0, 0.0), (0.0, 1.0));

        assert!(close(from_arc.0, from_ellipse.0));
        assert!(close(from_arc.1, from_ellipse.1));
        assert!(close(from_arc.2, from_ellipse.2));
    }

    #[test]
    fn elevated_quadratic_has_same_midpoint() {
        let (end, cp1, cp2) = elevate_quadratic((0.0, 0.0), (1.0, 2.0), (2.0, 0.0));
        let mid             = bezier::basis(0.5, Coord2(0.0, 0.0), Coord2(cp1.0, cp1.1), Coord2(cp2.0, cp2.1), Coord2(end.0, end.1));

        // The quadratic's midpoint is (1, 1)
        assert!(close((mid.x(), mid.y()), (1.0, 1.0)));
    }

    #[test]
    fn flattened_bezier_ends_at_end_point() {
        let points = flatten_bezier((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), 1.0);

        assert!(points.len() >= 30);
        assert!(points.last() == Some(&(10.0, 0.0)));
    }
}
