use super::segment::*;

use std::f64;

const EPSILON: f64 = 1e-12;

///
/// Works out the segment for a circular arc from `start` to `end` around `center`
///
/// The arc always turns through at most a half circle, in whichever direction that is. A center
/// that isn't the same distance from both ends is moved to the nearest point that is (on the
/// perpendicular bisector of the chord), and an arc whose ends coincide becomes a line.
///
pub fn circular_arc(start: (f64, f64), center: (f64, f64), end: (f64, f64)) -> Segment {
    let chord       = (end.0-start.0, end.1-start.1);
    let chord_len   = (chord.0*chord.0 + chord.1*chord.1).sqrt();

    if chord_len <= EPSILON {
        return Segment::Line(end.0, end.1);
    }

    let center      = corrected_center(start, center, end);
    let from        = (start.0-center.0, start.1-center.1);
    let to          = (end.0-center.0, end.1-center.1);

    let cross       = from.0*to.1 - from.1*to.0;
    let dot         = from.0*to.0 + from.1*to.1;
    let angle       = cross.abs().atan2(dot);

    // Ends on opposite sides of the center are drawn counterclockwise
    let sweep       = if cross.abs() <= EPSILON*chord_len*chord_len {
        f64::consts::PI
    } else if cross > 0.0 {
        angle
    } else {
        -angle
    };

    Segment::Arc { center: center, end: end, sweep: sweep }
}

///
/// Moves a center onto the perpendicular bisector of the chord from start to end
///
pub fn corrected_center(start: (f64, f64), center: (f64, f64), end: (f64, f64)) -> (f64, f64) {
    let chord       = (end.0-start.0, end.1-start.1);
    let chord_len   = (chord.0*chord.0 + chord.1*chord.1).sqrt();

    if chord_len <= EPSILON {
        return center;
    }

    let mid         = ((start.0+end.0)/2.0, (start.1+end.1)/2.0);
    let normal      = (-chord.1/chord_len, chord.0/chord_len);
    let distance    = (center.0-mid.0)*normal.0 + (center.1-mid.1)*normal.1;

    (mid.0 + distance*normal.0, mid.1 + distance*normal.1)
}

///
/// Works out the segment for a quarter ellipse around `center`, starting at `start` and ending at `end`
///
/// The vectors from the center to each end are conjugate semi-diameters. If the three points are
/// collinear the ellipse is degenerate and a line is drawn instead.
///
pub fn elliptic_arc(start: (f64, f64), center: (f64, f64), end: (f64, f64)) -> Segment {
    let u       = (start.0-center.0, start.1-center.1);
    let v       = (end.0-center.0, end.1-center.1);
    let cross   = u.0*v.1 - u.1*v.0;
    let scale   = (u.0*u.0 + u.1*u.1).max(v.0*v.0 + v.1*v.1);

    if cross.abs() <= EPSILON*scale || scale <= EPSILON {
        Segment::Line(end.0, end.1)
    } else {
        Segment::EllipticArc { center: center, end: end }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0-b.0).abs() < 1e-9 && (a.1-b.1).abs() < 1e-9
    }

    #[test]
    fn counterclockwise_quarter() {
        match circular_arc((1.0, 0.0), (0.0, 0.0), (0.0, 1.0)) {
            Segment::Arc { center, sweep, .. }  => {
                assert!(close(center, (0.0, 0.0)));
                assert!((sweep - std::f64::consts::PI/2.0).abs() < 1e-9);
            },
            _ => panic!("Expected an arc")
        }
    }

    #[test]
    fn clockwise_quarter() {
        match circular_arc((0.0, 1.0), (0.0, 0.0), (1.0, 0.0)) {
            Segment::Arc { sweep, .. }  => assert!((sweep + std::f64::consts::PI/2.0).abs() < 1e-9),
            _                           => panic!("Expected an arc")
        }
    }

    #[test]
    fn half_circle_is_counterclockwise() {
        match circular_arc((0.0, 0.0), (1.0, 0.0), (2.0, 0.0)) {
            Segment::Arc { sweep, .. }  => assert!((sweep - std::f64::consts::PI).abs() < 1e-9),
            _                           => panic!("Expected an arc")
        }
    }

    #[test]
    fn center_moves_onto_bisector() {
        assert!(close(corrected_center((0.0, 0.0), (1.5, 1.0), (2.0, 0.0)), (1.0, 1.0)));
        assert!(close(corrected_center((0.0, 0.0), (1.0, 1.5), (2.0, 0.0)), (1.0, 1.5)));

        match circular_arc((0.0, 0.0), (1.5, 1.0), (2.0, 0.0)) {
            Segment::Arc { center, end, sweep } => {
                assert!(close(center, (1.0, 1.0)));
                assert!(close(end, (2.0, 0.0)));

                // Both ends are below the center, so the short way round passes under it
                assert!((sweep - std::f64::consts::PI/2.0).abs() < 1e-9);
            },
            _ => panic!("Expected an arc")
        }
    }

    #[test]
    fn coincident_ends_make_a_line() {
        assert!(circular_arc((1.0, 1.0), (0.0, 0.0), (1.0, 1.0)) == Segment::Line(1.0, 1.0));
    }

    #[test]
    fn collinear_ellipse_is_a_line() {
        assert!(elliptic_arc((0.0, 0.0), (1.0, 0.0), (3.0, 0.0)) == Segment::Line(3.0, 0.0));

        match elliptic_arc((2.0, 0.0), (0.0, 0.0), (0.0, 1.0)) {
            Segment::EllipticArc { .. } => { },
            _                           => panic!("Expected an elliptic arc")
        }
    }
}
