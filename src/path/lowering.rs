use super::segment::*;

use flo_plot_canvas::*;

///
/// The kinds of curve a device can draw itself
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SegmentSupport {
    pub arcs:       bool,
    pub quadratics: bool,
    pub cubics:     bool
}

impl SegmentSupport {
    ///
    /// A device that draws everything natively
    ///
    pub fn all() -> SegmentSupport {
        SegmentSupport { arcs: true, quadratics: true, cubics: true }
    }

    ///
    /// A device that can only draw straight lines
    ///
    pub fn lines_only() -> SegmentSupport {
        SegmentSupport { arcs: false, quadratics: false, cubics: false }
    }
}

///
/// Converts paths in user coordinates into device instructions that a particular device can draw
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Lowering {
    pub support:    SegmentSupport,

    /// Longest chord, in device units, used when a curve has to be drawn as lines
    pub max_chord:  f64
}

impl Lowering {
    ///
    /// The device instructions for the geometry of a path: a move to its start, each segment and a
    /// close if the path is closed
    ///
    pub fn path_geometry(&self, path: &Path) -> Vec<Draw> {
        let transform   = &path.style.transform;
        let start       = transform.transform_point(path.start.0, path.start.1);
        let mut drawing = vec![Draw::Move(start.0, start.1)];
        let mut from    = path.start;

        for segment in path.segments.iter() {
            drawing.extend(self.segment(transform, from, segment));
            from = segment.end_point();
        }

        if path.closed {
            drawing.push(Draw::ClosePath);
        }

        drawing
    }

    ///
    /// The device instructions for a single segment starting at `from` (in user coordinates)
    ///
    pub fn segment(&self, transform: &Transform2D, from: (f64, f64), segment: &Segment) -> Vec<Draw> {
        let map = |(x, y): (f64, f64)| transform.transform_point(x, y);

        match segment {
            Segment::Line(x, y) => {
                let (x, y) = map((*x, *y));
                vec![Draw::Line(x, y)]
            },

            Segment::Arc { center, end, sweep } => {
                if self.support.arcs && transform.is_conformal() {
                    // Positive sweeps are counterclockwise in user space; a reflection reverses that
                    let clockwise = (*sweep < 0.0) != (transform.determinant() < 0.0);
                    vec![Draw::Arc(map(*end), map(*center), clockwise)]
                } else {
                    let mut curves  = arc_to_beziers(from, *center, *sweep);

                    // Finish exactly on the end point
                    if let Some(last) = curves.last_mut() { last.0 = *end; }

                    self.cubics(transform, from, &curves)
                }
            },

            Segment::EllipticArc { center, end } => {
                let (end, cp1, cp2) = quarter_ellipse_to_bezier(*center, from, *end);
                self.cubics(transform, from, &[(end, cp1, cp2)])
            },

            Segment::Quadratic { control, end } => {
                if self.support.quadratics {
                    vec![Draw::QuadraticCurve(map(*end), map(*control))]
                } else {
                    self.cubics(transform, from, &[elevate_quadratic(from, *control, *end)])
                }
            },

            Segment::Cubic { cp1, cp2, end } => {
                self.cubics(transform, from, &[(*end, *cp1, *cp2)])
            }
        }
    }

    ///
    /// Draws a series of cubic curves (given in user coordinates), flattening them if the device can't draw curves
    ///
    fn cubics(&self, transform: &Transform2D, from: (f64, f64), curves: &[BezierSegment]) -> Vec<Draw> {
        let map         = |(x, y): (f64, f64)| transform.transform_point(x, y);
        let mut start   = map(from);
        let mut drawing = vec![];

        for (end, cp1, cp2) in curves.iter() {
            let (end, cp1, cp2) = (map(*end), map(*cp1), map(*cp2));

            if self.support.cubics {
                drawing.push(Draw::BezierCurve(end, cp1, cp2));
            } else {
                drawing.extend(flatten_bezier(start, cp1, cp2, end, self.max_chord)
                    .into_iter()
                    .map(|(x, y)| Draw::Line(x, y)));
            }

            start = end;
        }

        drawing
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::*;
    use crate::context::*;

    fn path_with(segments: Vec<Segment>, transform: Transform2D) -> Path {
        let mut style       = GraphicsContext::new(DeviceDefaults::default()).path_style();
        style.transform     = transform;

        let mut path        = Path::new((1.0, 0.0), style);
        path.segments       = segments;
        path
    }

    fn quarter_arc() -> Segment {
        Segment::Arc { center: (0.0, 0.0), end: (0.0, 1.0), sweep: std::f64::consts::PI/2.0 }
    }

    #[test]
    fn native_arc_survives_conformal_transform() {
        let lowering    = Lowering { support: SegmentSupport::all(), max_chord: 0.1 };
        let path        = path_with(vec![quarter_arc()], Transform2D::scale(2.0, 2.0));
        let drawing     = lowering.path_geometry(&path);

        assert!(drawing == vec![Draw::Move(2.0, 0.0), Draw::Arc((0.0, 2.0), (0.0, 0.0), false)]);
    }

    #[test]
    fn reflected_arc_changes_direction() {
        let lowering    = Lowering { support: SegmentSupport::all(), max_chord: 0.1 };
        let path        = path_with(vec![quarter_arc()], Transform2D::scale(1.0, -1.0));
        let drawing     = lowering.path_geometry(&path);

        assert!(drawing[1] == Draw::Arc((0.0, -1.0), (0.0, 0.0), true));
    }

    #[test]
    fn arc_becomes_bezier_under_anisotropic_scale() {
        let lowering    = Lowering { support: SegmentSupport::all(), max_chord: 0.1 };
        let path        = path_with(vec![quarter_arc()], Transform2D::scale(2.0, 1.0));
        let drawing     = lowering.path_geometry(&path);

        assert!(drawing.len() == 2);
        match drawing[1] {
            Draw::BezierCurve(end, _, _)    => assert!(end == (0.0, 1.0)),
            _                               => panic!("Expected a bezier curve")
        }
    }

    #[test]
    fn lines_only_device_flattens_curves() {
        let lowering    = Lowering { support: SegmentSupport::lines_only(), max_chord: 0.05 };
        let path        = path_with(vec![quarter_arc(), Segment::Quadratic { control: (0.0, 0.0), end: (-1.0, 0.0) }], Transform2D::identity());
        let drawing     = lowering.path_geometry(&path);

        assert!(drawing.len() > 10);
        assert!(drawing.iter().skip(1).all(|draw| match draw { Draw::Line(_, _) => true, _ => false }));
        assert!(drawing.last() == Some(&Draw::Line(-1.0, 0.0)));
    }

    #[test]
    fn closed_path_ends_with_close() {
        let lowering    = Lowering { support: SegmentSupport::all(), max_chord: 0.1 };
        let mut path    = path_with(vec![Segment::Line(1.0, 1.0), Segment::Line(0.0, 1.0)], Transform2D::identity());
        path.closed     = true;

        let drawing     = lowering.path_geometry(&path);

        assert!(drawing == vec![Draw::Move(1.0, 0.0), Draw::Line(1.0, 1.0), Draw::Line(0.0, 1.0), Draw::ClosePath]);
    }
}
