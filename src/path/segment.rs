use super::style::*;

///
/// One piece of a path, in user coordinates. Each segment starts where the previous one ended.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Segment {
    Line(f64, f64),

    /// A circular arc around `center`, turning `sweep` radians (positive is counterclockwise) to `end`
    Arc { center: (f64, f64), end: (f64, f64), sweep: f64 },

    /// A quarter ellipse around `center`, where the start and `end` are the ends of conjugate semi-diameters
    EllipticArc { center: (f64, f64), end: (f64, f64) },

    Quadratic { control: (f64, f64), end: (f64, f64) },

    Cubic { cp1: (f64, f64), cp2: (f64, f64), end: (f64, f64) }
}

impl Segment {
    pub fn end_point(&self) -> (f64, f64) {
        match self {
            Segment::Line(x, y)                 => (*x, *y),
            Segment::Arc { end, .. }            => *end,
            Segment::EllipticArc { end, .. }    => *end,
            Segment::Quadratic { end, .. }      => *end,
            Segment::Cubic { end, .. }          => *end
        }
    }
}

///
/// A path under construction or ready to be drawn
///
#[derive(Clone, PartialEq, Debug)]
pub struct Path {
    pub start:      (f64, f64),

    /// Where the path began before it was split into pieces (the same as `start` for a path that hasn't been split)
    pub origin:     (f64, f64),

    pub segments:   Vec<Segment>,
    pub closed:     bool,
    pub style:      PathStyle
}

impl Path {
    ///
    /// Creates an empty path starting at a point
    ///
    pub fn new(start: (f64, f64), style: PathStyle) -> Path {
        Path {
            start:      start,
            origin:     start,
            segments:   vec![],
            closed:     false,
            style:      style
        }
    }

    ///
    /// The point where the path currently finishes
    ///
    pub fn end_point(&self) -> (f64, f64) {
        self.segments.last()
            .map(|segment| segment.end_point())
            .unwrap_or(self.start)
    }

    ///
    /// Number of points defining the path (the start point plus the end of each segment)
    ///
    pub fn point_count(&self) -> usize {
        self.segments.len() + 1
    }

    ///
    /// The start point and the end of each segment: the points where disconnected lines place their dots
    ///
    pub fn junctions(&self) -> Vec<(f64, f64)> {
        let mut points = vec![self.start];
        points.extend(self.segments.iter().map(|segment| segment.end_point()));
        points
    }

    pub fn is_filled(&self) -> bool {
        self.style.fill.is_some()
    }
}
