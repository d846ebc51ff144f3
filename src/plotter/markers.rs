use super::lifecycle::*;
use super::drawing::*;
use crate::path::*;
use crate::error::*;

use flo_plot_canvas::*;

use std::f64;
use std::f64::consts::FRAC_1_SQRT_2;

///
/// How a part of a marker is filled
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MarkerFill {
    Outline,
    Solid,

    /// Filled with the pen colour halfway to white
    Half
}

///
/// The outlines that markers are built from
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Diamond,
    InvertedTriangle,
    Octagon,
    Star
}

///
/// One path of a marker, in a space where the marker has a radius of 1
///
#[derive(Clone, PartialEq, Debug)]
struct MarkerPart {
    start:      (f64, f64),
    segments:   Vec<Segment>,
    closed:     bool,
    fill:       MarkerFill
}

///
/// Points evenly spaced around a circle
///
fn regular_points(count: usize, radius: f64, phase_degrees: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|idx| {
            let angle = (phase_degrees + 360.0 * (idx as f64) / (count as f64)).to_radians();
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn polygon(points: Vec<(f64, f64)>, fill: MarkerFill) -> MarkerPart {
    let start       = points[0];
    let mut segments = points.into_iter().skip(1).map(|(x, y)| Segment::Line(x, y)).collect::<Vec<_>>();
    segments.push(Segment::Line(start.0, start.1));

    MarkerPart { start, segments, closed: true, fill }
}

fn stroke(from: (f64, f64), to: (f64, f64)) -> MarkerPart {
    MarkerPart { start: from, segments: vec![Segment::Line(to.0, to.1)], closed: false, fill: MarkerFill::Outline }
}

impl MarkerShape {
    fn part(&self, fill: MarkerFill) -> MarkerPart {
        use self::MarkerShape::*;

        let d = FRAC_1_SQRT_2;

        match self {
            Circle => {
                let quarter = f64::consts::PI / 2.0;
                let arc     = |end: (f64, f64)| Segment::Arc { center: (0.0, 0.0), end: end, sweep: quarter };

                MarkerPart {
                    start:      (1.0, 0.0),
                    segments:   vec![arc((0.0, 1.0)), arc((-1.0, 0.0)), arc((0.0, -1.0)), arc((1.0, 0.0))],
                    closed:     true,
                    fill:       fill
                }
            },

            Square              => polygon(vec![(-d, -d), (d, -d), (d, d), (-d, d)], fill),
            Triangle            => polygon(regular_points(3, 1.0, 90.0), fill),
            Diamond             => polygon(regular_points(4, 1.0, 0.0), fill),
            InvertedTriangle    => polygon(regular_points(3, 1.0, 270.0), fill),
            Octagon             => polygon(regular_points(8, 1.0, 22.5), fill),

            Star => {
                let outer   = regular_points(5, 1.0, 90.0);
                let inner   = regular_points(5, 0.382, 126.0);
                let points  = outer.into_iter().zip(inner.into_iter()).flat_map(|(a, b)| vec![a, b]).collect();

                polygon(points, fill)
            }
        }
    }
}

fn plus() -> Vec<MarkerPart> {
    vec![stroke((-1.0, 0.0), (1.0, 0.0)), stroke((0.0, -1.0), (0.0, 1.0))]
}

fn cross() -> Vec<MarkerPart> {
    let d = FRAC_1_SQRT_2;
    vec![stroke((-d, -d), (d, d)), stroke((-d, d), (d, -d))]
}

///
/// A shape with decorations inside it
///
fn decorated(shape: MarkerShape, fill: MarkerFill, decoration: Vec<MarkerPart>) -> Vec<MarkerPart> {
    let mut parts = vec![shape.part(fill)];
    parts.extend(decoration);
    parts
}

///
/// The paths making up one of the standard markers (types 2 to 31)
///
fn marker_parts(marker_type: u32) -> Vec<MarkerPart> {
    use self::MarkerShape::*;
    use self::MarkerFill::*;

    match marker_type {
        2   => plus(),
        3   => { let mut parts = plus(); parts.extend(cross()); parts },
        4   => vec![Circle.part(Outline)],
        5   => cross(),
        6   => vec![Square.part(Outline)],
        7   => vec![Triangle.part(Outline)],
        8   => vec![Diamond.part(Outline)],
        9   => vec![Star.part(Outline)],
        10  => vec![InvertedTriangle.part(Outline)],

        11  => {
            regular_points(8, 1.0, 0.0).into_iter()
                .zip(regular_points(8, 0.5, 0.0).into_iter())
                .map(|(outer, inner)| stroke(inner, outer))
                .collect()
        },

        12  => {
            let mut parts = plus();
            parts.extend(vec![
                stroke((1.0, -0.3), (1.0, 0.3)), stroke((-1.0, -0.3), (-1.0, 0.3)),
                stroke((-0.3, 1.0), (0.3, 1.0)), stroke((-0.3, -1.0), (0.3, -1.0))
            ]);
            parts
        },

        13  => decorated(Circle, Outline, cross()),
        14  => decorated(Square, Outline, cross()),
        15  => decorated(Diamond, Outline, plus()),

        16  => vec![Circle.part(Solid)],
        17  => vec![Square.part(Solid)],
        18  => vec![Triangle.part(Solid)],
        19  => vec![Diamond.part(Solid)],
        20  => vec![InvertedTriangle.part(Solid)],
        21  => decorated(Square, Solid, cross()),
        22  => decorated(Diamond, Solid, plus()),

        23  => vec![Circle.part(Half)],
        24  => vec![Square.part(Half)],
        25  => vec![Triangle.part(Half)],
        26  => vec![Diamond.part(Half)],
        27  => vec![InvertedTriangle.part(Half)],
        28  => decorated(Square, Half, cross()),
        29  => decorated(Diamond, Half, plus()),

        30  => vec![Octagon.part(Outline)],
        31  => vec![Octagon.part(Solid)],

        _   => vec![]
    }
}

///
/// Fill level used by the half-filled markers
///
const HALF_FILL_LEVEL: u16 = 0x8000;

impl Plotter {
    ///
    /// Draws a marker symbol centered on a point, leaving the cursor there
    ///
    /// Types 1 to 31 are the standard symbols (1 is a dot, 2 a plus sign, 3 an asterisk, 4 a
    /// circle, 5 a cross and so on) and `size` is their width in user units. Types from 32 up
    /// draw the character with that code in the current font at that size. Type 0 draws nothing.
    ///
    pub fn marker(&mut self, coords: Coords, x: f64, y: f64, marker_type: u32, size: f64) -> Result<(), PlotError> {
        let point = self.resolve(coords, (x, y))?;

        self.move_to(Coords::Absolute, point.0, point.1)?;

        match marker_type {
            0       => { },
            1       => self.point(Coords::Absolute, point.0, point.1)?,
            2..=31  => self.draw_marker_parts(point, marker_parts(marker_type), size)?,

            _       => {
                match std::char::from_u32(marker_type) {
                    Some(symbol)    => { self.place_label(point, HorizontalAlignment::Center, VerticalAlignment::Center, &symbol.to_string(), size)?; },
                    None            => self.diagnostics.warn(&format!("no marker of type {}", marker_type))
                }
            }
        }

        self.update_context(false, |context| context.cursor = point)
    }

    ///
    /// Draws the parts of a marker with radius `size/2` around a point
    ///
    fn draw_marker_parts(&mut self, point: (f64, f64), parts: Vec<MarkerPart>, size: f64) -> Result<(), PlotError> {
        let radius      = size / 2.0;
        let context     = self.graphics_context()?;
        let pen_color   = context.pen_color;

        let mut style   = context.path_style();
        style.transform = Transform2D::scale(radius, radius)
            .compose(&Transform2D::translate(point.0, point.1))
            .compose(&context.transform);
        style.line_mode = LineMode::Solid;
        style.dashes    = None;

        for part in parts {
            let mut part_style  = style.clone();
            part_style.fill     = match part.fill {
                MarkerFill::Outline => None,
                MarkerFill::Solid   => Some(pen_color),
                MarkerFill::Half    => Some(pen_color.desaturate(HALF_FILL_LEVEL))
            };

            let mut path        = Path::new(part.start, part_style);
            path.segments       = part.segments;
            path.closed         = part.closed;

            self.device.path_finished(path);
        }

        Ok(())
    }
}
