use super::lifecycle::*;
use crate::path::*;
use crate::error::*;

use std::f64;

///
/// Whether the coordinates passed to a drawing operation are absolute user coordinates or offsets from the graphics cursor
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Coords {
    Absolute,
    Relative
}

impl Plotter {
    ///
    /// Converts a point to absolute user coordinates
    ///
    pub (super) fn resolve(&self, coords: Coords, point: (f64, f64)) -> Result<(f64, f64), PlotError> {
        match coords {
            Coords::Absolute => {
                self.check_open()?;
                Ok(point)
            },

            Coords::Relative => {
                let (x, y) = self.cursor()?;
                Ok((x + point.0, y + point.1))
            }
        }
    }

    ///
    /// Adds a segment starting at a particular point, which continues the current path if that's where the cursor is
    ///
    fn add_segment(&mut self, start: (f64, f64), segment: Segment) -> Result<(), PlotError> {
        self.with_path(|paths, context, device| paths.add_segment(context, device, start, segment))
    }

    ///
    /// Draws a shape that isn't part of any other path, leaving the cursor at a particular point
    ///
    fn draw_shape(&mut self, shape: Option<Path>, cursor: (f64, f64)) -> Result<(), PlotError> {
        self.with_path(move |paths, context, device| {
            paths.end_path(context, device);

            if let Some(shape) = shape {
                device.path_finished(shape);
            }

            context.cursor = cursor;
        })
    }

    ///
    /// Moves the graphics cursor without drawing anything, ending the path under construction
    ///
    pub fn move_to(&mut self, coords: Coords, x: f64, y: f64) -> Result<(), PlotError> {
        let point = self.resolve(coords, (x, y))?;
        self.with_path(|paths, context, device| paths.move_to(context, device, point))
    }

    ///
    /// Draws a line from the graphics cursor to a point
    ///
    pub fn cont(&mut self, coords: Coords, x: f64, y: f64) -> Result<(), PlotError> {
        let point = self.resolve(coords, (x, y))?;
        self.with_path(|paths, context, device| paths.line_to(context, device, point))
    }

    ///
    /// Draws a line between two points
    ///
    pub fn line(&mut self, coords: Coords, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), PlotError> {
        let start   = self.resolve(coords, (x1, y1))?;
        let end     = self.resolve(coords, (x2, y2))?;

        self.add_segment(start, Segment::Line(end.0, end.1))
    }

    ///
    /// Draws a circular arc from (x0, y0) to (x1, y1) around (xc, yc)
    ///
    /// The arc turns through at most half a circle: a center that isn't equidistant from the ends is
    /// moved to the nearest point that is.
    ///
    pub fn arc(&mut self, coords: Coords, xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<(), PlotError> {
        let center  = self.resolve(coords, (xc, yc))?;
        let start   = self.resolve(coords, (x0, y0))?;
        let end     = self.resolve(coords, (x1, y1))?;

        self.add_segment(start, circular_arc(start, center, end))
    }

    ///
    /// Draws a quarter ellipse from (x0, y0) to (x1, y1) around (xc, yc)
    ///
    pub fn ellarc(&mut self, coords: Coords, xc: f64, yc: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<(), PlotError> {
        let center  = self.resolve(coords, (xc, yc))?;
        let start   = self.resolve(coords, (x0, y0))?;
        let end     = self.resolve(coords, (x1, y1))?;

        self.add_segment(start, elliptic_arc(start, center, end))
    }

    ///
    /// Draws a quadratic bezier curve
    ///
    pub fn bezier2(&mut self, coords: Coords, x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), PlotError> {
        let start   = self.resolve(coords, (x0, y0))?;
        let control = self.resolve(coords, (x1, y1))?;
        let end     = self.resolve(coords, (x2, y2))?;

        self.add_segment(start, Segment::Quadratic { control, end })
    }

    ///
    /// Draws a cubic bezier curve
    ///
    pub fn bezier3(&mut self, coords: Coords, x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> Result<(), PlotError> {
        let start   = self.resolve(coords, (x0, y0))?;
        let cp1     = self.resolve(coords, (x1, y1))?;
        let cp2     = self.resolve(coords, (x2, y2))?;
        let end     = self.resolve(coords, (x3, y3))?;

        self.add_segment(start, Segment::Cubic { cp1, cp2, end })
    }

    ///
    /// Ends the path under construction so that it's drawn
    ///
    pub fn endpath(&mut self) -> Result<(), PlotError> {
        self.with_path(|paths, context, device| paths.end_path(context, device))
    }

    ///
    /// Closes and ends the path under construction, moving the cursor back to where it started
    ///
    pub fn closepath(&mut self) -> Result<(), PlotError> {
        self.with_path(|paths, context, device| paths.close_path(context, device))
    }

    ///
    /// Draws a single point in the pen colour
    ///
    pub fn point(&mut self, coords: Coords, x: f64, y: f64) -> Result<(), PlotError> {
        let point = self.resolve(coords, (x, y))?;

        self.with_path(|paths, context, device| {
            paths.end_path(context, device);

            let device_point = context.transform.transform_point(point.0, point.1);
            device.draw_point(device_point, context.pen_color);

            context.cursor = point;
        })
    }

    ///
    /// Draws a rectangle with corners at (x1, y1) and (x2, y2), leaving the cursor at its center
    ///
    pub fn rect(&mut self, coords: Coords, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), PlotError> {
        let (x1, y1)    = self.resolve(coords, (x1, y1))?;
        let (x2, y2)    = self.resolve(coords, (x2, y2))?;

        let mut rect    = Path::new((x1, y1), self.graphics_context()?.path_style());
        rect.closed     = true;
        rect.segments   = vec![
            Segment::Line(x2, y1),
            Segment::Line(x2, y2),
            Segment::Line(x1, y2),
            Segment::Line(x1, y1)
        ];

        self.draw_shape(Some(rect), ((x1+x2)/2.0, (y1+y2)/2.0))
    }

    ///
    /// Draws a circle, leaving the cursor at its center
    ///
    /// Circles are invisible in the disconnected line mode.
    ///
    pub fn circle(&mut self, coords: Coords, x: f64, y: f64, radius: f64) -> Result<(), PlotError> {
        let center  = self.resolve(coords, (x, y))?;
        let style   = self.graphics_context()?.path_style();

        if style.line_mode == LineMode::Disconnected {
            return self.draw_shape(None, center);
        }

        let quarter     = f64::consts::PI / 2.0;
        let (cx, cy)    = center;

        let mut circle  = Path::new((cx+radius, cy), style);
        circle.closed   = true;
        circle.segments = vec![
            Segment::Arc { center: center, end: (cx, cy+radius), sweep: quarter },
            Segment::Arc { center: center, end: (cx-radius, cy), sweep: quarter },
            Segment::Arc { center: center, end: (cx, cy-radius), sweep: quarter },
            Segment::Arc { center: center, end: (cx+radius, cy), sweep: quarter }
        ];

        self.draw_shape(Some(circle), center)
    }

    ///
    /// Draws an ellipse with its first axis rotated counterclockwise by an angle in degrees, leaving the cursor at its center
    ///
    /// Ellipses are invisible in the disconnected line mode.
    ///
    pub fn ellipse(&mut self, coords: Coords, x: f64, y: f64, radius_x: f64, radius_y: f64, angle: f64) -> Result<(), PlotError> {
        let center  = self.resolve(coords, (x, y))?;
        let style   = self.graphics_context()?.path_style();

        if style.line_mode == LineMode::Disconnected {
            return self.draw_shape(None, center);
        }

        let theta       = angle.to_radians();
        let (cx, cy)    = center;
        let major       = (radius_x*theta.cos(), radius_x*theta.sin());
        let minor       = (-radius_y*theta.sin(), radius_y*theta.cos());

        let mut ellipse = Path::new((cx+major.0, cy+major.1), style);
        ellipse.closed  = true;
        ellipse.segments = vec![
            Segment::EllipticArc { center: center, end: (cx+minor.0, cy+minor.1) },
            Segment::EllipticArc { center: center, end: (cx-major.0, cy-major.1) },
            Segment::EllipticArc { center: center, end: (cx-minor.0, cy-minor.1) },
            Segment::EllipticArc { center: center, end: (cx+major.0, cy+major.1) }
        ];

        self.draw_shape(Some(ellipse), center)
    }
}
