use super::color::*;

///
/// How the corners between path segments are drawn
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
    Triangular
}

///
/// How the ends of an open path are drawn
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    Round,
    Projecting,
    Triangular
}

///
/// Rule used to decide which regions of a self-intersecting path are inside it
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum WindingRule {
    EvenOdd,
    NonZero
}

///
/// Horizontal justification of a label relative to its anchor point
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right
}

///
/// Vertical justification of a label relative to its anchor point
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Bottom,
    Baseline,
    Center,
    Top
}

///
/// A run of text placed on the device
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TextLabel {
    /// The anchor point, in device coordinates
    pub position: (f64, f64),

    /// Angle of the baseline in degrees, counterclockwise from the device x axis
    pub angle: f64,

    /// Height of the font in device units
    pub font_size: f64,

    pub font_name: String,
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
    pub text: String
}

///
/// Instructions received by a plotter backend
///
/// All coordinates are in device space: the plotter has already applied the user transform by
/// the time an instruction is produced.
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Draw {
    /// Clears the visible surface, filling it with a background colour
    ClearCanvas(Color),

    /// Begins a new path
    NewPath,

    /// Move to a new point
    Move(f64, f64),

    /// Line to point
    Line(f64, f64),

    /// Bezier curve to point (end, control point 1, control point 2)
    BezierCurve((f64, f64), (f64, f64), (f64, f64)),

    /// Quadratic bezier curve to point (end, control point)
    QuadraticCurve((f64, f64), (f64, f64)),

    /// Circular arc to point (end, center, clockwise)
    Arc((f64, f64), (f64, f64), bool),

    /// Closes the current path
    ClosePath,

    /// Fill the current path
    Fill,

    /// Draw a line around the current path
    Stroke,

    /// Set the line width, in device units
    LineWidth(f64),

    LineJoin(LineJoin),
    LineCap(LineCap),
    MiterLimit(f64),

    /// Resets the dash pattern to empty (which is a solid line)
    NewDashPattern,

    /// Adds a dash to the current dash pattern
    DashLength(f64),

    /// Sets the offset for the dash pattern
    DashOffset(f64),

    /// Sets the rule used to fill paths
    WindingRule(WindingRule),

    /// Set the fill color for subsequent shapes
    FillColor(Color),

    /// Set the line color for subsequent shapes
    StrokeColor(Color),

    /// Draws a single device point in the stroke colour
    Point(f64, f64),

    /// Draws a text label
    Label(TextLabel)
}

impl Draw {
    ///
    /// True if this instruction is part of the geometry of a path (as opposed to a style or standalone instruction)
    ///
    pub fn is_path_geometry(&self) -> bool {
        use self::Draw::*;

        match self {
            NewPath | Move(_, _) | Line(_, _) | BezierCurve(_, _, _) | QuadraticCurve(_, _) | Arc(_, _, _) | ClosePath => true,
            _ => false
        }
    }
}

impl LineJoin {
    ///
    /// Looks up a join style by the name used in plotting programs ("miter", "round", "bevel" or "triangular")
    ///
    pub fn from_name(name: &str) -> Option<LineJoin> {
        match name.to_ascii_lowercase().as_str() {
            "miter" | "mitre"   => Some(LineJoin::Miter),
            "round"             => Some(LineJoin::Round),
            "bevel"             => Some(LineJoin::Bevel),
            "triangular"        => Some(LineJoin::Triangular),
            _                   => None
        }
    }
}

impl LineCap {
    ///
    /// Looks up a cap style by name ("butt", "round", "projecting" or "triangular")
    ///
    pub fn from_name(name: &str) -> Option<LineCap> {
        match name.to_ascii_lowercase().as_str() {
            "butt"              => Some(LineCap::Butt),
            "round"             => Some(LineCap::Round),
            "projecting"        => Some(LineCap::Projecting),
            "triangular"        => Some(LineCap::Triangular),
            _                   => None
        }
    }
}

impl WindingRule {
    ///
    /// Looks up a fill rule by name
    ///
    pub fn from_name(name: &str) -> Option<WindingRule> {
        match name.to_ascii_lowercase().as_str() {
            "even-odd" | "alternate"        => Some(WindingRule::EvenOdd),
            "nonzero-winding" | "winding"   => Some(WindingRule::NonZero),
            _                               => None
        }
    }
}

impl HorizontalAlignment {
    ///
    /// The alignment for a justification character: 'l', 'c' or 'r'
    ///
    pub fn from_char(justify: char) -> Option<HorizontalAlignment> {
        match justify {
            'l' | 'L'   => Some(HorizontalAlignment::Left),
            'c' | 'C'   => Some(HorizontalAlignment::Center),
            'r' | 'R'   => Some(HorizontalAlignment::Right),
            _           => None
        }
    }
}

impl VerticalAlignment {
    ///
    /// The alignment for a justification character: 'b' (bottom), 'x' (baseline), 'c' (center) or 't' (top)
    ///
    pub fn from_char(justify: char) -> Option<VerticalAlignment> {
        match justify {
            'b' | 'B'   => Some(VerticalAlignment::Bottom),
            'x' | 'X'   => Some(VerticalAlignment::Baseline),
            'c' | 'C'   => Some(VerticalAlignment::Center),
            't' | 'T'   => Some(VerticalAlignment::Top),
            _           => None
        }
    }
}
