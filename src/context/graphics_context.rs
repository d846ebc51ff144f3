use crate::path::*;

use flo_plot_canvas::*;

///
/// The values a plotter's attributes take when they haven't been set, in device units
///
#[derive(Clone, PartialEq, Debug)]
pub struct DeviceDefaults {
    pub line_width:     f64,
    pub font_size:      f64,
    pub font_name:      String,

    /// The shortest dash unit used by the line modes, for very thin lines
    pub min_dash_unit:  f64
}

///
/// The dashes set by linedash(), in user units
///
#[derive(Clone, PartialEq, Debug)]
pub struct DashArray {
    pub dashes: Vec<f64>,
    pub offset: f64
}

///
/// The full set of drawing attributes, the graphics cursor and the path under construction
///
#[derive(Clone, PartialEq, Debug)]
pub struct GraphicsContext {
    /// Map from user coordinates to device coordinates
    pub transform:      Transform2D,

    /// Current position, in user coordinates
    pub cursor:         (f64, f64),

    pub pen_color:      Color,
    pub fill_color:     Color,

    /// 0 for no fill, 1 for the fill colour and up to 0xffff for white
    pub fill_level:     u16,

    pub fill_rule:      WindingRule,

    /// Line width in user units, or None to use the device default
    pub line_width:     Option<f64>,

    pub line_mode:      LineMode,

    /// Dash array set by linedash, overriding the line mode
    pub dash_array:     Option<DashArray>,

    pub cap:            LineCap,
    pub join:           LineJoin,
    pub miter_limit:    f64,

    pub font_name:      String,

    /// Font size in user units, or None to use the device default
    pub font_size:      Option<f64>,

    /// Angle of text in degrees, counterclockwise in user space
    pub text_angle:     f64,

    /// Colour used by the next erase
    pub background:     Color,

    pub defaults:       DeviceDefaults,

    /// The path being built, if there is one
    pub path:           Option<Path>
}

///
/// The miter limit that plotters start with (miters are cut off at angles below about 11 degrees)
///
pub const DEFAULT_MITER_LIMIT: f64 = 10.43;

impl Default for DeviceDefaults {
    fn default() -> DeviceDefaults {
        DeviceDefaults {
            line_width:     1.0/850.0,
            font_size:      1.0/50.0,
            font_name:      "HersheySerif".to_string(),
            min_dash_unit:  1.0/576.0
        }
    }
}

impl GraphicsContext {
    ///
    /// Creates a context with every attribute at its default value and an identity transform
    ///
    pub fn new(defaults: DeviceDefaults) -> GraphicsContext {
        GraphicsContext {
            transform:      Transform2D::identity(),
            cursor:         (0.0, 0.0),
            pen_color:      Color::black(),
            fill_color:     Color::black(),
            fill_level:     0,
            fill_rule:      WindingRule::EvenOdd,
            line_width:     None,
            line_mode:      LineMode::Solid,
            dash_array:     None,
            cap:            LineCap::Butt,
            join:           LineJoin::Miter,
            miter_limit:    DEFAULT_MITER_LIMIT,
            font_name:      defaults.font_name.clone(),
            font_size:      None,
            text_angle:     0.0,
            background:     Color::white(),
            defaults:       defaults,
            path:           None
        }
    }

    ///
    /// A copy of this context for pushing onto the stack: every attribute is kept but there's no path
    ///
    pub fn saved_copy(&self) -> GraphicsContext {
        GraphicsContext {
            path: None,
            .. self.clone()
        }
    }

    ///
    /// The factor by which the user transform shrinks lengths in the direction it shrinks them most
    ///
    pub fn device_scale(&self) -> f64 {
        self.transform.singular_values().1
    }

    ///
    /// Line width in device units
    ///
    pub fn line_width_device(&self) -> f64 {
        match self.line_width {
            Some(width) => width * self.device_scale(),
            None        => self.defaults.line_width
        }
    }

    ///
    /// Line width in user units
    ///
    pub fn line_width_user(&self) -> f64 {
        self.line_width.unwrap_or_else(|| self.to_user_units(self.defaults.line_width))
    }

    ///
    /// Font size in user units
    ///
    pub fn font_size_user(&self) -> f64 {
        self.font_size.unwrap_or_else(|| self.to_user_units(self.defaults.font_size))
    }

    fn to_user_units(&self, device_length: f64) -> f64 {
        let scale = self.device_scale();

        if scale > 0.0 { device_length / scale } else { device_length }
    }

    ///
    /// The colour that paths are filled with, or None if filling is off
    ///
    pub fn effective_fill(&self) -> Option<Color> {
        if self.fill_level == 0 || self.line_mode == LineMode::Disconnected {
            None
        } else {
            Some(self.fill_color.desaturate(self.fill_level))
        }
    }

    ///
    /// The dashes to stroke paths with, in device units
    ///
    pub fn dash_pattern(&self) -> Option<DashPattern> {
        match &self.dash_array {
            Some(dash_array) => {
                if dash_array.dashes.iter().all(|length| *length <= 0.0) {
                    None
                } else {
                    let scale = self.device_scale();

                    Some(DashPattern {
                        dashes: dash_array.dashes.iter().map(|length| length*scale).collect(),
                        offset: dash_array.offset*scale
                    })
                }
            },

            None => {
                let unit = self.line_width_device().max(self.defaults.min_dash_unit);
                self.line_mode.dash_pattern(unit)
            }
        }
    }

    ///
    /// The style for a path started with the current attributes
    ///
    pub fn path_style(&self) -> PathStyle {
        PathStyle {
            transform:      self.transform,
            pen_color:      self.pen_color,
            fill:           self.effective_fill(),
            fill_rule:      self.fill_rule,
            line_width:     self.line_width_device(),
            line_mode:      self.line_mode,
            dashes:         self.dash_pattern(),
            cap:            self.cap,
            join:           self.join,
            miter_limit:    self.miter_limit
        }
    }
}
