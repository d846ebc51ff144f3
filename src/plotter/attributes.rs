use super::lifecycle::*;
use crate::path::*;
use crate::fonts::*;
use crate::error::*;
use crate::context::*;
use crate::backend::*;

use flo_plot_canvas::*;

///
/// A colour as passed to the colour attributes: either three 16-bit channels or a name
///
/// Names are the usual colour names ("red", "light blue") or `#rrggbb` hex strings.
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ColorSpec {
    Rgb(u16, u16, u16),
    Named(String)
}

impl ColorSpec {
    ///
    /// The colour this refers to, or None if the name isn't known
    ///
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorSpec::Rgb(red, green, blue)    => Some(Color::rgb(*red, *green, *blue)),
            ColorSpec::Named(name)              => Color::from_name(name)
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> ColorSpec {
        ColorSpec::Rgb(color.red, color.green, color.blue)
    }
}

impl From<(u16, u16, u16)> for ColorSpec {
    fn from((red, green, blue): (u16, u16, u16)) -> ColorSpec {
        ColorSpec::Rgb(red, green, blue)
    }
}

impl<'a> From<&'a str> for ColorSpec {
    fn from(name: &'a str) -> ColorSpec {
        ColorSpec::Named(name.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(name: String) -> ColorSpec {
        ColorSpec::Named(name)
    }
}

impl Plotter {
    ///
    /// Resolves a colour, warning if it's unknown
    ///
    fn resolve_color(&mut self, color: ColorSpec) -> Result<Option<Color>, PlotError> {
        self.check_open()?;

        let resolved = color.resolve();
        if resolved.is_none() {
            self.diagnostics.warn(&format!("ignoring unknown color {:?}", color));
        }

        Ok(resolved)
    }

    ///
    /// Error for an operation that this type of plotter can't do at all
    ///
    fn unsupported(&mut self, capability: &'static str) -> PlotError {
        self.diagnostics.warn(&format!("{} is not supported", capability));

        PlotError::Unsupported { plotter_type: self.plotter_type.name().to_string(), capability: capability }
    }

    ///
    /// Sets the colour that lines and text are drawn in
    ///
    pub fn pencolor<Spec: Into<ColorSpec>>(&mut self, color: Spec) -> Result<(), PlotError> {
        if let Some(color) = self.resolve_color(color.into())? {
            self.update_context(true, |context| context.pen_color = color)?;
        }

        Ok(())
    }

    ///
    /// Sets the colour that filled paths use
    ///
    pub fn fillcolor<Spec: Into<ColorSpec>>(&mut self, color: Spec) -> Result<(), PlotError> {
        if let Some(color) = self.resolve_color(color.into())? {
            self.update_context(true, |context| context.fill_color = color)?;
        }

        Ok(())
    }

    ///
    /// Sets both the pen and the fill colour
    ///
    pub fn color<Spec: Into<ColorSpec>>(&mut self, color: Spec) -> Result<(), PlotError> {
        if let Some(color) = self.resolve_color(color.into())? {
            self.update_context(true, |context| {
                context.pen_color   = color;
                context.fill_color  = color;
            })?;
        }

        Ok(())
    }

    ///
    /// Sets the colour used by the next erase
    ///
    pub fn bgcolor<Spec: Into<ColorSpec>>(&mut self, color: Spec) -> Result<(), PlotError> {
        if let Some(color) = self.resolve_color(color.into())? {
            self.update_context(false, |context| context.background = color)?;
        }

        Ok(())
    }

    ///
    /// Sets the fill level: 0 turns filling off, 1 fills with the fill colour and higher levels up to 0xffff approach white
    ///
    /// Negative levels turn filling off and levels above 0xffff fill with white.
    ///
    pub fn filltype(&mut self, level: i32) -> Result<(), PlotError> {
        self.check_open()?;

        let level = level.max(0).min(0xffff) as u16;
        if level > 0 && !self.capabilities.allows("SOLID_FILL") {
            return Err(self.unsupported("SOLID_FILL"));
        }

        self.update_context(true, |context| context.fill_level = level)
    }

    ///
    /// Sets the fill rule ("even-odd", "alternate", "nonzero-winding" or "winding")
    ///
    /// Plotters without nonzero winding fills use even-odd instead. Unknown names select even-odd.
    ///
    pub fn fillmod(&mut self, name: &str) -> Result<(), PlotError> {
        self.check_open()?;

        if !self.capabilities.allows("SOLID_FILL") {
            return Err(self.unsupported("SOLID_FILL"));
        }

        let mut rule = match WindingRule::from_name(name) {
            Some(rule)  => rule,
            None        => {
                self.diagnostics.warn(&format!("unknown fill rule '{}': using even-odd", name));
                WindingRule::EvenOdd
            }
        };

        if rule == WindingRule::NonZero && !self.capabilities.allows("NONZERO_WINDING_NUMBER_FILL") {
            self.diagnostics.warn("nonzero winding fills are drawn as even-odd");
            rule = WindingRule::EvenOdd;
        }

        self.update_context(true, |context| context.fill_rule = rule)
    }

    ///
    /// Sets one of the standard line styles by name
    ///
    /// Unknown names select solid lines.
    ///
    pub fn linemod(&mut self, name: &str) -> Result<(), PlotError> {
        self.check_open()?;

        let mode = match name.parse::<LineMode>() {
            Ok(mode)    => mode,
            Err(())     => {
                self.diagnostics.warn(&format!("unknown line style '{}': using solid", name));
                LineMode::Solid
            }
        };

        self.update_context(true, |context| {
            context.line_mode   = mode;
            context.dash_array  = None;
        })
    }

    ///
    /// Sets a dash pattern in user units, replacing the line style
    ///
    /// Plotters that can't draw arbitrary dashes use the nearest standard line style.
    ///
    pub fn linedash(&mut self, dashes: &[f64], offset: f64) -> Result<(), PlotError> {
        self.check_open()?;

        if dashes.iter().any(|length| *length < 0.0) {
            self.diagnostics.warn("ignoring dash pattern with negative lengths");
            return Ok(());
        }

        if self.capabilities.allows("DASH_ARRAY") {
            let dash_array = DashArray { dashes: dashes.to_vec(), offset: offset };

            self.update_context(true, |context| {
                context.line_mode   = LineMode::Solid;
                context.dash_array  = Some(dash_array);
            })
        } else {
            let context         = self.graphics_context()?;
            let scale           = context.device_scale();
            let unit            = context.line_width_device().max(context.defaults.min_dash_unit);
            let device_dashes   = dashes.iter().map(|length| length*scale).collect::<Vec<_>>();
            let mode            = LineMode::nearest_to_dashes(&device_dashes, unit);

            self.diagnostics.warn(&format!("dash patterns are drawn as the {:?} line style", mode));
            self.update_context(true, |context| {
                context.line_mode   = mode;
                context.dash_array  = None;
            })
        }
    }

    ///
    /// Sets the line width in user units. A negative width goes back to the default.
    ///
    pub fn linewidth(&mut self, width: f64) -> Result<(), PlotError> {
        self.check_open()?;

        if !self.capabilities.allows("WIDE_LINES") {
            self.diagnostics.warn("line widths are ignored");
        }

        let width = if width < 0.0 { None } else { Some(width) };
        self.update_context(true, |context| context.line_width = width)
    }

    ///
    /// Sets how line ends are drawn ("butt", "round", "projecting" or "triangular")
    ///
    pub fn capmod(&mut self, name: &str) -> Result<(), PlotError> {
        self.check_open()?;

        let mut cap = match LineCap::from_name(name) {
            Some(cap)   => cap,
            None        => {
                self.diagnostics.warn(&format!("unknown cap style '{}': using butt", name));
                LineCap::Butt
            }
        };

        if cap == LineCap::Triangular && !self.draws_triangular_ends() {
            self.diagnostics.warn("triangular caps are drawn as round caps");
            cap = LineCap::Round;
        }

        self.update_context(true, |context| context.cap = cap)
    }

    ///
    /// Sets how the corners of paths are drawn ("miter", "round", "bevel" or "triangular")
    ///
    pub fn joinmod(&mut self, name: &str) -> Result<(), PlotError> {
        self.check_open()?;

        let mut join = match LineJoin::from_name(name) {
            Some(join)  => join,
            None        => {
                self.diagnostics.warn(&format!("unknown join style '{}': using miter", name));
                LineJoin::Miter
            }
        };

        if join == LineJoin::Triangular && !self.draws_triangular_ends() {
            self.diagnostics.warn("triangular joins are drawn as round joins");
            join = LineJoin::Round;
        }

        self.update_context(true, |context| context.join = join)
    }

    fn draws_triangular_ends(&self) -> bool {
        match self.plotter_type {
            PlotterType::Pcl | PlotterType::Hpgl    => true,
            _                                       => false
        }
    }

    ///
    /// Sets the miter limit. Values below 1 go back to the default.
    ///
    pub fn miterlimit(&mut self, limit: f64) -> Result<(), PlotError> {
        let limit = if limit < 1.0 { DEFAULT_MITER_LIMIT } else { limit };
        self.update_context(true, |context| context.miter_limit = limit)
    }

    ///
    /// Sets the font for labels, returning the font size in user units
    ///
    /// Fonts the plotter can't draw are replaced by its default font.
    ///
    pub fn fontname(&mut self, name: &str) -> Result<f64, PlotError> {
        self.check_open()?;

        let default_font    = self.plotter_type.default_font();
        let font_name       = if name.is_empty() || name.eq_ignore_ascii_case("(null)") {
            default_font.to_string()
        } else if !is_font_available(name, &self.capabilities) {
            self.diagnostics.warn(&format!("font '{}' is not available: using {}", name, default_font));
            default_font.to_string()
        } else {
            name.to_string()
        };

        self.update_context(false, |context| {
            context.font_name = font_name;
            context.font_size_user()
        })
    }

    ///
    /// Sets the font size in user units, returning the size that will be used. Sizes of 0 or less go back to the default.
    ///
    pub fn fontsize(&mut self, size: f64) -> Result<f64, PlotError> {
        let size = if size <= 0.0 { None } else { Some(size) };

        self.update_context(false, |context| {
            context.font_size = size;
            context.font_size_user()
        })
    }

    ///
    /// Sets the angle of labels in degrees counterclockwise, returning the font size in user units
    ///
    pub fn textangle(&mut self, angle: f64) -> Result<f64, PlotError> {
        self.update_context(false, |context| {
            context.text_angle = angle;
            context.font_size_user()
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::*;
    use crate::parameters::*;

    fn open_plotter(plotter_type: &str, parameters: ParameterRegistry) -> Plotter {
        let mut plotter = PlotterBuilder::new(plotter_type)
            .output(OutputTarget::Discard)
            .parameters(parameters)
            .build()
            .unwrap();

        plotter.open().unwrap();
        plotter
    }

    #[test]
    fn color_specs() {
        assert!(ColorSpec::from("red").resolve() == Some(Color::from_rgb8(255, 0, 0)));
        assert!(ColorSpec::from((1u16, 2u16, 3u16)).resolve() == Some(Color::rgb(1, 2, 3)));
        assert!(ColorSpec::from("#00ff00").resolve() == Some(Color::from_rgb8(0, 255, 0)));
        assert!(ColorSpec::from("not a colour").resolve().is_none());
    }

    #[test]
    fn unknown_colors_are_ignored() {
        let mut plotter = open_plotter("svg", ParameterRegistry::new());

        plotter.pencolor("blue").unwrap();
        plotter.pencolor("no such colour").unwrap();

        assert!(plotter.graphics_context().unwrap().pen_color == Color::from_rgb8(0, 0, 255));
    }

    #[test]
    fn color_sets_pen_and_fill() {
        let mut plotter = open_plotter("svg", ParameterRegistry::new());

        plotter.color(ColorSpec::Rgb(0x1000, 0x2000, 0x3000)).unwrap();

        let context = plotter.graphics_context().unwrap();
        assert!(context.pen_color == Color::rgb(0x1000, 0x2000, 0x3000));
        assert!(context.fill_color == Color::rgb(0x1000, 0x2000, 0x3000));
    }

    #[test]
    fn attribute_changes_end_the_path() {
        let mut plotter = open_plotter("svg", ParameterRegistry::new());

        plotter.line(Coords::Absolute, 0.0, 0.0, 1.0, 1.0).unwrap();
        plotter.linewidth(0.01).unwrap();
        assert!(plotter.graphics_context().unwrap().path.is_none());

        plotter.line(Coords::Absolute, 0.0, 0.0, 1.0, 1.0).unwrap();
        plotter.fontsize(0.1).unwrap();
        assert!(plotter.graphics_context().unwrap().path.is_some());
    }

    #[test]
    fn triangular_joins_only_on_plotters() {
        let mut svg     = open_plotter("svg", ParameterRegistry::new());
        let mut hpgl    = open_plotter("hpgl", ParameterRegistry::new());

        svg.joinmod("triangular").unwrap();
        svg.capmod("triangular").unwrap();
        hpgl.joinmod("triangular").unwrap();

        assert!(svg.graphics_context().unwrap().join == LineJoin::Round);
        assert!(svg.graphics_context().unwrap().cap == LineCap::Round);
        assert!(hpgl.graphics_context().unwrap().join == LineJoin::Triangular);
    }

    #[test]
    fn terminals_cannot_fill() {
        let mut plotter = open_plotter("tek", ParameterRegistry::new());

        assert!(match plotter.fillmod("winding") { Err(PlotError::Unsupported { capability: "SOLID_FILL", .. }) => true, _ => false });
        assert!(match plotter.filltype(1) { Err(PlotError::Unsupported { .. }) => true, _ => false });
        assert!(plotter.filltype(0).is_ok());
        assert!(plotter.graphics_context().unwrap().fill_level == 0);
    }

    #[test]
    fn nonzero_winding_falls_back_to_even_odd() {
        let mut parameters = ParameterRegistry::new();
        parameters.set("HPGL_VERSION", "1.5").unwrap();

        let mut old_plotter = open_plotter("hpgl", parameters);
        let mut svg         = open_plotter("svg", ParameterRegistry::new());

        old_plotter.fillmod("winding").unwrap();
        svg.fillmod("nonzero-winding").unwrap();

        assert!(old_plotter.graphics_context().unwrap().fill_rule == WindingRule::EvenOdd);
        assert!(svg.graphics_context().unwrap().fill_rule == WindingRule::NonZero);
    }

    #[test]
    fn dash_arrays() {
        let mut svg = open_plotter("svg", ParameterRegistry::new());
        let mut tek = open_plotter("tek", ParameterRegistry::new());

        svg.linedash(&[0.01, 0.02], 0.005).unwrap();
        tek.linedash(&[0.01, 0.01], 0.0).unwrap();

        assert!(svg.graphics_context().unwrap().dash_array == Some(DashArray { dashes: vec![0.01, 0.02], offset: 0.005 }));
        assert!(tek.graphics_context().unwrap().dash_array.is_none());
        assert!(tek.graphics_context().unwrap().line_mode != LineMode::Solid);

        svg.linemod("dotted").unwrap();
        assert!(svg.graphics_context().unwrap().dash_array.is_none());
        assert!(svg.graphics_context().unwrap().line_mode == LineMode::Dotted);

        svg.linedash(&[-1.0], 0.0).unwrap();
        assert!(svg.graphics_context().unwrap().line_mode == LineMode::Dotted);
    }

    #[test]
    fn out_of_range_values_reset_to_defaults() {
        let mut plotter = open_plotter("ps", ParameterRegistry::new());

        plotter.miterlimit(0.5).unwrap();
        plotter.linewidth(0.02).unwrap();
        plotter.linewidth(-1.0).unwrap();

        let context = plotter.graphics_context().unwrap();
        assert!(context.miter_limit == DEFAULT_MITER_LIMIT);
        assert!(context.line_width.is_none());
    }

    #[test]
    fn font_size_defaults_to_fiftieth_of_display() {
        let mut plotter = open_plotter("ps", ParameterRegistry::new());

        assert!((plotter.fontsize(0.1).unwrap() - 0.1).abs() < 1e-12);
        assert!((plotter.fontsize(0.0).unwrap() - 0.02).abs() < 1e-12);
        assert!((plotter.textangle(45.0).unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn unavailable_fonts_use_default() {
        let mut png = open_plotter("png", ParameterRegistry::new());
        let mut ps  = open_plotter("ps", ParameterRegistry::new());

        png.fontname("Times-Roman").unwrap();
        ps.fontname("Times-Roman").unwrap();

        assert!(png.graphics_context().unwrap().font_name == "HersheySerif");
        assert!(ps.graphics_context().unwrap().font_name == "Times-Roman");

        ps.fontname("").unwrap();
        assert!(ps.graphics_context().unwrap().font_name == "Helvetica");
    }

    #[test]
    fn warnings_go_to_error_stream() {
        use std::sync::*;
        use std::io::{self, Write};

        #[derive(Clone)]
        struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

        impl Write for SharedBuffer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.0.lock().unwrap().extend_from_slice(buf); Ok(buf.len()) }
            fn flush(&mut self) -> io::Result<()> { Ok(()) }
        }

        let buffer      = SharedBuffer(Arc::new(Mutex::new(vec![])));
        let mut plotter = PlotterBuilder::new("png")
            .output(OutputTarget::Discard)
            .errors(buffer.clone())
            .parameters(ParameterRegistry::new())
            .build()
            .unwrap();

        plotter.open().unwrap();
        plotter.fontname("Times-Roman").unwrap();

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("Times-Roman"));
    }
}
