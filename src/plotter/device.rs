use crate::path::*;
use crate::backend::*;
use crate::capability::*;

use flo_plot_canvas::*;

///
/// The device state that has been set by instructions already sent, so it isn't repeated
///
/// `None` means the state isn't known (at the start of a page or after an erase).
///
#[derive(Clone, PartialEq, Debug, Default)]
struct DeviceStyle {
    stroke_color:   Option<Color>,
    fill_color:     Option<Color>,
    line_width:     Option<f64>,
    cap:            Option<LineCap>,
    join:           Option<LineJoin>,
    miter_limit:    Option<f64>,
    dashes:         Option<Option<DashPattern>>,
    fill_rule:      Option<WindingRule>
}

///
/// Turns finished paths, points and labels into device instructions for a backend
///
pub (crate) struct Device {
    pub backend:    Backend,
    lowering:       Lowering,

    /// Path segments are sent as they are added instead of when the path ends
    streaming:      bool,

    /// Number of segments of the current path that have already been streamed
    streamed:       usize,

    wide_lines:     bool,
    solid_fill:     bool,
    style:          DeviceStyle
}

impl Device {
    pub fn new(backend: Backend, lowering: Lowering, streaming: bool, capabilities: &CapabilityTable) -> Device {
        Device {
            backend:    backend,
            lowering:   lowering,
            streaming:  streaming,
            streamed:   0,
            wide_lines: capabilities.allows("WIDE_LINES"),
            solid_fill: capabilities.allows("SOLID_FILL"),
            style:      DeviceStyle::default()
        }
    }

    ///
    /// Forgets the device state (it's unknown after a new page or an erase)
    ///
    pub fn reset_style(&mut self) {
        self.style      = DeviceStyle::default();
        self.streamed   = 0;
    }

    fn stroke_color(&mut self, color: Color, drawing: &mut Vec<Draw>) {
        if self.style.stroke_color != Some(color) {
            self.style.stroke_color = Some(color);
            drawing.push(Draw::StrokeColor(color));
        }
    }

    fn fill_color(&mut self, color: Color, drawing: &mut Vec<Draw>) {
        if self.style.fill_color != Some(color) {
            self.style.fill_color = Some(color);
            drawing.push(Draw::FillColor(color));
        }
    }

    ///
    /// The instructions that change the device state to match a path's style
    ///
    fn style_changes(&mut self, style: &PathStyle) -> Vec<Draw> {
        let mut drawing = vec![];

        self.stroke_color(style.pen_color, &mut drawing);

        if self.wide_lines && self.style.line_width != Some(style.line_width) {
            self.style.line_width = Some(style.line_width);
            drawing.push(Draw::LineWidth(style.line_width));
        }

        if self.style.cap != Some(style.cap) {
            self.style.cap = Some(style.cap);
            drawing.push(Draw::LineCap(style.cap));
        }

        if self.style.join != Some(style.join) {
            self.style.join = Some(style.join);
            drawing.push(Draw::LineJoin(style.join));
        }

        if style.join == LineJoin::Miter && self.style.miter_limit != Some(style.miter_limit) {
            self.style.miter_limit = Some(style.miter_limit);
            drawing.push(Draw::MiterLimit(style.miter_limit));
        }

        if self.style.dashes.as_ref() != Some(&style.dashes) {
            self.style.dashes = Some(style.dashes.clone());

            drawing.push(Draw::NewDashPattern);
            if let Some(pattern) = &style.dashes {
                drawing.extend(pattern.dashes.iter().map(|length| Draw::DashLength(*length)));
                drawing.push(Draw::DashOffset(pattern.offset));
            }
        }

        if let (Some(fill), true) = (style.fill, self.solid_fill) {
            self.fill_color(fill, &mut drawing);

            if self.style.fill_rule != Some(style.fill_rule) {
                self.style.fill_rule = Some(style.fill_rule);
                drawing.push(Draw::WindingRule(style.fill_rule));
            }
        }

        drawing
    }

    ///
    /// The instructions that finish a path: closing, filling and stroking it
    ///
    fn finish_path(&self, path: &Path, drawing: &mut Vec<Draw>) {
        if path.closed && self.streaming {
            drawing.push(Draw::ClosePath);
        }

        if path.is_filled() && self.solid_fill {
            drawing.push(Draw::Fill);
        }

        drawing.push(Draw::Stroke);
    }

    ///
    /// Sends whatever hasn't yet been sent of a path, starting it if necessary
    ///
    fn stream_segments(&mut self, path: &Path) {
        let mut drawing = vec![];
        let transform   = path.style.transform;

        if self.streamed == 0 {
            let start = transform.transform_point(path.start.0, path.start.1);

            drawing.extend(self.style_changes(&path.style));
            drawing.push(Draw::NewPath);
            drawing.push(Draw::Move(start.0, start.1));
        }

        let mut from = match self.streamed {
            0       => path.start,
            count   => path.segments.get(count-1).map(|segment| segment.end_point()).unwrap_or(path.start)
        };
        for segment in path.segments.iter().skip(self.streamed) {
            drawing.extend(self.lowering.segment(&transform, from, segment));
            from = segment.end_point();
        }

        self.streamed = path.segments.len();
        self.backend.draw(drawing);
    }

    ///
    /// Draws a complete path
    ///
    fn draw_path(&mut self, path: &Path) {
        let mut drawing = self.style_changes(&path.style);

        drawing.push(Draw::NewPath);
        drawing.extend(self.lowering.path_geometry(path));
        self.finish_path(path, &mut drawing);

        self.backend.draw(drawing);
    }

    ///
    /// Draws the dots that stand in for a path in the disconnected line mode
    ///
    fn draw_disconnected(&mut self, path: &Path) {
        let transform   = path.style.transform;
        let radius      = path.style.line_width / 2.0;
        let mut drawing = vec![];

        self.stroke_color(path.style.pen_color, &mut drawing);

        for (x, y) in path.junctions() {
            let (x, y) = transform.transform_point(x, y);

            if radius <= 0.0 || !self.solid_fill {
                drawing.push(Draw::Point(x, y));
            } else {
                let dot = device_circle((x, y), radius, &path.style);

                self.fill_color(path.style.pen_color, &mut drawing);
                drawing.push(Draw::NewPath);
                drawing.extend(self.lowering.path_geometry(&dot));
                drawing.push(Draw::Fill);
            }
        }

        self.backend.draw(drawing);
    }

    ///
    /// Draws a single point in a colour
    ///
    pub fn draw_point(&mut self, point: (f64, f64), color: Color) {
        let mut drawing = vec![];

        self.stroke_color(color, &mut drawing);
        drawing.push(Draw::Point(point.0, point.1));

        self.backend.draw(drawing);
    }

    ///
    /// Draws a text label in a colour
    ///
    pub fn draw_label(&mut self, label: TextLabel, color: Color) {
        let mut drawing = vec![];

        self.stroke_color(color, &mut drawing);
        drawing.push(Draw::Label(label));

        self.backend.draw(drawing);
    }
}

///
/// A circle in device coordinates, used for the dots of disconnected lines
///
fn device_circle(center: (f64, f64), radius: f64, style: &PathStyle) -> Path {
    let (cx, cy)        = center;
    let quarter         = std::f64::consts::PI / 2.0;
    let mut style       = style.clone();
    style.transform     = Transform2D::identity();

    let mut circle      = Path::new((cx+radius, cy), style);
    circle.closed       = true;
    circle.segments     = vec![
        Segment::Arc { center: center, end: (cx, cy+radius), sweep: quarter },
        Segment::Arc { center: center, end: (cx-radius, cy), sweep: quarter },
        Segment::Arc { center: center, end: (cx, cy-radius), sweep: quarter },
        Segment::Arc { center: center, end: (cx+radius, cy), sweep: quarter }
    ];

    circle
}

impl PathSink for Device {
    fn segment_added(&mut self, path: &Path) {
        if self.streaming && path.style.line_mode != LineMode::Disconnected {
            self.stream_segments(path);
        }
    }

    fn path_finished(&mut self, path: Path) {
        if path.style.line_mode == LineMode::Disconnected {
            self.streamed = 0;
            self.draw_disconnected(&path);
        } else if self.streaming {
            self.stream_segments(&path);

            let mut drawing = vec![];
            self.finish_path(&path, &mut drawing);
            self.backend.draw(drawing);

            self.streamed = 0;
        } else {
            self.draw_path(&path);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::*;
    use crate::parameters::*;

    fn device(plotter_type: PlotterType, streaming: bool) -> (Device, Recording) {
        let recording   = Recording::new();
        let mut backend = Backend::new(plotter_type, Box::new(recording.encoder()), BackendOptions::default());
        backend.open(PageDescription { number: 1, size: (1.0, 1.0), background: Color::white() }).unwrap();

        let capabilities    = CapabilityTable::for_plotter(plotter_type, &ParameterRegistry::new());
        let lowering        = Lowering { support: SegmentSupport::all(), max_chord: 0.01 };

        (Device::new(backend, lowering, streaming, &capabilities), recording)
    }

    fn style() -> PathStyle {
        GraphicsContext::new(DeviceDefaults::default()).path_style()
    }

    fn drawing(recording: &Recording) -> Vec<Draw> {
        recording.pages().into_iter().flat_map(|page| page.drawing()).collect()
    }

    fn count(drawing: &[Draw], matches: impl Fn(&Draw) -> bool) -> usize {
        drawing.iter().filter(|draw| matches(draw)).count()
    }

    fn two_lines(style: PathStyle) -> Path {
        let mut path    = Path::new((0.0, 0.0), style);
        path.segments   = vec![Segment::Line(0.5, 0.0), Segment::Line(0.5, 0.5)];
        path
    }

    #[test]
    fn style_is_only_sent_when_it_changes() {
        let (mut device, recording) = device(PlotterType::Meta, false);

        device.path_finished(two_lines(style()));
        device.path_finished(two_lines(style()));

        let drawing = drawing(&recording);
        assert!(count(&drawing, |draw| match draw { Draw::StrokeColor(_) => true, _ => false }) == 1);
        assert!(count(&drawing, |draw| *draw == Draw::NewPath) == 2);
        assert!(count(&drawing, |draw| *draw == Draw::Stroke) == 2);
    }

    #[test]
    fn reset_style_sends_it_again() {
        let (mut device, recording) = device(PlotterType::Meta, false);

        device.path_finished(two_lines(style()));
        device.reset_style();
        device.path_finished(two_lines(style()));

        let drawing = drawing(&recording);
        assert!(count(&drawing, |draw| match draw { Draw::StrokeColor(_) => true, _ => false }) == 2);
    }

    #[test]
    fn streaming_sends_segments_as_they_arrive() {
        let (mut device, recording) = device(PlotterType::Meta, true);
        let mut path                = Path::new((0.0, 0.0), style());

        path.segments.push(Segment::Line(0.5, 0.0));
        device.segment_added(&path);

        let so_far = drawing(&recording);
        assert!(count(&so_far, |draw| match draw { Draw::Line(_, _) => true, _ => false }) == 1);
        assert!(count(&so_far, |draw| *draw == Draw::Stroke) == 0);

        path.segments.push(Segment::Line(0.5, 0.5));
        device.segment_added(&path);
        device.path_finished(path);

        let finished = drawing(&recording);
        assert!(count(&finished, |draw| *draw == Draw::NewPath) == 1);
        assert!(count(&finished, |draw| match draw { Draw::Line(_, _) => true, _ => false }) == 2);
        assert!(finished.last() == Some(&Draw::Stroke));
    }

    #[test]
    fn disconnected_lines_draw_dots() {
        let (mut device, recording) = device(PlotterType::Meta, false);
        let mut style               = style();
        style.line_mode             = LineMode::Disconnected;
        style.line_width            = 0.1;

        device.path_finished(two_lines(style));

        let drawing = drawing(&recording);
        assert!(count(&drawing, |draw| *draw == Draw::Fill) == 3);
        assert!(count(&drawing, |draw| *draw == Draw::Stroke) == 0);
    }

    #[test]
    fn thin_disconnected_lines_draw_points() {
        let (mut device, recording) = device(PlotterType::Meta, false);
        let mut style               = style();
        style.line_mode             = LineMode::Disconnected;
        style.line_width            = 0.0;

        device.path_finished(two_lines(style));

        let drawing = drawing(&recording);
        assert!(count(&drawing, |draw| match draw { Draw::Point(_, _) => true, _ => false }) == 3);
    }

    #[test]
    fn no_fill_without_solid_fill() {
        let (mut device, recording) = device(PlotterType::Tek, false);
        let mut style               = style();
        style.fill                  = Some(Color::black());

        device.path_finished(two_lines(style));

        let drawing = drawing(&recording);
        assert!(count(&drawing, |draw| *draw == Draw::Fill) == 0);
        assert!(count(&drawing, |draw| *draw == Draw::Stroke) == 1);
    }

    #[test]
    fn filled_paths_set_fill_color_and_rule() {
        let (mut device, recording) = device(PlotterType::Meta, false);
        let mut style               = style();
        style.fill                  = Some(Color::rgb(0, 0, 0xffff));
        style.fill_rule             = WindingRule::NonZero;

        device.path_finished(two_lines(style));

        let drawing = drawing(&recording);
        assert!(drawing.contains(&Draw::FillColor(Color::rgb(0, 0, 0xffff))));
        assert!(drawing.contains(&Draw::WindingRule(WindingRule::NonZero)));
        assert!(count(&drawing, |draw| *draw == Draw::Fill) == 1);
    }
}
