use super::segment::*;
use crate::context::*;

///
/// Receives paths from a path builder as they are finished
///
pub trait PathSink {
    ///
    /// A segment has just been added to a path that is still under construction
    ///
    fn segment_added(&mut self, _path: &Path) { }

    ///
    /// A path has ended and should be drawn
    ///
    fn path_finished(&mut self, path: Path);
}

///
/// The rules for accumulating segments into the path stored in a graphics context
///
/// A segment whose start point is the graphics cursor extends the path under construction; any
/// other segment ends it and begins a new one. Long unfilled paths are handed to the sink in
/// pieces so that no piece has more than `max_points` points.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PathBuilder {
    max_points: Option<usize>
}

impl PathBuilder {
    ///
    /// Creates a path builder, which will split long paths if `max_points` is set
    ///
    pub fn new(max_points: Option<usize>) -> PathBuilder {
        PathBuilder { max_points }
    }

    ///
    /// Moves the graphics cursor, ending any path under construction
    ///
    pub fn move_to(&self, context: &mut GraphicsContext, sink: &mut dyn PathSink, point: (f64, f64)) {
        self.end_path(context, sink);
        context.cursor = point;
    }

    ///
    /// Adds a line from the cursor, extending the current path or starting a new one at the cursor
    ///
    pub fn line_to(&self, context: &mut GraphicsContext, sink: &mut dyn PathSink, end: (f64, f64)) {
        let start = context.cursor;
        self.add_segment(context, sink, start, Segment::Line(end.0, end.1));
    }

    ///
    /// Adds a segment starting at `start`
    ///
    /// If `start` is the graphics cursor and a path is under construction then the segment extends
    /// it: otherwise the current path is ended and a new one begins at `start`.
    ///
    pub fn add_segment(&self, context: &mut GraphicsContext, sink: &mut dyn PathSink, start: (f64, f64), segment: Segment) {
        let continues = context.path.is_some() && context.cursor == start;

        if !continues {
            self.end_path(context, sink);
            context.path = Some(Path::new(start, context.path_style()));
        } else if self.needs_split(context.path.as_ref()) {
            if let Some(full_path) = context.path.take() {
                debug!("Splitting path at {} points", full_path.point_count());

                let style       = full_path.style.clone();
                let origin      = full_path.origin;
                sink.path_finished(full_path);

                let mut piece   = Path::new(start, style);
                piece.origin    = origin;
                context.path    = Some(piece);
            }
        }

        if let Some(path) = context.path.as_mut() {
            path.segments.push(segment);
            context.cursor = segment.end_point();

            sink.segment_added(path);
        }
    }

    ///
    /// True if adding another point to a path would make it longer than the limit
    ///
    fn needs_split(&self, path: Option<&Path>) -> bool {
        match (self.max_points, path) {
            (Some(max_points), Some(path))  => !path.is_filled() && !path.segments.is_empty() && path.point_count() + 1 > max_points,
            _                               => false
        }
    }

    ///
    /// Closes the path under construction, which also ends it. The cursor returns to the start of the path.
    ///
    /// The last piece of a path that has been split can't be closed on its own, so it gets a line
    /// back to where the whole path began instead.
    ///
    pub fn close_path(&self, context: &mut GraphicsContext, sink: &mut dyn PathSink) {
        if let Some(path) = context.path.as_mut() {
            if path.origin == path.start {
                path.closed = true;
            } else if path.end_point() != path.origin {
                path.segments.push(Segment::Line(path.origin.0, path.origin.1));
            }

            context.cursor = path.origin;
        }

        self.end_path(context, sink);
    }

    ///
    /// Ends the path under construction, passing it to the sink
    ///
    pub fn end_path(&self, context: &mut GraphicsContext, sink: &mut dyn PathSink) {
        if let Some(path) = context.path.take() {
            sink.path_finished(path);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct CollectPaths {
        finished:   Vec<Path>,
        segments:   usize
    }

    impl PathSink for CollectPaths {
        fn segment_added(&mut self, _path: &Path) {
            self.segments += 1;
        }

        fn path_finished(&mut self, path: Path) {
            self.finished.push(path);
        }
    }

    fn context() -> GraphicsContext {
        GraphicsContext::new(DeviceDefaults::default())
    }

    #[test]
    fn connected_lines_make_one_path() {
        let builder     = PathBuilder::new(None);
        let mut context = context();
        let mut sink    = CollectPaths { finished: vec![], segments: 0 };

        builder.move_to(&mut context, &mut sink, (0.0, 0.0));
        builder.line_to(&mut context, &mut sink, (1.0, 0.0));
        builder.line_to(&mut context, &mut sink, (1.0, 1.0));
        builder.end_path(&mut context, &mut sink);

        assert!(sink.finished.len() == 1);
        assert!(sink.finished[0].point_count() == 3);
        assert!(sink.segments == 2);
    }

    #[test]
    fn discontinuity_starts_new_path() {
        let builder     = PathBuilder::new(None);
        let mut context = context();
        let mut sink    = CollectPaths { finished: vec![], segments: 0 };

        builder.add_segment(&mut context, &mut sink, (0.0, 0.0), Segment::Line(1.0, 0.0));
        builder.add_segment(&mut context, &mut sink, (5.0, 5.0), Segment::Line(6.0, 5.0));

        assert!(sink.finished.len() == 1);
        assert!(context.path.as_ref().map(|path| path.start) == Some((5.0, 5.0)));
        assert!(context.cursor == (6.0, 5.0));
    }

    #[test]
    fn long_path_is_split() {
        let builder     = PathBuilder::new(Some(4));
        let mut context = context();
        let mut sink    = CollectPaths { finished: vec![], segments: 0 };

        builder.move_to(&mut context, &mut sink, (0.0, 0.0));
        for x in 1..5 {
            builder.line_to(&mut context, &mut sink, (x as f64, 0.0));
        }
        builder.end_path(&mut context, &mut sink);

        assert!(sink.finished.len() == 2);
        assert!(sink.finished[0].point_count() == 4);
        assert!(sink.finished[1].start == (3.0, 0.0));
        assert!(sink.finished[1].end_point() == (4.0, 0.0));
    }

    #[test]
    fn closing_split_path_returns_to_origin() {
        let builder     = PathBuilder::new(Some(3));
        let mut context = context();
        let mut sink    = CollectPaths { finished: vec![], segments: 0 };

        builder.move_to(&mut context, &mut sink, (0.0, 0.0));
        builder.line_to(&mut context, &mut sink, (1.0, 0.0));
        builder.line_to(&mut context, &mut sink, (1.0, 1.0));
        builder.line_to(&mut context, &mut sink, (0.0, 1.0));
        builder.close_path(&mut context, &mut sink);

        assert!(sink.finished.len() == 2);
        assert!(sink.finished[1].start == (1.0, 1.0));
        assert!(sink.finished[1].origin == (0.0, 0.0));
        assert!(!sink.finished[1].closed);
        assert!(sink.finished[1].end_point() == (0.0, 0.0));
        assert!(context.cursor == (0.0, 0.0));
    }

    #[test]
    fn close_returns_cursor_to_start() {
        let builder     = PathBuilder::new(None);
        let mut context = context();
        let mut sink    = CollectPaths { finished: vec![], segments: 0 };

        builder.move_to(&mut context, &mut sink, (1.0, 1.0));
        builder.line_to(&mut context, &mut sink, (2.0, 1.0));
        builder.line_to(&mut context, &mut sink, (2.0, 2.0));
        builder.close_path(&mut context, &mut sink);

        assert!(sink.finished.len() == 1);
        assert!(sink.finished[0].closed);
        assert!(context.cursor == (1.0, 1.0));
        assert!(context.path.is_none());
    }
}
