use super::encoder::*;
use super::plotter_type::*;
use crate::error::*;

use flo_plot_canvas::*;

use std::io;
use std::env;

///
/// Settings that change how a backend manages its pages
///
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BackendOptions {
    /// Drawing goes to an offscreen buffer that is copied to the display by erase and close
    pub double_buffer:      bool,

    /// Each erase after the first starts a new image (GIF only)
    pub gif_animation:      bool,

    /// The window is removed when the plotter is deleted
    pub vanish_on_delete:   bool,

    /// The display a window plotter connects to
    pub display:            Option<String>,

    /// The drawable a drawable plotter draws into
    pub drawable:           Option<String>
}

///
/// A finished page that hasn't been written yet
///
struct PendingPage {
    description:    PageDescription,
    frames:         Vec<Vec<Draw>>
}

///
/// Decides when the instructions produced by a plotter reach its encoder
///
/// Real-time backends pass instructions on as they arrive and keep a model of what is visible on
/// their surface. The others buffer each page and write it when it is closed, or when the plotter
/// is deleted for PostScript.
///
pub struct Backend {
    plotter_type:   PlotterType,
    encoder:        Box<dyn Encoder+Send>,
    options:        BackendOptions,

    /// True once the encoder's output has been acquired
    acquired:       bool,

    /// The page that is currently open
    page:           Option<PageDescription>,

    /// What can be seen on the surface of a real-time device
    surface:        Vec<Draw>,

    /// Drawing waiting to be copied to the surface when double buffering
    offscreen:      Vec<Draw>,

    /// The frames of the page being buffered
    frames:         Vec<Vec<Draw>>,

    /// Number of times the open page has been erased
    erase_count:    usize,

    /// Pages held back until the plotter is deleted
    retained:       Vec<PendingPage>,

    pages_written:  usize,

    /// The first error from a real-time write, reported by the next flush or close
    pending_error:  Option<io::Error>
}

impl Backend {
    ///
    /// Creates a backend that writes a particular type of output to an encoder
    ///
    pub fn new(plotter_type: PlotterType, encoder: Box<dyn Encoder+Send>, options: BackendOptions) -> Backend {
        Backend {
            plotter_type:   plotter_type,
            encoder:        encoder,
            options:        options,
            acquired:       false,
            page:           None,
            surface:        vec![],
            offscreen:      vec![],
            frames:         vec![],
            erase_count:    0,
            retained:       vec![],
            pages_written:  0,
            pending_error:  None
        }
    }

    pub fn plotter_type(&self) -> PlotterType {
        self.plotter_type
    }

    ///
    /// Window plotters need something to draw on
    ///
    fn check_display(&self) -> Result<(), PlotError> {
        match self.plotter_type {
            PlotterType::X => {
                if self.options.display.is_none() && env::var_os("DISPLAY").is_none() {
                    return Err(PlotError::Open("no display: set the DISPLAY parameter or environment variable".to_string()));
                }
            },

            PlotterType::XDrawable => {
                if self.options.drawable.is_none() {
                    return Err(PlotError::Open("no drawable: set XDRAWABLE_DRAWABLE1 or XDRAWABLE_DRAWABLE2".to_string()));
                }
            },

            _ => { }
        }

        Ok(())
    }

    ///
    /// Starts a new page
    ///
    pub fn open(&mut self, page: PageDescription) -> Result<(), PlotError> {
        self.check_display()?;

        if !self.acquired {
            self.encoder.acquire().map_err(|err| PlotError::Open(err.to_string()))?;
            self.acquired = true;
        }

        debug!("{}: beginning page {}", self.plotter_type, page.number);

        self.page           = Some(page);
        self.erase_count    = 0;

        if self.plotter_type.is_realtime() {
            if !self.plotter_type.is_persistent() {
                self.surface = vec![];
            }

            // The offscreen buffer starts out holding whatever the surface still shows
            self.offscreen = if self.options.double_buffer { self.surface.clone() } else { vec![] };

            self.encoder.begin_page(&page).map_err(|err| PlotError::Open(err.to_string()))?;
        } else {
            self.offscreen  = vec![];
            self.frames     = vec![vec![]];
        }

        Ok(())
    }

    ///
    /// Sends drawing instructions to the device
    ///
    pub fn draw(&mut self, drawing: Vec<Draw>) {
        if self.page.is_none() { return; }

        if !self.plotter_type.is_realtime() {
            if let Some(frame) = self.frames.last_mut() {
                frame.extend(drawing);
            }
        } else if self.options.double_buffer {
            self.offscreen.extend(drawing);
        } else {
            for draw in drawing.iter() {
                self.write_draw(draw);
            }
            self.surface.extend(drawing);
        }
    }

    ///
    /// Writes an instruction to the encoder of a real-time device, keeping the first error
    ///
    fn write_draw(&mut self, draw: &Draw) {
        trace!("{}: {:?}", self.plotter_type, draw);

        if let Err(err) = self.encoder.draw(draw) {
            if self.pending_error.is_none() {
                self.pending_error = Some(err);
            }
        }
    }

    ///
    /// Copies the offscreen buffer of a double-buffered device to its surface
    ///
    fn show_offscreen(&mut self, background: Color) {
        let frame = self.offscreen.drain(..).collect::<Vec<_>>();

        self.write_draw(&Draw::ClearCanvas(background));
        for draw in frame.iter() {
            self.write_draw(draw);
        }

        self.surface = frame;
    }

    ///
    /// Clears the page, or for animations starts a new frame
    ///
    pub fn erase(&mut self, background: Color) {
        if self.page.is_none() { return; }

        self.erase_count += 1;
        debug!("{}: erase {}", self.plotter_type, self.erase_count);

        if self.plotter_type.is_realtime() {
            if self.options.double_buffer {
                self.show_offscreen(background);
            } else {
                self.write_draw(&Draw::ClearCanvas(background));
                self.surface = vec![];
            }
        } else if self.plotter_type == PlotterType::Gif && self.options.gif_animation && self.erase_count > 1 {
            self.frames.push(vec![Draw::ClearCanvas(background)]);
        } else {
            self.frames = vec![vec![Draw::ClearCanvas(background)]];
        }
    }

    ///
    /// Finishes the current page
    ///
    pub fn close(&mut self) -> Result<(), PlotError> {
        let page = match self.page.take() {
            Some(page)  => page,
            None        => return Ok(())
        };

        debug!("{}: closing page {}", self.plotter_type, page.number);

        match self.plotter_type.page_emission() {
            PageEmission::Immediate => {
                if self.options.double_buffer {
                    self.show_offscreen(page.background);
                }

                if let Some(err) = self.pending_error.take() {
                    return Err(PlotError::Close(err.to_string()));
                }

                self.encoder.end_page()
                    .and_then(|_| self.encoder.flush())
                    .map_err(|err| PlotError::Close(err.to_string()))
            },

            PageEmission::AtClose => {
                let frames = self.frames.drain(..).collect();
                self.write_page(PendingPage { description: page, frames: frames })
                    .map_err(|err| PlotError::Close(err.to_string()))
            },

            PageEmission::AtDelete => {
                let frames = self.frames.drain(..).collect();
                self.retained.push(PendingPage { description: page, frames: frames });

                Ok(())
            }
        }
    }

    ///
    /// Sends a finished page to the encoder, unless the format has no room for it
    ///
    fn write_page(&mut self, page: PendingPage) -> io::Result<()> {
        if let Some(limit) = self.plotter_type.page_limit() {
            if self.pages_written >= limit {
                warn!("{}: only {} page(s) can be written; dropping page {}", self.plotter_type, limit, page.description.number);
                return Ok(());
            }
        }

        self.encoder.begin_page(&page.description)?;

        for (idx, frame) in page.frames.iter().enumerate() {
            if idx > 0 {
                self.encoder.end_frame()?;
            }

            for draw in frame.iter() {
                trace!("{}: {:?}", self.plotter_type, draw);
                self.encoder.draw(draw)?;
            }
        }

        self.encoder.end_page()?;
        self.encoder.flush()?;

        self.pages_written += 1;
        Ok(())
    }

    ///
    /// Pushes drawing on real-time devices to the display
    ///
    pub fn flush(&mut self) -> Result<(), PlotError> {
        if !self.plotter_type.is_realtime() {
            return Ok(());
        }

        if let Some(err) = self.pending_error.take() {
            return Err(PlotError::Flush(err.to_string()));
        }

        self.encoder.flush().map_err(|err| PlotError::Flush(err.to_string()))
    }

    ///
    /// Writes any retained pages and releases the output
    ///
    pub fn release(&mut self) -> Result<(), PlotError> {
        if !self.acquired {
            return Ok(());
        }

        let retained = self.retained.drain(..).collect::<Vec<_>>();
        let mut result = Ok(());

        for page in retained {
            if let Err(err) = self.write_page(page) {
                result = Err(PlotError::Close(err.to_string()));
                break;
            }
        }

        if self.options.vanish_on_delete {
            self.surface = vec![];
        }

        self.acquired = false;
        let released = self.encoder.release().map_err(|err| PlotError::Close(err.to_string()));

        result.and(released)
    }

    ///
    /// The drawing that is currently visible: the surface of a real-time device or the current frame of a buffered page
    ///
    pub fn visible_drawing(&self) -> Vec<Draw> {
        if self.plotter_type.is_realtime() {
            self.surface.clone()
        } else {
            self.frames.last().cloned().unwrap_or_else(|| vec![])
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::recording::*;

    fn page(number: u32) -> PageDescription {
        PageDescription { number: number, size: (100.0, 100.0), background: Color::white() }
    }

    fn backend(plotter_type: PlotterType, options: BackendOptions) -> (Backend, Recording) {
        let encoder     = RecordingEncoder::new();
        let recording   = encoder.recording();

        (Backend::new(plotter_type, Box::new(encoder), options), recording)
    }

    #[test]
    fn svg_writes_page_at_close() {
        let (mut backend, recording) = backend(PlotterType::Svg, BackendOptions::default());

        backend.open(page(1)).unwrap();
        backend.draw(vec![Draw::NewPath, Draw::Stroke]);
        assert!(recording.pages().len() == 0);

        backend.close().unwrap();
        assert!(recording.pages().len() == 1);
        assert!(recording.pages()[0].path_count() == 1);
    }

    #[test]
    fn single_page_formats_drop_later_pages() {
        let (mut backend, recording) = backend(PlotterType::Png, BackendOptions::default());

        for number in 1..=3 {
            backend.open(page(number)).unwrap();
            backend.draw(vec![Draw::NewPath]);
            backend.close().unwrap();
        }

        assert!(recording.pages().len() == 1);
        assert!(recording.pages()[0].description.number == 1);
    }

    #[test]
    fn postscript_writes_at_release() {
        let (mut backend, recording) = backend(PlotterType::Ps, BackendOptions::default());

        backend.open(page(1)).unwrap();
        backend.close().unwrap();
        backend.open(page(2)).unwrap();
        backend.close().unwrap();
        assert!(recording.pages().len() == 0);

        backend.release().unwrap();
        assert!(recording.pages().len() == 2);
        assert!(recording.is_released());
    }

    #[test]
    fn gif_animation_frames() {
        let options                     = BackendOptions { gif_animation: true, ..BackendOptions::default() };
        let (mut backend, recording)    = backend(PlotterType::Gif, options);

        backend.open(page(1)).unwrap();
        backend.erase(Color::white());
        backend.draw(vec![Draw::NewPath]);
        backend.erase(Color::white());
        backend.draw(vec![Draw::NewPath]);
        backend.erase(Color::white());
        backend.draw(vec![Draw::NewPath]);
        backend.close().unwrap();

        assert!(recording.pages()[0].frames.len() == 3);
    }

    #[test]
    fn buffered_erase_keeps_last_frame_only() {
        let (mut backend, recording) = backend(PlotterType::Pnm, BackendOptions::default());

        backend.open(page(1)).unwrap();
        backend.draw(vec![Draw::NewPath, Draw::Stroke]);
        backend.erase(Color::black());
        backend.draw(vec![Draw::Point(1.0, 1.0)]);
        backend.close().unwrap();

        let pages = recording.pages();
        assert!(pages[0].frames == vec![vec![Draw::ClearCanvas(Color::black()), Draw::Point(1.0, 1.0)]]);
    }

    #[test]
    fn drawable_needs_a_drawable() {
        let (mut backend, _recording) = backend(PlotterType::XDrawable, BackendOptions::default());

        match backend.open(page(1)) {
            Err(PlotError::Open(_)) => { },
            _                       => panic!("Expected an open error")
        }
    }

    #[test]
    fn double_buffering_shows_drawing_on_erase() {
        let options = BackendOptions { double_buffer: true, drawable: Some("1".to_string()), ..BackendOptions::default() };
        let (mut backend, _recording) = backend(PlotterType::XDrawable, options);

        backend.open(page(1)).unwrap();
        backend.draw(vec![Draw::NewPath]);
        assert!(backend.visible_drawing().is_empty());

        backend.erase(Color::white());
        assert!(backend.visible_drawing() == vec![Draw::NewPath]);
    }

    #[test]
    fn double_buffered_drawable_keeps_earlier_pages() {
        let options = BackendOptions { double_buffer: true, drawable: Some("1".to_string()), ..BackendOptions::default() };
        let (mut backend, _recording) = backend(PlotterType::XDrawable, options);

        backend.open(page(1)).unwrap();
        backend.draw(vec![Draw::NewPath, Draw::Stroke]);
        backend.close().unwrap();

        backend.open(page(2)).unwrap();
        backend.draw(vec![Draw::NewPath, Draw::Stroke]);
        backend.close().unwrap();

        assert!(backend.visible_drawing() == vec![Draw::NewPath, Draw::Stroke, Draw::NewPath, Draw::Stroke]);

        backend.open(page(3)).unwrap();
        backend.erase(Color::white());
        backend.close().unwrap();

        assert!(backend.visible_drawing().is_empty());
    }
}
