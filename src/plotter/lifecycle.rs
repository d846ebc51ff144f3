use super::device::*;
use super::diagnostics::*;
use crate::path::*;
use crate::fonts::*;
use crate::error::*;
use crate::context::*;
use crate::backend::*;
use crate::capability::*;
use crate::parameters::*;

use flo_plot_canvas::*;

///
/// Where a plotter is in its lifecycle
///
/// A plotter starts out unopened, moves between open and closed once for each page, and ends up deleted.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PlotterState {
    Unopened,
    Open,
    Closed,
    Deleted
}

///
/// A device-independent plotter
///
/// Every plotter draws through the same API: the type it was created with decides how the
/// drawing reaches its output. Drawing and attribute operations are only valid while the plotter
/// is open; they return `PlotError::NotOpen` otherwise.
///
pub struct Plotter {
    pub (super) plotter_type:   PlotterType,

    /// The parameter values this plotter was created with
    pub (super) parameters:     ParameterRegistry,

    pub (super) capabilities:   CapabilityTable,
    pub (super) geometry:       DisplayGeometry,
    pub (super) state:          PlotterState,
    pub (super) contexts:       ContextStack,
    pub (super) paths:          PathBuilder,
    pub (super) device:         Device,
    pub (super) diagnostics:    Diagnostics,
    pub (super) font_metrics:   Box<dyn FontMetrics+Send>,

    /// Number of pages that have been opened
    pub (super) page_count:     u32
}

impl Plotter {
    pub fn plotter_type(&self) -> PlotterType {
        self.plotter_type
    }

    pub fn state(&self) -> PlotterState {
        self.state
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn parameters(&self) -> &ParameterRegistry {
        &self.parameters
    }

    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    ///
    /// Fails unless the plotter is open
    ///
    pub (super) fn check_open(&self) -> Result<(), PlotError> {
        match self.state {
            PlotterState::Open      => Ok(()),
            PlotterState::Deleted   => Err(PlotError::UseAfterDelete),
            _                       => Err(PlotError::NotOpen)
        }
    }

    ///
    /// Runs an action on the path builder, the current graphics context and the device together
    ///
    pub (super) fn with_path<T, Action>(&mut self, action: Action) -> Result<T, PlotError>
    where Action: FnOnce(&PathBuilder, &mut GraphicsContext, &mut Device) -> T {
        self.check_open()?;

        let context = self.contexts.current_mut()?;
        Ok(action(&self.paths, context, &mut self.device))
    }

    ///
    /// Changes the current graphics context, ending the path under construction first if `ends_path` is set
    ///
    pub (super) fn update_context<T, Update>(&mut self, ends_path: bool, update: Update) -> Result<T, PlotError>
    where Update: FnOnce(&mut GraphicsContext) -> T {
        self.with_path(move |paths, context, device| {
            if ends_path {
                paths.end_path(context, device);
            }

            update(context)
        })
    }

    ///
    /// The current graphics context
    ///
    pub fn graphics_context(&self) -> Result<&GraphicsContext, PlotError> {
        self.check_open()?;
        self.contexts.current()
    }

    ///
    /// The graphics cursor, in user coordinates
    ///
    pub fn cursor(&self) -> Result<(f64, f64), PlotError> {
        Ok(self.graphics_context()?.cursor)
    }

    ///
    /// Number of graphics contexts on the stack (1 while open with no saved states, 0 while closed)
    ///
    pub fn context_depth(&self) -> usize {
        self.contexts.depth()
    }

    ///
    /// What is currently visible on the device: the surface of a real-time plotter or the current frame of a buffered page
    ///
    pub fn visible_drawing(&self) -> Vec<Draw> {
        self.device.backend.visible_drawing()
    }

    ///
    /// Asks whether this plotter supports a capability
    ///
    /// This works whether or not the plotter is open, but not after it has been deleted.
    ///
    pub fn havecap(&self, name: &str) -> Result<Capability, PlotError> {
        if self.state == PlotterState::Deleted {
            return Err(PlotError::UseAfterDelete);
        }

        Ok(self.capabilities.query(name))
    }

    ///
    /// The colour that a new page is cleared to
    ///
    fn initial_background(&self) -> Color {
        if self.capabilities.allows("SETTABLE_BACKGROUND") {
            self.parameters.color("BG_COLOR").unwrap_or(Color::white())
        } else {
            Color::white()
        }
    }

    ///
    /// The graphics context a new page starts with: default attributes and a unit square user space
    ///
    fn base_context(&self, background: Color) -> GraphicsContext {
        let defaults = DeviceDefaults {
            line_width:     self.geometry.default_line_width(),
            font_size:      self.geometry.default_font_size(),
            font_name:      self.plotter_type.default_font().to_string(),
            min_dash_unit:  self.geometry.min_dash_unit()
        };

        let mut context     = GraphicsContext::new(defaults);
        context.transform   = self.geometry.user_transform((0.0, 0.0), (1.0, 0.0), (0.0, 1.0))
            .unwrap_or(self.geometry.ndc_to_device);
        context.background  = background;

        context
    }

    ///
    /// Starts a new page, resetting every attribute to its default
    ///
    pub fn open(&mut self) -> Result<(), PlotError> {
        match self.state {
            PlotterState::Deleted   => return Err(PlotError::UseAfterDelete),
            PlotterState::Open      => return Err(PlotError::Open("the plotter is already open".to_string())),
            _                       => { }
        }

        let background  = self.initial_background();
        let page        = PageDescription {
            number:     self.page_count + 1,
            size:       self.geometry.device_size,
            background: background
        };

        self.device.backend.open(page)?;

        self.page_count += 1;
        self.device.reset_style();
        self.contexts.reset(self.base_context(background));
        self.state = PlotterState::Open;

        debug!("{}: opened page {}", self.plotter_type, self.page_count);
        Ok(())
    }

    ///
    /// Clears the page, or starts the next frame of an animation
    ///
    pub fn erase(&mut self) -> Result<(), PlotError> {
        let background = self.update_context(true, |context| context.background)?;

        self.device.backend.erase(background);
        self.device.reset_style();

        Ok(())
    }

    ///
    /// Finishes the current page, ending any paths and discarding every graphics context
    ///
    pub fn close(&mut self) -> Result<(), PlotError> {
        self.check_open()?;

        for mut context in self.contexts.drain() {
            self.paths.end_path(&mut context, &mut self.device);
        }

        self.state = PlotterState::Closed;
        debug!("{}: closed page {}", self.plotter_type, self.page_count);

        self.device.backend.close()
    }

    ///
    /// Makes sure everything drawn so far has reached a real-time device
    ///
    pub fn flush(&mut self) -> Result<(), PlotError> {
        self.check_open()?;
        self.device.backend.flush()
    }

    ///
    /// Closes the plotter if it's open and releases its output
    ///
    /// A plotter can only be deleted once.
    ///
    pub fn delete(&mut self) -> Result<(), PlotError> {
        if self.state == PlotterState::Deleted {
            return Err(PlotError::UseAfterDelete);
        }

        let closed      = if self.state == PlotterState::Open { self.close() } else { Ok(()) };
        let released    = self.device.backend.release();

        self.state = PlotterState::Deleted;
        debug!("{}: deleted after {} page(s)", self.plotter_type, self.page_count);

        closed.and(released)
    }

    ///
    /// Saves the graphics context
    ///
    /// The new context has the same attributes as the old one. A path under construction stays
    /// with the saved context and can be continued after `restorestate`.
    ///
    pub fn savestate(&mut self) -> Result<(), PlotError> {
        self.check_open()?;

        // Streamed output can't interleave the segments of two paths
        if self.plotter_type.streams_segments() {
            self.endpath()?;
        }

        self.contexts.push()
    }

    ///
    /// Ends the path of the current graphics context and goes back to the one saved before it
    ///
    pub fn restorestate(&mut self) -> Result<(), PlotError> {
        self.check_open()?;

        let mut popped = self.contexts.pop()?;
        self.paths.end_path(&mut popped, &mut self.device);

        Ok(())
    }
}

impl Drop for Plotter {
    fn drop(&mut self) {
        if self.state != PlotterState::Deleted {
            if let Err(err) = self.delete() {
                warn!("{}: error while dropping plotter: {}", self.plotter_type, err);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::*;

    fn plotter(plotter_type: &str, recording: &Recording) -> Plotter {
        PlotterBuilder::new(plotter_type)
            .output(OutputTarget::Recording(recording.clone()))
            .parameters(ParameterRegistry::new())
            .build()
            .unwrap()
    }

    #[test]
    fn drawing_needs_open_plotter() {
        let mut plotter = plotter("svg", &Recording::new());

        assert!(match plotter.line(Coords::Absolute, 0.0, 0.0, 1.0, 1.0) { Err(PlotError::NotOpen) => true, _ => false });
        assert!(match plotter.pencolor("red") { Err(PlotError::NotOpen) => true, _ => false });
        assert!(match plotter.close() { Err(PlotError::NotOpen) => true, _ => false });
        assert!(plotter.state() == PlotterState::Unopened);
    }

    #[test]
    fn cannot_open_twice() {
        let mut plotter = plotter("svg", &Recording::new());

        plotter.open().unwrap();
        assert!(match plotter.open() { Err(PlotError::Open(_)) => true, _ => false });
    }

    #[test]
    fn open_resets_attributes() {
        let mut plotter = plotter("ps", &Recording::new());

        plotter.open().unwrap();
        plotter.pencolor("red").unwrap();
        plotter.linewidth(3.0).unwrap();
        plotter.close().unwrap();

        plotter.open().unwrap();
        let context = plotter.graphics_context().unwrap();
        assert!(context.pen_color == Color::black());
        assert!(context.line_width.is_none());
        assert!(plotter.page_count() == 2);
    }

    #[test]
    fn close_discards_every_context() {
        let mut plotter = plotter("svg", &Recording::new());

        plotter.open().unwrap();
        plotter.savestate().unwrap();
        plotter.savestate().unwrap();
        assert!(plotter.context_depth() == 3);

        plotter.close().unwrap();
        assert!(plotter.context_depth() == 0);
        assert!(plotter.state() == PlotterState::Closed);
    }

    #[test]
    fn close_draws_unfinished_paths() {
        let recording   = Recording::new();
        let mut plotter = plotter("svg", &recording);

        plotter.open().unwrap();
        plotter.line(Coords::Absolute, 0.0, 0.0, 1.0, 0.0).unwrap();
        plotter.savestate().unwrap();
        plotter.line(Coords::Absolute, 0.0, 1.0, 1.0, 1.0).unwrap();
        plotter.close().unwrap();

        assert!(recording.pages()[0].path_count() == 2);
    }

    #[test]
    fn restore_state_brings_back_attributes() {
        let mut plotter = plotter("svg", &Recording::new());

        plotter.open().unwrap();
        plotter.pencolor("blue").unwrap();
        let before = plotter.graphics_context().unwrap().clone();

        plotter.savestate().unwrap();
        plotter.pencolor("red").unwrap();
        plotter.rotate(30.0).unwrap();
        plotter.restorestate().unwrap();

        assert!(plotter.graphics_context().unwrap() == &before);
        assert!(match plotter.restorestate() { Err(PlotError::StackUnderflow) => true, _ => false });
    }

    #[test]
    fn delete_only_once() {
        let recording   = Recording::new();
        let mut plotter = plotter("svg", &recording);

        plotter.open().unwrap();
        plotter.delete().unwrap();

        assert!(recording.is_released());
        assert!(recording.pages().len() == 1);
        assert!(match plotter.delete() { Err(PlotError::UseAfterDelete) => true, _ => false });
        assert!(match plotter.open() { Err(PlotError::UseAfterDelete) => true, _ => false });
        assert!(match plotter.point(Coords::Absolute, 0.0, 0.0) { Err(PlotError::UseAfterDelete) => true, _ => false });
    }

    #[test]
    fn dropping_deletes() {
        let recording = Recording::new();

        {
            let mut plotter = plotter("ps", &recording);
            plotter.open().unwrap();
        }

        assert!(recording.is_released());
        assert!(recording.pages().len() == 1);
    }

    #[test]
    fn havecap_works_when_closed() {
        let mut plotter = plotter("tek", &Recording::new());

        assert!(plotter.havecap("REAL_TIME").unwrap() == Capability::Yes);
        assert!(plotter.havecap("SOLID_FILL").unwrap() == Capability::No);
        assert!(plotter.havecap("NOT_A_CAPABILITY").unwrap() == Capability::No);

        plotter.delete().unwrap();
        assert!(match plotter.havecap("REAL_TIME") { Err(PlotError::UseAfterDelete) => true, _ => false });
    }

    #[test]
    fn background_comes_from_parameters() {
        let recording       = Recording::new();
        let mut parameters  = ParameterRegistry::new();
        parameters.set("BG_COLOR", "black").unwrap();

        let mut plotter = PlotterBuilder::new("svg")
            .output(OutputTarget::Recording(recording.clone()))
            .parameters(parameters)
            .build()
            .unwrap();

        plotter.open().unwrap();
        plotter.erase().unwrap();
        assert!(plotter.visible_drawing() == vec![Draw::ClearCanvas(Color::black())]);

        plotter.bgcolor("red").unwrap();
        plotter.erase().unwrap();
        assert!(plotter.visible_drawing() == vec![Draw::ClearCanvas(Color::from_rgb8(255, 0, 0))]);
    }

    #[test]
    fn flush_reaches_realtime_devices() {
        let recording   = Recording::new();
        let mut plotter = plotter("meta", &recording);

        plotter.open().unwrap();
        plotter.flush().unwrap();

        assert!(recording.flush_count() == 1);
    }
}
