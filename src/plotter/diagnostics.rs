use crate::backend::PlotterType;

use std::io::Write;

///
/// Reports problems that don't stop a plotter from working
///
/// Messages always go to the log, and are also written to the error target if the plotter was given one.
///
pub (crate) struct Diagnostics {
    plotter_type:   PlotterType,
    target:         Option<Box<dyn Write+Send>>
}

impl Diagnostics {
    pub fn new(plotter_type: PlotterType, target: Option<Box<dyn Write+Send>>) -> Diagnostics {
        Diagnostics { plotter_type, target }
    }

    ///
    /// Reports a graceful degradation or an ignored request
    ///
    pub fn warn(&mut self, message: &str) {
        warn!("{}: {}", self.plotter_type, message);

        if let Some(target) = self.target.as_mut() {
            // The error target is best-effort: a failure to write a warning isn't reported anywhere
            let _ = writeln!(target, "flo_plot ({}): {}", self.plotter_type, message);
            let _ = target.flush();
        }
    }
}
