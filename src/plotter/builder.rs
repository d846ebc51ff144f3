use super::lifecycle::*;
use super::device::*;
use super::diagnostics::*;
use crate::path::*;
use crate::fonts::*;
use crate::error::*;
use crate::context::*;
use crate::backend::*;
use crate::capability::*;
use crate::parameters::*;

use std::io::{Read, Write};

///
/// Collects the settings for a new plotter
///
/// Parameters come from the process-wide registry at the time `build()` is called unless a
/// snapshot is supplied with `parameters()`.
///
pub struct PlotterBuilder {
    plotter_type:   String,
    output:         OutputTarget,
    input:          Option<Box<dyn Read+Send>>,
    errors:         Option<Box<dyn Write+Send>>,
    parameters:     Option<ParameterRegistry>,
    font_metrics:   Option<Box<dyn FontMetrics+Send>>
}

impl PlotterBuilder {
    ///
    /// Starts building a plotter of the named type ("X", "png", "ps", "meta", ...), writing to stdout
    ///
    pub fn new(plotter_type: &str) -> PlotterBuilder {
        PlotterBuilder {
            plotter_type:   plotter_type.to_string(),
            output:         OutputTarget::Stdout,
            input:          None,
            errors:         None,
            parameters:     None,
            font_metrics:   None
        }
    }

    ///
    /// Where the plotter writes its output (window plotters draw on their display instead, unless this is a recording)
    ///
    pub fn output(mut self, output: OutputTarget) -> PlotterBuilder {
        self.output = output;
        self
    }

    ///
    /// An input stream for the plotter: plotters never read from it
    ///
    pub fn input<R: 'static+Read+Send>(mut self, input: R) -> PlotterBuilder {
        self.input = Some(Box::new(input));
        self
    }

    ///
    /// A stream that receives a line of text for each warning
    ///
    pub fn errors<W: 'static+Write+Send>(mut self, errors: W) -> PlotterBuilder {
        self.errors = Some(Box::new(errors));
        self
    }

    ///
    /// Uses a particular set of parameters instead of a snapshot of the global ones
    ///
    pub fn parameters(mut self, parameters: ParameterRegistry) -> PlotterBuilder {
        self.parameters = Some(parameters);
        self
    }

    ///
    /// Sets how label widths are measured
    ///
    pub fn font_metrics<Metrics: 'static+FontMetrics+Send>(mut self, metrics: Metrics) -> PlotterBuilder {
        self.font_metrics = Some(Box::new(metrics));
        self
    }

    ///
    /// Creates the encoder that a plotter of a particular type writes to
    ///
    fn encoder(output: OutputTarget, plotter_type: PlotterType, parameters: &ParameterRegistry) -> Box<dyn Encoder+Send> {
        match (plotter_type, output) {
            (PlotterType::X, OutputTarget::Recording(recording))            |
            (PlotterType::XDrawable, OutputTarget::Recording(recording))    => Box::new(recording.encoder()),
            (PlotterType::X, _) | (PlotterType::XDrawable, _)               => Box::new(RecordingEncoder::new()),

            (plotter_type, output) => {
                let portable = plotter_type == PlotterType::Meta && parameters.flag("META_PORTABLE");
                output.into_encoder(portable)
            }
        }
    }

    ///
    /// Creates the plotter
    ///
    pub fn build(self) -> Result<Plotter, PlotError> {
        let plotter_type: PlotterType   = self.plotter_type.parse()?;
        let parameters                  = self.parameters.unwrap_or_else(parameter_snapshot);
        let capabilities                = CapabilityTable::for_plotter(plotter_type, &parameters);
        let geometry                    = DisplayGeometry::for_plotter(plotter_type, &parameters);
        let is_window                   = plotter_type == PlotterType::X || plotter_type == PlotterType::XDrawable;

        if self.input.is_some() {
            debug!("{}: ignoring input stream", plotter_type);
        }

        let options = BackendOptions {
            double_buffer:      is_window && parameters.flag("USE_DOUBLE_BUFFERING"),
            gif_animation:      parameters.flag("GIF_ANIMATION"),
            vanish_on_delete:   plotter_type == PlotterType::X && parameters.flag("VANISH_ON_DELETE"),
            display:            parameters.text("DISPLAY"),
            drawable:           parameters.text("XDRAWABLE_DRAWABLE1").or_else(|| parameters.text("XDRAWABLE_DRAWABLE2"))
        };

        let encoder     = Self::encoder(self.output, plotter_type, &parameters);
        let backend     = Backend::new(plotter_type, encoder, options);
        let lowering    = Lowering { support: plotter_type.segment_support(&parameters), max_chord: geometry.flattening_chord() };
        let device      = Device::new(backend, lowering, plotter_type.streams_segments(), &capabilities);

        let max_points  = if plotter_type.splits_long_paths() {
            parameters.integer("MAX_LINE_LENGTH").map(|max_points| max_points.max(2) as usize)
        } else {
            None
        };

        debug!("{}: created plotter", plotter_type);

        Ok(Plotter {
            plotter_type:   plotter_type,
            parameters:     parameters,
            capabilities:   capabilities,
            geometry:       geometry,
            state:          PlotterState::Unopened,
            contexts:       ContextStack::new(),
            paths:          PathBuilder::new(max_points),
            device:         device,
            diagnostics:    Diagnostics::new(plotter_type, self.errors),
            font_metrics:   self.font_metrics.unwrap_or_else(|| Box::new(FixedPitchMetrics::default())),
            page_count:     0
        })
    }
}

impl Plotter {
    ///
    /// Creates a plotter of the named type that writes to an output target, using the global parameters
    ///
    pub fn new(plotter_type: &str, output: OutputTarget) -> Result<Plotter, PlotError> {
        PlotterBuilder::new(plotter_type)
            .output(output)
            .build()
    }
}
