use flo_plot_canvas::DecoderError;

use thiserror::Error;

use std::io;

///
/// Errors returned by plotter operations
///
#[derive(Debug, Error)]
pub enum PlotError {
    /// The output could not be acquired or the first page could not be started
    #[error("could not open the plotter: {0}")]
    Open(String),

    /// The finished page could not be written
    #[error("could not close the plotter: {0}")]
    Close(String),

    /// Pending output could not be pushed to the device
    #[error("could not flush the plotter: {0}")]
    Flush(String),

    /// A drawing operation was requested while no page was open
    #[error("the plotter is not open")]
    NotOpen,

    /// restorestate() was called with only the base graphics context on the stack
    #[error("cannot restore state: only the base graphics context remains")]
    StackUnderflow,

    /// The plotter has been deleted
    #[error("the plotter has been deleted")]
    UseAfterDelete,

    /// The backend has no way to carry out the request
    #[error("{plotter_type} plotters do not support {capability}")]
    Unsupported { plotter_type: String, capability: &'static str },

    /// The plotter type name is not one of the known backends
    #[error("unknown plotter type '{0}'")]
    UnknownPlotterType(String)
}

///
/// Errors returned when setting plotter parameters
///
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParameterError {
    /// The value could not be parsed as the type the parameter needs
    #[error("invalid value '{value}' for {name}: expected {expected}")]
    InvalidValue { name: String, value: String, expected: &'static str },

    /// A serialized parameter set could not be read or written
    #[error("could not convert parameters: {0}")]
    Serialization(String)
}

///
/// Errors returned while replaying a metafile
///
#[derive(Debug, Error)]
pub enum MetafileError {
    /// The canvas encoding was malformed
    #[error("malformed metafile: {0:?}")]
    Decode(DecoderError),

    /// A portable (JSON) metafile line was malformed
    #[error("malformed portable metafile: {0}")]
    Portable(String),

    /// The target encoder failed
    #[error("could not write replayed metafile: {0}")]
    Io(#[from] io::Error)
}

impl From<DecoderError> for MetafileError {
    fn from(err: DecoderError) -> MetafileError {
        MetafileError::Decode(err)
    }
}
