use super::encoder::*;
use super::recording::*;
use super::stream_encoder::*;

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

///
/// Where a plotter sends its output
///
pub enum OutputTarget {
    /// Standard output
    Stdout,

    /// A file, created when the plotter is first opened
    File(PathBuf),

    /// Any writable stream
    Writer(Box<dyn Write+Send>),

    /// An in-memory recording
    Recording(Recording),

    /// Output is thrown away
    Discard
}

impl OutputTarget {
    ///
    /// Creates an output target that writes to a stream
    ///
    pub fn writer<W: 'static+Write+Send>(writer: W) -> OutputTarget {
        OutputTarget::Writer(Box::new(writer))
    }

    ///
    /// Creates the encoder that writes to this target
    ///
    pub fn into_encoder(self, portable: bool) -> Box<dyn Encoder+Send> {
        match self {
            OutputTarget::Stdout                => Box::new(StreamEncoder::stdout(portable)),
            OutputTarget::File(path)            => Box::new(StreamEncoder::file(path, portable)),
            OutputTarget::Writer(writer)        => Box::new(StreamEncoder::boxed_writer(writer, portable)),
            OutputTarget::Recording(recording)  => Box::new(recording.encoder()),
            OutputTarget::Discard               => Box::new(DiscardEncoder)
        }
    }
}

impl fmt::Debug for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputTarget::Stdout                => write!(f, "Stdout"),
            OutputTarget::File(path)            => write!(f, "File({})", path.display()),
            OutputTarget::Writer(_)             => write!(f, "Writer"),
            OutputTarget::Recording(_)          => write!(f, "Recording"),
            OutputTarget::Discard               => write!(f, "Discard")
        }
    }
}
