use crate::error::*;

use flo_plot_canvas::*;

use std::io;

///
/// Serializes the output of a backend
///
/// The backend decides when each of these is called. Encoders only need to turn the calls into
/// output: `acquire` happens once, before the first page, and `release` once when the plotter
/// is deleted.
///
pub trait Encoder {
    ///
    /// Opens the output resource
    ///
    fn acquire(&mut self) -> io::Result<()> { Ok(()) }

    fn begin_page(&mut self, page: &PageDescription) -> io::Result<()>;

    fn draw(&mut self, draw: &Draw) -> io::Result<()>;

    ///
    /// Finishes an image within a page that holds several (an animation frame)
    ///
    fn end_frame(&mut self) -> io::Result<()>;

    fn end_page(&mut self) -> io::Result<()>;

    ///
    /// Pushes any buffered output to the device
    ///
    fn flush(&mut self) -> io::Result<()> { Ok(()) }

    ///
    /// Closes the output resource
    ///
    fn release(&mut self) -> io::Result<()> { Ok(()) }
}

///
/// An encoder that throws its output away
///
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct DiscardEncoder;

impl Encoder for DiscardEncoder {
    fn begin_page(&mut self, _page: &PageDescription) -> io::Result<()> { Ok(()) }
    fn draw(&mut self, _draw: &Draw) -> io::Result<()> { Ok(()) }
    fn end_frame(&mut self) -> io::Result<()> { Ok(()) }
    fn end_page(&mut self) -> io::Result<()> { Ok(()) }
}

///
/// Sends a sequence of metafile events to an encoder
///
pub fn replay<Events, Target>(events: Events, encoder: &mut Target) -> io::Result<()>
where   Events: IntoIterator<Item=MetafileEvent>,
        Target: ?Sized+Encoder {
    for event in events {
        match event {
            MetafileEvent::BeginPage(page)  => encoder.begin_page(&page)?,
            MetafileEvent::Draw(draw)       => encoder.draw(&draw)?,
            MetafileEvent::EndFrame         => encoder.end_frame()?,
            MetafileEvent::EndPage          => encoder.end_page()?
        }
    }

    encoder.flush()
}

///
/// Reads a metafile written by a streamed meta plotter and replays it into another encoder
///
/// Both the compact encoding and the portable (one JSON event per line) form are understood.
///
pub fn replay_metafile<Target: ?Sized+Encoder>(metafile: &str, encoder: &mut Target) -> Result<(), MetafileError> {
    let events = read_metafile(metafile)?;
    replay(events, encoder)?;

    Ok(())
}

///
/// Decodes the events in a metafile
///
pub fn read_metafile(metafile: &str) -> Result<Vec<MetafileEvent>, MetafileError> {
    let is_portable = metafile.trim_start().starts_with(|c: char| c == '{' || c == '"');

    if is_portable {
        metafile.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<MetafileEvent>(line).map_err(|err| MetafileError::Portable(err.to_string())))
            .collect()
    } else {
        Ok(decode_events(metafile)?)
    }
}
