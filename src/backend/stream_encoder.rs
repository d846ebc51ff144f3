use super::encoder::*;

use flo_plot_canvas::*;

use std::io;
use std::io::{Write, BufWriter};
use std::fs::File;
use std::path::PathBuf;

///
/// Where a stream encoder writes to
///
enum StreamTarget {
    Stdout,

    /// A file, which is created when the encoder is acquired
    File(PathBuf, Option<BufWriter<File>>),

    Writer(Box<dyn Write+Send>)
}

///
/// Writes the events of a plotter to a byte stream, one event per line
///
/// Events are written in the compact canvas encoding, or as JSON when the stream is portable.
///
pub struct StreamEncoder {
    target:     StreamTarget,
    portable:   bool,
    line:       String
}

impl StreamEncoder {
    ///
    /// Creates an encoder that writes to standard output
    ///
    pub fn stdout(portable: bool) -> StreamEncoder {
        StreamEncoder::with_target(StreamTarget::Stdout, portable)
    }

    ///
    /// Creates an encoder that writes to a file, which is created when the plotter is first opened
    ///
    pub fn file<P: Into<PathBuf>>(path: P, portable: bool) -> StreamEncoder {
        StreamEncoder::with_target(StreamTarget::File(path.into(), None), portable)
    }

    ///
    /// Creates an encoder that writes to an arbitrary stream
    ///
    pub fn writer<W: 'static+Write+Send>(writer: W, portable: bool) -> StreamEncoder {
        StreamEncoder::with_target(StreamTarget::Writer(Box::new(writer)), portable)
    }

    pub (crate) fn boxed_writer(writer: Box<dyn Write+Send>, portable: bool) -> StreamEncoder {
        StreamEncoder::with_target(StreamTarget::Writer(writer), portable)
    }

    fn with_target(target: StreamTarget, portable: bool) -> StreamEncoder {
        StreamEncoder {
            target:     target,
            portable:   portable,
            line:       String::new()
        }
    }

    ///
    /// Writes the pending line to the target
    ///
    fn write_line(&mut self) -> io::Result<()> {
        self.line.push('\n');

        let result = match &mut self.target {
            StreamTarget::Stdout                => io::stdout().write_all(self.line.as_bytes()),
            StreamTarget::File(_, Some(file))   => file.write_all(self.line.as_bytes()),
            StreamTarget::File(path, None)      => Err(io::Error::new(io::ErrorKind::NotConnected, format!("{} has not been created", path.display()))),
            StreamTarget::Writer(writer)        => writer.write_all(self.line.as_bytes())
        };

        self.line.clear();
        result
    }

    fn write_event(&mut self, event: &MetafileEvent) -> io::Result<()> {
        if self.portable {
            self.line = serde_json::to_string(event).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        } else {
            event.encode_canvas(&mut self.line);
        }

        self.write_line()
    }
}

impl Encoder for StreamEncoder {
    fn acquire(&mut self) -> io::Result<()> {
        if let StreamTarget::File(path, file) = &mut self.target {
            if file.is_none() {
                debug!("Creating plot output file {}", path.display());
                *file = Some(BufWriter::new(File::create(path.as_path())?));
            }
        }

        Ok(())
    }

    fn begin_page(&mut self, page: &PageDescription) -> io::Result<()> {
        self.write_event(&MetafileEvent::BeginPage(*page))
    }

    fn draw(&mut self, draw: &Draw) -> io::Result<()> {
        trace!("Writing {:?}", draw);
        self.write_event(&MetafileEvent::Draw(draw.clone()))
    }

    fn end_frame(&mut self) -> io::Result<()> {
        self.write_event(&MetafileEvent::EndFrame)
    }

    fn end_page(&mut self) -> io::Result<()> {
        self.write_event(&MetafileEvent::EndPage)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.target {
            StreamTarget::Stdout                => io::stdout().flush(),
            StreamTarget::File(_, Some(file))   => file.flush(),
            StreamTarget::File(_, None)         => Ok(()),
            StreamTarget::Writer(writer)        => writer.flush()
        }
    }

    fn release(&mut self) -> io::Result<()> {
        self.flush()?;

        if let StreamTarget::File(_, file) = &mut self.target {
            *file = None;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::sync::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.0.lock().unwrap().write(buf) }
        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    impl SharedBuffer {
        fn text(&self) -> String { String::from_utf8(self.0.lock().unwrap().clone()).unwrap() }
    }

    fn write_page(encoder: &mut StreamEncoder) {
        let page = PageDescription { number: 1, size: (1.0, 1.0), background: Color::white() };

        encoder.acquire().unwrap();
        encoder.begin_page(&page).unwrap();
        encoder.draw(&Draw::Move(20.0, 20.0)).unwrap();
        encoder.end_page().unwrap();
        encoder.release().unwrap();
    }

    #[test]
    fn compact_encoding_is_one_event_per_line() {
        let buffer      = SharedBuffer::default();
        let mut encoder = StreamEncoder::writer(buffer.clone(), false);

        write_page(&mut encoder);

        let text        = buffer.text();
        let lines       = text.lines().collect::<Vec<_>>();

        assert!(lines.len() == 3);
        assert!(lines[1] == "mAAAAAAAA0AEAAAAAAAA0AE");
        assert!(lines[2] == "Pe");
        assert!(read_metafile(&text).unwrap().len() == 3);
    }

    #[test]
    fn portable_encoding_is_json() {
        let buffer      = SharedBuffer::default();
        let mut encoder = StreamEncoder::writer(buffer.clone(), true);

        write_page(&mut encoder);

        let text        = buffer.text();
        let events      = read_metafile(&text).unwrap();

        assert!(text.lines().next().map(|line| line.starts_with('{')) == Some(true));
        assert!(events[1] == MetafileEvent::Draw(Draw::Move(20.0, 20.0)));
    }

    #[test]
    fn file_is_not_created_until_acquired() {
        let mut encoder = StreamEncoder::file("/nonexistent-directory/plot.meta", false);
        let page        = PageDescription { number: 1, size: (1.0, 1.0), background: Color::white() };

        assert!(encoder.begin_page(&page).is_err());
        assert!(encoder.acquire().is_err());
    }
}
