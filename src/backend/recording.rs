use super::encoder::*;

use flo_plot_canvas::*;

use std::io;
use std::sync::*;

///
/// A page captured by a recording
///
#[derive(Clone, PartialEq, Debug)]
pub struct RecordedPage {
    pub description:    PageDescription,

    /// The images on this page: most pages have one, animations have one per frame
    pub frames:         Vec<Vec<Draw>>,

    /// True once the page has been ended
    pub finished:       bool
}

///
/// Everything written to a recording encoder
///
#[derive(Clone, PartialEq, Debug, Default)]
struct RecordedOutput {
    events:     Vec<MetafileEvent>,
    acquired:   bool,
    released:   bool,
    flushes:    usize
}

///
/// A shared handle to the output of a `RecordingEncoder`
///
#[derive(Clone, Debug, Default)]
pub struct Recording {
    output: Arc<Mutex<RecordedOutput>>
}

///
/// An encoder that keeps everything it's sent in memory
///
#[derive(Clone, Debug, Default)]
pub struct RecordingEncoder {
    recording: Recording
}

impl RecordedPage {
    ///
    /// Every instruction on the page, in order
    ///
    pub fn drawing(&self) -> Vec<Draw> {
        self.frames.iter().flat_map(|frame| frame.iter().cloned()).collect()
    }

    ///
    /// The number of paths drawn on the page
    ///
    pub fn path_count(&self) -> usize {
        self.frames.iter()
            .flat_map(|frame| frame.iter())
            .filter(|draw| **draw == Draw::NewPath)
            .count()
    }
}

impl Recording {
    pub fn new() -> Recording {
        Recording::default()
    }

    fn output(&self) -> MutexGuard<RecordedOutput> {
        self.output.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    ///
    /// Every event that has been recorded
    ///
    pub fn events(&self) -> Vec<MetafileEvent> {
        self.output().events.clone()
    }

    ///
    /// The recorded events, grouped into pages and frames
    ///
    pub fn pages(&self) -> Vec<RecordedPage> {
        let mut pages: Vec<RecordedPage> = vec![];

        for event in self.output().events.iter() {
            match event {
                MetafileEvent::BeginPage(description)   => pages.push(RecordedPage { description: *description, frames: vec![vec![]], finished: false }),
                MetafileEvent::Draw(draw)               => if let Some(frame) = pages.last_mut().and_then(|page| page.frames.last_mut()) { frame.push(draw.clone()) },
                MetafileEvent::EndFrame                 => if let Some(page) = pages.last_mut() { page.frames.push(vec![]) },
                MetafileEvent::EndPage                  => if let Some(page) = pages.last_mut() { page.finished = true }
            }
        }

        pages
    }

    pub fn is_acquired(&self) -> bool { self.output().acquired }
    pub fn is_released(&self) -> bool { self.output().released }
    pub fn flush_count(&self) -> usize { self.output().flushes }

    ///
    /// Creates an encoder that writes to this recording
    ///
    pub fn encoder(&self) -> RecordingEncoder {
        RecordingEncoder { recording: self.clone() }
    }
}

impl RecordingEncoder {
    pub fn new() -> RecordingEncoder {
        RecordingEncoder::default()
    }

    ///
    /// The recording this encoder writes to
    ///
    pub fn recording(&self) -> Recording {
        self.recording.clone()
    }

    fn record(&mut self, event: MetafileEvent) -> io::Result<()> {
        self.recording.output().events.push(event);
        Ok(())
    }
}

impl Encoder for RecordingEncoder {
    fn acquire(&mut self) -> io::Result<()> {
        self.recording.output().acquired = true;
        Ok(())
    }

    fn begin_page(&mut self, page: &PageDescription) -> io::Result<()> {
        self.record(MetafileEvent::BeginPage(*page))
    }

    fn draw(&mut self, draw: &Draw) -> io::Result<()> {
        self.record(MetafileEvent::Draw(draw.clone()))
    }

    fn end_frame(&mut self) -> io::Result<()> {
        self.record(MetafileEvent::EndFrame)
    }

    fn end_page(&mut self) -> io::Result<()> {
        self.record(MetafileEvent::EndPage)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.recording.output().flushes += 1;
        Ok(())
    }

    fn release(&mut self) -> io::Result<()> {
        self.recording.output().released = true;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn events_group_into_pages_and_frames() {
        let mut encoder = RecordingEncoder::new();
        let recording   = encoder.recording();
        let page        = PageDescription { number: 1, size: (10.0, 10.0), background: Color::white() };

        encoder.begin_page(&page).unwrap();
        encoder.draw(&Draw::NewPath).unwrap();
        encoder.end_frame().unwrap();
        encoder.draw(&Draw::NewPath).unwrap();
        encoder.draw(&Draw::Stroke).unwrap();
        encoder.end_page().unwrap();

        let pages = recording.pages();
        assert!(pages.len() == 1);
        assert!(pages[0].frames.len() == 2);
        assert!(pages[0].frames[1] == vec![Draw::NewPath, Draw::Stroke]);
        assert!(pages[0].path_count() == 2);
        assert!(pages[0].finished);
    }

    #[test]
    fn replay_copies_events() {
        let source      = RecordingEncoder::new().recording();
        let mut encoder = source.encoder();
        let page        = PageDescription { number: 1, size: (1.0, 1.0), background: Color::black() };

        encoder.begin_page(&page).unwrap();
        encoder.draw(&Draw::Move(0.5, 0.5)).unwrap();
        encoder.end_page().unwrap();

        let mut target  = RecordingEncoder::new();
        replay(source.events(), &mut target).unwrap();

        assert!(target.recording().events() == source.events());
        assert!(target.recording().flush_count() == 1);
    }
}
