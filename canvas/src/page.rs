use super::draw::*;
use super::color::*;

///
/// Describes the device surface that a page is drawn on
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct PageDescription {
    /// The page number within the plotter's lifetime, starting at 1
    pub number: u32,

    /// The size of the device surface in device units
    pub size: (f64, f64),

    /// The colour of the background when the page is cleared
    pub background: Color
}

///
/// The events making up a plotter's output stream
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum MetafileEvent {
    /// A new page has started
    BeginPage(PageDescription),

    /// A drawing instruction on the current page
    Draw(Draw),

    /// The current frame is finished and the following instructions belong to a new image
    EndFrame,

    /// The current page is finished
    EndPage
}
