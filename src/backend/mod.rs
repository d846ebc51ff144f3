mod plotter_type;
mod encoder;
mod recording;
mod stream_encoder;
mod output;
mod display;
mod shim;

pub use self::plotter_type::*;
pub use self::encoder::*;
pub use self::recording::*;
pub use self::stream_encoder::*;
pub use self::output::*;
pub use self::display::*;
pub use self::shim::*;
