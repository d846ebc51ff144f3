mod style;
mod segment;
mod arc;
mod builder;
mod lowering;

pub use self::style::*;
pub use self::segment::*;
pub use self::arc::*;
pub use self::builder::*;
pub use self::lowering::*;
