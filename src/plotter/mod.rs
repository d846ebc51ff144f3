mod lifecycle;
mod device;
mod diagnostics;
mod builder;
mod drawing;
mod attributes;
mod mapping;
mod markers;
mod labels;
mod scoped;

pub use self::lifecycle::*;
pub use self::builder::*;
pub use self::drawing::*;
pub use self::attributes::*;
pub use self::scoped::*;
