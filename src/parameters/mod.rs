mod value;
mod page_size;
mod registry;

pub use self::value::*;
pub use self::page_size::*;
pub use self::registry::*;
