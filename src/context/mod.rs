mod graphics_context;
mod context_stack;

pub use self::graphics_context::*;
pub use self::context_stack::*;
