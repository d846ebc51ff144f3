//!
//! The device-level drawing vocabulary produced by a plotter: fully resolved drawing operations,
//! 48-bit colours, affine transforms and the compact character encoding used by streamed metafiles
//!
#![warn(bare_trait_objects)]

#[macro_use]
extern crate serde_derive;

extern crate flo_curves as curves;

mod draw;
mod page;
mod color;
mod encoding;
mod decoding;
mod primitives;
mod transform2d;

pub use self::draw::*;
pub use self::page::*;
pub use self::color::*;
pub use self::encoding::*;
pub use self::decoding::*;
pub use self::primitives::*;
pub use self::transform2d::*;
