//!
//! # flo_plot
//!
//! A device-independent vector plotting engine. Programs draw through a single `Plotter` API
//! (paths, shapes, markers, text, attributes and coordinate transforms) and a backend chosen by
//! name turns the result into device instructions for a window, a bitmap, a page format, a pen
//! plotter, a terminal or a metafile.
//!
//! The device instructions themselves and their text encoding live in the `flo_plot_canvas`
//! crate, which is re-exported here.
//!

#![warn(bare_trait_objects)]

#[macro_use] extern crate serde_derive;
#[macro_use] extern crate log;
#[macro_use] extern crate lazy_static;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate flo_plot_canvas;

pub mod error;
pub mod fonts;
pub mod capability;
pub mod parameters;
pub mod context;
pub mod path;
pub mod backend;
pub mod plotter;

pub use self::error::*;
pub use self::fonts::*;
pub use self::capability::*;
pub use self::parameters::*;
pub use self::context::*;
pub use self::path::*;
pub use self::backend::*;
pub use self::plotter::*;

pub use flo_plot_canvas::*;
