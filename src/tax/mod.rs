//! Tax rate structures

pub mod gst;

pub use gst::*;
