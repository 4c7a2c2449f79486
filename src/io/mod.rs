//! Encodings of node trees.
//!
//! Each encoding sits behind its own cargo feature.

#[cfg(feature = "x3d-io")]
mod x3d;

#[cfg(feature = "x3d-io")]
pub use x3d::{to_x3d_document, to_x3d_xml, write_x3d_xml};
