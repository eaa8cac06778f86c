//! Freehand drawing pad: a raster surface that survives resizes, strokes that land
//! under the cursor at any zoom, and a flattened PNG export.
//!
//! [`surface::SurfaceController`] is the entry point; [`app`] is the minifb host
//! the binary runs.

pub mod app;
pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod raster;
pub mod sizer;
pub mod stroke;
pub mod surface;
pub mod types;
pub mod viewport;

pub use error::Error;
pub use surface::SurfaceController;
