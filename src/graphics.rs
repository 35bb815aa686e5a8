//! Colors, pixel surfaces and the software rasterizer behind every drawing
//! primitive.

mod color;
pub use color::*;

mod surface;
pub use surface::*;

pub mod raster;
