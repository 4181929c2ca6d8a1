pub mod draw;
pub mod raster;
pub mod surface;

pub use draw::{blob_outline, draw_drop, draw_frame, RenderStyle};
pub use raster::RasterSurface;
pub use surface::Surface;

#[cfg(test)]
mod tests;
