//! PDF output for captured infographics.
//!
//! A capture is a single raster image; the PDF is one page of a fixed paper
//! size with the image scaled to fit and centred, without margins.

mod error;
mod page;
mod renderer;

pub use error::RenderError;
pub use page::PageSize;
pub use renderer::{ImagePdfRenderer, JPEG_QUALITY, image_to_pdf};
