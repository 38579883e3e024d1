use crate::{PageSize, RenderError};
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::fs;
use std::path::Path;

/// JPEG quality used for the embedded image.
pub const JPEG_QUALITY: u8 = 65;

const IMAGE_NAME: &str = "Im1";

/// Converts raster captures into single-page PDFs.
#[derive(Debug, Clone, Copy)]
pub struct ImagePdfRenderer {
    pub page: PageSize,
    pub quality: u8,
}

impl Default for ImagePdfRenderer {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            quality: JPEG_QUALITY,
        }
    }
}

impl ImagePdfRenderer {
    pub fn new(page: PageSize) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn render(&self, image_bytes: &[u8]) -> Result<Vec<u8>, RenderError> {
        let decoded = image::load_from_memory(image_bytes)?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality).encode(
            rgb.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?;
        debug!("Encoded {}x{} capture as {} bytes of JPEG", width, height, jpeg.len());

        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        // DCT data is already compressed; the stream must be stored as is.
        let mut image_stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        );
        image_stream.allows_compression = false;
        let image_id = document.add_object(image_stream);

        let (x, y, draw_width, draw_height) = self.page.fit(width, height);
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        draw_width.into(),
                        0.into(),
                        0.into(),
                        draw_height.into(),
                        x.into(),
                        y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

        let resources_id = document.add_object(dictionary! {
            "XObject" => dictionary! { IMAGE_NAME => image_id },
        });
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page.width.into(), self.page.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        document.save_to(&mut out)?;
        Ok(out)
    }

    /// Reads an image file and writes the PDF, creating parent directories.
    pub fn render_file(&self, image_path: &Path, pdf_path: &Path) -> Result<(), RenderError> {
        let bytes = fs::read(image_path)?;
        let pdf = self.render(&bytes)?;
        if let Some(parent) = pdf_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(pdf_path, pdf)?;
        Ok(())
    }
}

/// One-shot conversion with the default quality.
pub fn image_to_pdf(image_bytes: &[u8], page: PageSize) -> Result<Vec<u8>, RenderError> {
    ImagePdfRenderer::new(page).render(image_bytes)
}
