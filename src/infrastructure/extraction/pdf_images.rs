use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::Document;
use lopdf::xobject::PdfImage;

/// A raster image lifted out of a PDF page, ready to be written to disk.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page: u32,
    /// 1-based position within the page.
    pub index: usize,
    pub extension: &'static str,
    pub bytes: Vec<u8>,
}

/// Collects the embedded raster images of every page.
///
/// JPEG and JPEG 2000 streams are passed through untouched; 8-bit RGB and
/// grayscale sample data is re-encoded as PNG. Other encodings are skipped.
pub fn extract_page_images(path: &Path) -> Result<Vec<PageImage>, lopdf::Error> {
    let doc = Document::load(path)?;
    let mut images = Vec::new();

    for (page_number, page_id) in doc.get_pages() {
        let page_images = match doc.get_page_images(page_id) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "Could not list page images");
                continue;
            }
        };

        for (i, image) in page_images.iter().enumerate() {
            match encode(&doc, image) {
                Some((extension, bytes)) => images.push(PageImage {
                    page: page_number,
                    index: i + 1,
                    extension,
                    bytes,
                }),
                None => tracing::debug!(
                    page = page_number,
                    index = i + 1,
                    filters = ?image.filters,
                    color_space = ?image.color_space,
                    "Skipping image with unsupported encoding"
                ),
            }
        }
    }

    Ok(images)
}

fn encode(doc: &Document, image: &PdfImage<'_>) -> Option<(&'static str, Vec<u8>)> {
    let filters = image.filters.clone().unwrap_or_default();

    if filters.iter().any(|f| f == "DCTDecode") {
        return Some(("jpg", image.content.to_vec()));
    }
    if filters.iter().any(|f| f == "JPXDecode") {
        return Some(("jp2", image.content.to_vec()));
    }

    if image.bits_per_component != Some(8) {
        return None;
    }

    let samples = doc
        .get_object(image.id)
        .and_then(|obj| obj.as_stream())
        .ok()
        .and_then(|stream| {
            if filters.is_empty() {
                Some(stream.content.clone())
            } else {
                stream.decompressed_content().ok()
            }
        })?;

    let width = u32::try_from(image.width).ok()?;
    let height = u32::try_from(image.height).ok()?;

    let decoded = match image.color_space.as_deref() {
        Some("DeviceRGB") => RgbImage::from_raw(width, height, samples).map(DynamicImage::ImageRgb8),
        Some("DeviceGray") => {
            GrayImage::from_raw(width, height, samples).map(DynamicImage::ImageLuma8)
        }
        _ => None,
    }?;

    let mut png = Cursor::new(Vec::new());
    decoded.write_to(&mut png, ImageFormat::Png).ok()?;
    Some(("png", png.into_inner()))
}
