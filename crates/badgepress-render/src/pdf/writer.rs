// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — wrap a finished badge raster in a single-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use badgepress_core::error::BadgeError;
use badgepress_core::units::MM_PER_INCH;
use image::RgbImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Embeds a raster in a PDF page whose physical size matches the raster at
/// the given DPI, so printing at 100% reproduces the trim size exactly.
pub struct PdfWriter {
    dpi: f64,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer for rasters rendered at `dpi`.
    pub fn new(dpi: f64) -> Self {
        Self { dpi, title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Physical page size for a raster of `width` x `height` pixels.
    pub fn page_dimensions(&self, width: u32, height: u32) -> (Mm, Mm) {
        let to_mm = |px: u32| (px as f64 / self.dpi * MM_PER_INCH) as f32;
        (Mm(to_mm(width)), Mm(to_mm(height)))
    }

    /// Create a single-page PDF holding `raster` at its native DPI.
    #[instrument(skip(self, raster), fields(width = raster.width(), height = raster.height()))]
    pub fn create_from_raster(&self, raster: &RgbImage) -> Result<Vec<u8>, BadgeError> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(BadgeError::PdfError("cannot embed an empty raster".into()));
        }
        let (page_w, page_h) = self.page_dimensions(raster.width(), raster.height());
        let title = self.title.as_deref().unwrap_or("Badgepress Credential");

        info!(dpi = self.dpi, title, "Creating badge PDF");

        let raw = RawImage {
            pixels: RawImageData::U8(raster.as_raw().clone()),
            width: raster.width() as usize,
            height: raster.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        // At the raster's DPI and unit scale the image covers the page exactly.
        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: None,
                scale_y: None,
                dpi: Some(self.dpi as f32),
                rotate: None,
            },
        }];

        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);
        debug!(page_w_mm = page_w.0, page_h_mm = page_h.0, "Raster placed on page");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }

    /// Create the PDF and write it directly to a file.
    pub fn write_raster_to_file(
        &self,
        raster: &RgbImage,
        path: impl AsRef<Path>,
    ) -> Result<(), BadgeError> {
        let bytes = self.create_from_raster(raster)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote badge PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn media_box(bytes: &[u8]) -> Vec<f32> {
        let doc = lopdf::Document::load_mem(bytes).expect("generated PDF parses");
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1, "badge PDF has exactly one page");
        let page_id = *pages.values().next().expect("one page");
        let page = doc
            .get_object(page_id)
            .and_then(|obj| obj.as_dict())
            .expect("page dictionary");
        // MediaBox may be inherited from the page tree node.
        let media = match page.get(b"MediaBox") {
            Ok(obj) => obj,
            Err(_) => {
                let parent_id = page
                    .get(b"Parent")
                    .and_then(|obj| obj.as_reference())
                    .expect("page parent");
                doc.get_object(parent_id)
                    .and_then(|obj| obj.as_dict())
                    .and_then(|dict| dict.get(b"MediaBox"))
                    .expect("inherited MediaBox")
            }
        };
        media
            .as_array()
            .expect("MediaBox array")
            .iter()
            .map(|v| v.as_float().expect("numeric MediaBox entry"))
            .collect()
    }

    #[test]
    fn page_size_follows_dpi() {
        let writer = PdfWriter::new(300.0);
        let (w, h) = writer.page_dimensions(300, 600);
        assert!((w.0 - 25.4).abs() < 1e-3);
        assert!((h.0 - 50.8).abs() < 1e-3);
    }

    #[test]
    fn single_page_with_matching_media_box() {
        let raster = RgbImage::from_pixel(300, 150, Rgb([255, 255, 255]));
        let bytes = PdfWriter::new(300.0)
            .create_from_raster(&raster)
            .expect("pdf created");
        assert!(bytes.starts_with(b"%PDF"));

        let mb = media_box(&bytes);
        // 1 inch x 0.5 inch = 72 x 36 pt
        assert!((mb[2] - mb[0] - 72.0).abs() < 0.5, "{mb:?}");
        assert!((mb[3] - mb[1] - 36.0).abs() < 0.5, "{mb:?}");
    }

    #[test]
    fn empty_raster_is_rejected() {
        let raster = RgbImage::new(0, 0);
        assert!(PdfWriter::new(300.0).create_from_raster(&raster).is_err());
    }
}
