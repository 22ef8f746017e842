// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Badge pipeline — runs the stages in their fixed order and writes the PNG
// and PDF outputs.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use badgepress_core::error::{BadgeError, Result};
use badgepress_core::types::{BadgeAssets, BadgeRequest};
use badgepress_core::{LayoutConfig, LayoutSpec, PixelGeometry};
use image::{ImageFormat, RgbImage};
use serde::Serialize;
use tracing::{info, instrument};

use crate::fonts::{FontChoice, FontSet};
use crate::image::ImageProcessor;
use crate::pdf::PdfWriter;
use crate::stages::{
    CenterSource, PanelLayout, RowContent, RowPlacement, SlotReport, finalize, load_top_logo,
    render_header, render_row, render_sponsors,
};

/// Anchors and decisions taken during one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    /// Font file and size each text slot was drawn with.
    pub fonts: Vec<FontChoice>,
    pub name_bottom: i64,
    /// `None` when no sponsor tier had logos.
    pub panel: Option<PanelLayout>,
    pub row: RowPlacement,
    pub center: CenterSource,
    pub slots: Vec<SlotReport>,
    pub final_width: u32,
    pub final_height: u32,
}

/// A finished badge raster and how it was laid out.
#[derive(Debug, Clone)]
pub struct RenderedBadge {
    pub image: RgbImage,
    pub report: RenderReport,
}

/// Files written by [`BadgeRenderer::render_to_files`].
#[derive(Debug, Clone, Serialize)]
pub struct BadgeOutput {
    pub png: PathBuf,
    pub pdf: PathBuf,
    pub report: RenderReport,
}

/// Renders badges for one validated layout.
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    geometry: PixelGeometry,
    placeholder: String,
}

impl BadgeRenderer {
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        Ok(Self {
            geometry: PixelGeometry::new(config)?,
            placeholder: config.qr_placeholder.clone(),
        })
    }

    /// Validate `spec` and build a renderer from it.
    pub fn from_spec(spec: &LayoutSpec) -> Result<Self> {
        Self::new(&LayoutConfig::from_spec(spec)?)
    }

    pub fn geometry(&self) -> &PixelGeometry {
        &self.geometry
    }

    /// Render one badge in memory.
    ///
    /// Stages run in a fixed order: background, header, sponsor panel,
    /// three-column row, finishing. The row is placed last because its
    /// vertical centre depends on both the header and the panel.
    #[instrument(skip_all, fields(name = %request.name, role = %request.role))]
    pub fn render(&self, request: &BadgeRequest, assets: &BadgeAssets) -> Result<RenderedBadge> {
        let g = &self.geometry;
        let (content_w, content_h) = g.content_dimensions()?;
        let mut canvas = ImageProcessor::open(&assets.background)?
            .resize_exact(content_w, content_h)
            .into_rgba8();

        let fonts = FontSet::load(&assets.fonts_dir, g.sponsor_title_font as f32)?;
        let logo = load_top_logo(&assets.logo, g)?;

        let header = render_header(&mut canvas, &logo, request, &fonts, g);
        let panel = render_sponsors(&mut canvas, &assets.sponsors, &fonts.sponsor_title, g);

        let placement = RowPlacement::compute(header.name_bottom, panel.top(), g);
        let center = CenterSource::choose(
            request.payload(),
            assets.qr_default.as_deref(),
            &self.placeholder,
        );
        render_row(
            &mut canvas,
            &placement,
            RowContent {
                left: assets.logo_left.as_deref(),
                center: &center,
                right: assets.logo_right.as_deref(),
            },
        )?;

        let image = finalize(&canvas, g)?;
        info!(
            width = image.width(),
            height = image.height(),
            skipped_sponsors = panel.skipped(),
            "Badge rendered"
        );

        let report = RenderReport {
            fonts: fonts.choices(),
            name_bottom: header.name_bottom,
            panel: panel.layout,
            row: placement,
            center,
            slots: panel.slots,
            final_width: image.width(),
            final_height: image.height(),
        };
        Ok(RenderedBadge { image, report })
    }

    /// Render and write `<output_base>.png` and `<output_base>.pdf`.
    ///
    /// Both files hold the same raster; the PDF page is sized so the raster
    /// prints at the configured DPI.
    #[instrument(skip(self, request, assets), fields(output = %output_base.display()))]
    pub fn render_to_files(
        &self,
        request: &BadgeRequest,
        assets: &BadgeAssets,
        output_base: &Path,
    ) -> Result<BadgeOutput> {
        let rendered = self.render(request, assets)?;

        let png = with_suffix(output_base, ".png");
        rendered
            .image
            .save_with_format(&png, ImageFormat::Png)
            .map_err(|err| {
                BadgeError::ImageError(format!("failed to write {}: {}", png.display(), err))
            })?;

        let pdf = with_suffix(output_base, ".pdf");
        let mut writer = PdfWriter::new(self.geometry.dpi);
        writer.set_title(format!("{} badge", request.name));
        writer.write_raster_to_file(&rendered.image, &pdf)?;

        info!(png = %png.display(), pdf = %pdf.display(), "Badge written");
        Ok(BadgeOutput {
            png,
            pdf,
            report: rendered.report,
        })
    }
}

/// Append `suffix` to the final path component without replacing an
/// existing extension (`out/ana.v2` becomes `out/ana.v2.png`).
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}
