// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Three-column row stage — left logo, QR (or its substitute), right logo,
// centred in the space left between the name band and the sponsor panel.

use std::path::{Path, PathBuf};

use badgepress_core::PixelGeometry;
use badgepress_core::error::Result;
use badgepress_core::geometry::ColumnLayout;
use image::RgbaImage;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::draw;
use crate::image::ImageProcessor;
use crate::qr::generate_qr;

/// The boundary below the row's free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "y", rename_all = "snake_case")]
pub enum LowerBoundary {
    /// Top edge of the sponsor panel.
    Panel(i64),
    /// Page-relative fallback used when there is no panel.
    Fallback(i64),
}

impl LowerBoundary {
    pub fn y(&self) -> i64 {
        match self {
            Self::Panel(y) | Self::Fallback(y) => *y,
        }
    }
}

/// Where the row lands for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowPlacement {
    /// Bottom of the name band.
    pub upper: i64,
    pub lower: LowerBoundary,
    pub available: i64,
    pub top: i64,
    #[serde(skip)]
    pub columns: ColumnLayout,
}

impl RowPlacement {
    /// Centre the row between `name_bottom` and the panel top (or the
    /// fallback boundary), then apply the configured offset.
    ///
    /// `top = upper + floor((available - row_height) / 2) + offset`. With no
    /// panel the available height is clamped to at least 1 px.
    pub fn compute(name_bottom: i64, panel_top: Option<i64>, geometry: &PixelGeometry) -> Self {
        let columns = geometry.columns();
        let (lower, available) = match panel_top {
            Some(top) => (LowerBoundary::Panel(top), top - name_bottom),
            None => {
                let fallback = geometry.fallback_bottom();
                (LowerBoundary::Fallback(fallback), (fallback - name_bottom).max(1))
            }
        };
        let top = name_bottom + (available - columns.height).div_euclid(2) + geometry.row_offset;
        Self {
            upper: name_bottom,
            lower,
            available,
            top,
            columns,
        }
    }
}

/// What filled the centre column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CenterSource {
    /// QR of the badge's own payload.
    Qr { payload: String },
    /// The configured default image.
    DefaultImage { path: PathBuf },
    /// QR of the placeholder payload.
    Placeholder { payload: String },
}

impl CenterSource {
    /// Payload first, then the default image, then the placeholder: the
    /// centre column is never empty.
    pub fn choose(payload: Option<&str>, default_image: Option<&Path>, placeholder: &str) -> Self {
        match (payload, default_image) {
            (Some(payload), _) => Self::Qr {
                payload: payload.to_string(),
            },
            (None, Some(path)) => Self::DefaultImage {
                path: path.to_path_buf(),
            },
            (None, None) => Self::Placeholder {
                payload: placeholder.to_string(),
            },
        }
    }

    fn image(&self, columns: &ColumnLayout) -> Result<RgbaImage> {
        match self {
            Self::Qr { payload } | Self::Placeholder { payload } => {
                let side = columns.width.min(columns.height).max(1) as u32;
                generate_qr(payload, side)
            }
            Self::DefaultImage { path } => fitted(path, columns),
        }
    }
}

/// Inputs for the three columns.
#[derive(Debug, Clone, Copy)]
pub struct RowContent<'a> {
    pub left: Option<&'a Path>,
    pub center: &'a CenterSource,
    pub right: Option<&'a Path>,
}

/// Draw the row at `placement`.
///
/// Expects the header and sponsor panel to be drawn already (the placement
/// was computed from them). Empty side columns stay untouched. Any image that
/// is named but cannot be loaded aborts the render.
#[instrument(skip_all, fields(top = placement.top))]
pub fn render_row(
    canvas: &mut RgbaImage,
    placement: &RowPlacement,
    content: RowContent<'_>,
) -> Result<()> {
    let columns = &placement.columns;
    let [left_x, center_x, right_x] = columns.xs;

    if let Some(path) = content.left {
        let img = fitted(path, columns)?;
        paste_centered(canvas, &img, left_x, placement.top, columns);
    }

    let center = content.center.image(columns)?;
    paste_centered(canvas, &center, center_x, placement.top, columns);
    info!(center = ?content.center, "Centre column filled");

    if let Some(path) = content.right {
        let img = fitted(path, columns)?;
        paste_centered(canvas, &img, right_x, placement.top, columns);
    }

    debug!(
        upper = placement.upper,
        lower = placement.lower.y(),
        available = placement.available,
        "Three-column row drawn"
    );
    Ok(())
}

/// Load `path` and shrink it into one column (never enlarged).
fn fitted(path: &Path, columns: &ColumnLayout) -> Result<RgbaImage> {
    Ok(ImageProcessor::open(path)?
        .fit_within(columns.width as u32, columns.height as u32)
        .into_rgba8())
}

fn paste_centered(canvas: &mut RgbaImage, img: &RgbaImage, col_x: i64, top: i64, columns: &ColumnLayout) {
    let x = col_x + (columns.width - i64::from(img.width())).div_euclid(2);
    let y = top + (columns.height - i64::from(img.height())).div_euclid(2);
    draw::paste(canvas, img, x, y);
}
