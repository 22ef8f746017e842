// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Header stage — top logo, lanyard hole, role band and name/affiliation band,
// stacked top-down. Produces the name band's bottom edge, the upper anchor
// for the three-column row.

use std::path::Path;

use badgepress_core::error::Result;
use badgepress_core::types::{BadgeRequest, Role, role_color};
use badgepress_core::PixelGeometry;
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument, warn};

use crate::draw::{self, TextAnchor};
use crate::fonts::FontSet;
use crate::image::ImageProcessor;

const NAME_BAND_FILL: Rgba<u8> = Rgba([255, 255, 255, 235]);
const ROLE_TEXT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const NAME_TEXT: Rgba<u8> = Rgba([0, 0, 0, 255]);
const AFFILIATION_TEXT: Rgba<u8> = Rgba([128, 128, 128, 255]);
const HOLE_STROKE: i64 = 3;

/// Fractional offsets of the name and affiliation baselines in the band.
const NAME_LINE: f64 = 0.32;
const AFFILIATION_LINE: f64 = 0.72;

/// Vertical extents of the stacked header blocks, in content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub logo_x: i64,
    pub logo_y: i64,
    pub logo_height: i64,
    pub profile_top: i64,
    pub profile_bottom: i64,
    pub name_top: i64,
    pub name_bottom: i64,
}

impl HeaderLayout {
    /// Stack the blocks below a logo of the given rendered size. Each block
    /// starts where the previous one ends; only the logo and role band are
    /// separated by the gap.
    pub fn compute(geometry: &PixelGeometry, logo_width: u32, logo_height: u32) -> Self {
        let logo_height = i64::from(logo_height);
        let logo_y = geometry.logo_top;
        let profile_top = logo_y + logo_height + geometry.gap;
        let profile_bottom = profile_top + geometry.profile_height;
        let name_top = profile_bottom;
        Self {
            logo_x: (geometry.content_width - i64::from(logo_width)).div_euclid(2),
            logo_y,
            logo_height,
            profile_top,
            profile_bottom,
            name_top,
            name_bottom: name_top + geometry.name_height,
        }
    }

    /// Y of the name line centre.
    pub fn name_line_y(&self) -> i64 {
        self.name_top + (self.band_height() as f64 * NAME_LINE) as i64
    }

    /// Y of the affiliation line centre.
    pub fn affiliation_line_y(&self) -> i64 {
        self.name_top + (self.band_height() as f64 * AFFILIATION_LINE) as i64
    }

    fn band_height(&self) -> i64 {
        self.name_bottom - self.name_top
    }
}

/// Box the top logo may occupy: the configured fraction of the content
/// width, and the configured maximum height.
pub fn logo_box(geometry: &PixelGeometry) -> (u32, u32) {
    let width = (geometry.content_width as f64 * geometry.logo_scale) as i64;
    (clamp_px(width), clamp_px(geometry.logo_max_height))
}

/// Load and fit the top logo. Oversized logos shrink into the box; smaller
/// ones are kept at native size.
#[instrument(skip(geometry), fields(path = %path.display()))]
pub fn load_top_logo(path: &Path, geometry: &PixelGeometry) -> Result<RgbaImage> {
    let (box_w, box_h) = logo_box(geometry);
    Ok(ImageProcessor::open(path)?.fit_within(box_w, box_h).into_rgba8())
}

/// Draw the header blocks in order: logo, lanyard hole, role band, name band.
///
/// Expects `canvas` to hold the background only. Leaves the header drawn and
/// returns its layout; `name_bottom` is the anchor the row stage needs.
#[instrument(skip_all, fields(role = %request.role))]
pub fn render_header(
    canvas: &mut RgbaImage,
    logo: &RgbaImage,
    request: &BadgeRequest,
    fonts: &FontSet,
    geometry: &PixelGeometry,
) -> HeaderLayout {
    let layout = HeaderLayout::compute(geometry, logo.width(), logo.height());
    draw::paste(canvas, logo, layout.logo_x, layout.logo_y);

    if geometry.lanyard_hole {
        draw_lanyard_hole(canvas, geometry);
    }

    if Role::from_label(&request.role).is_none() {
        warn!(role = %request.role, "Unknown role, using black band");
    }
    let [r, g, b] = role_color(&request.role);
    let width = geometry.content_width;
    draw::fill_rect(canvas, 0, layout.profile_top, width, layout.profile_bottom, Rgba([r, g, b, 255]));
    draw::draw_text(
        canvas,
        &fonts.profile,
        ROLE_TEXT,
        width / 2,
        (layout.profile_top + layout.profile_bottom).div_euclid(2),
        TextAnchor::Center,
        &request.role.to_uppercase(),
    );

    draw::fill_rect(canvas, 0, layout.name_top, width, layout.name_bottom, NAME_BAND_FILL);
    draw::draw_text(
        canvas,
        &fonts.name,
        NAME_TEXT,
        width / 2,
        layout.name_line_y(),
        TextAnchor::Center,
        &request.name,
    );
    draw::draw_text(
        canvas,
        &fonts.affiliation,
        AFFILIATION_TEXT,
        width / 2,
        layout.affiliation_line_y(),
        TextAnchor::Center,
        &request.affiliation,
    );

    debug!(name_bottom = layout.name_bottom, "Header drawn");
    layout
}

/// Outlined punch guide for the lanyard slot, with a centre cross.
pub fn draw_lanyard_hole(canvas: &mut RgbaImage, geometry: &PixelGeometry) {
    let black = Rgba([0, 0, 0, 255]);
    let cx = geometry.content_width / 2;
    let cy = geometry.hole_offset;
    let radius = geometry.hole_diameter / 2;
    draw::draw_ring(canvas, cx, cy, radius, HOLE_STROKE, black);
    draw::draw_cross(canvas, cx, cy, (radius / 2).max(6), black);
}

fn clamp_px(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}
