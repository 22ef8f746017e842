// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout configuration: the raw user-facing form and its validated counterpart.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BadgeError, Result};
use crate::units::Measurement;

/// Raw layout settings, as read from a JSON file or built in code.
///
/// Every measurement is a [`Measurement`] so that values arriving as strings
/// are accepted when they parse and reported by name when they don't. Nothing
/// here is trusted until [`LayoutConfig::from_spec`] has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSpec {
    /// Output resolution in dots per inch.
    pub dpi: Measurement,
    /// Trim width. A `[width, height]` sequence sets both dimensions.
    pub content_width_mm: Measurement,
    pub content_height_mm: Measurement,
    /// White border around the trim box that hosts the crop marks.
    pub outer_margin_mm: Measurement,

    pub lanyard_hole: bool,
    pub hole_diameter_mm: Measurement,
    /// Distance from the top edge to the hole centre.
    pub hole_offset_mm: Measurement,

    pub logo_top_margin_mm: Measurement,
    /// Fraction of the content width available to the top logo.
    pub logo_scale: Measurement,
    pub logo_max_height_mm: Measurement,
    pub profile_height_mm: Measurement,
    pub name_block_height_mm: Measurement,
    /// Gap between the top logo and the role band.
    pub gap_mm: Measurement,

    pub three_col_row_height_mm: Measurement,
    pub three_col_horizontal_margin_mm: Measurement,
    pub three_col_gap_mm: Measurement,
    /// Positive moves the centred row down, negative moves it up.
    pub three_col_vertical_offset_mm: Measurement,
    /// Distance above the bottom edge used as the lower boundary for the
    /// three-column row when there is no sponsor panel.
    pub fallback_bottom_margin_mm: Measurement,

    /// Logo row heights for (Supporting, Silver, Gold).
    pub sponsor_row_heights_mm: Measurement,
    pub sponsor_row_gap_mm: Measurement,
    pub sponsor_side_margin_mm: Measurement,
    pub sponsor_bottom_gap_mm: Measurement,
    pub sponsor_inner_pad_mm: Measurement,
    pub sponsor_cell_gap_mm: Measurement,
    pub sponsor_corner_radius_mm: Measurement,
    /// Gaussian sigma in pixels for the frosted panel.
    pub sponsor_blur_radius: Measurement,
    /// Alpha (0-255) of the white wash over the blurred panel.
    pub sponsor_white_alpha: Measurement,
    pub sponsor_title_height_mm: Measurement,
    pub sponsor_title_font_mm: Measurement,
    pub sponsor_divider_inset_mm: Measurement,
    pub sponsor_logo_offset_mm: Measurement,

    pub crop_mark_length_mm: Measurement,
    pub crop_mark_gap_mm: Measurement,
    pub crop_mark_stroke_px: u32,

    /// Payload encoded when neither a QR payload nor a default image is given.
    pub qr_placeholder: String,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        let mm = Measurement::Number;
        Self {
            dpi: mm(300.0),
            content_width_mm: mm(80.0),
            content_height_mm: mm(120.0),
            outer_margin_mm: mm(6.0),
            lanyard_hole: true,
            hole_diameter_mm: mm(7.0),
            hole_offset_mm: mm(7.0),
            logo_top_margin_mm: mm(8.0),
            logo_scale: mm(0.52),
            logo_max_height_mm: mm(30.0),
            profile_height_mm: mm(6.0),
            name_block_height_mm: mm(16.0),
            gap_mm: mm(1.0),
            three_col_row_height_mm: mm(10.0),
            three_col_horizontal_margin_mm: mm(8.0),
            three_col_gap_mm: mm(6.0),
            three_col_vertical_offset_mm: mm(0.0),
            fallback_bottom_margin_mm: mm(8.0),
            sponsor_row_heights_mm: Measurement::Sequence(vec![mm(3.0), mm(5.0), mm(6.0)]),
            sponsor_row_gap_mm: mm(3.0),
            sponsor_side_margin_mm: mm(6.0),
            sponsor_bottom_gap_mm: mm(6.0),
            sponsor_inner_pad_mm: mm(3.0),
            sponsor_cell_gap_mm: mm(6.0),
            sponsor_corner_radius_mm: mm(4.0),
            sponsor_blur_radius: mm(10.0),
            sponsor_white_alpha: mm(140.0),
            sponsor_title_height_mm: mm(2.5),
            sponsor_title_font_mm: mm(1.8),
            sponsor_divider_inset_mm: mm(0.5),
            sponsor_logo_offset_mm: mm(0.8),
            crop_mark_length_mm: mm(3.0),
            crop_mark_gap_mm: mm(1.0),
            crop_mark_stroke_px: 2,
            qr_placeholder: "https://example.com".to_string(),
        }
    }
}

impl LayoutSpec {
    /// Read a layout from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let spec = serde_json::from_str(&text)?;
        debug!(path = %path.as_ref().display(), "Layout loaded");
        Ok(spec)
    }
}

/// Validated layout settings. All lengths are finite millimetres.
///
/// Field meanings match [`LayoutSpec`]; construction goes through
/// [`LayoutConfig::from_spec`], which is the only place coercion happens.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub dpi: f64,
    pub content_width_mm: f64,
    pub content_height_mm: f64,
    pub outer_margin_mm: f64,
    pub lanyard_hole: bool,
    pub hole_diameter_mm: f64,
    pub hole_offset_mm: f64,
    pub logo_top_margin_mm: f64,
    pub logo_scale: f64,
    pub logo_max_height_mm: f64,
    pub profile_height_mm: f64,
    pub name_block_height_mm: f64,
    pub gap_mm: f64,
    pub three_col_row_height_mm: f64,
    pub three_col_horizontal_margin_mm: f64,
    pub three_col_gap_mm: f64,
    pub three_col_vertical_offset_mm: f64,
    pub fallback_bottom_margin_mm: f64,
    pub sponsor_row_heights_mm: [f64; 3],
    pub sponsor_row_gap_mm: f64,
    pub sponsor_side_margin_mm: f64,
    pub sponsor_bottom_gap_mm: f64,
    pub sponsor_inner_pad_mm: f64,
    pub sponsor_cell_gap_mm: f64,
    pub sponsor_corner_radius_mm: f64,
    pub sponsor_blur_radius: f32,
    pub sponsor_white_alpha: u8,
    pub sponsor_title_height_mm: f64,
    pub sponsor_title_font_mm: f64,
    pub sponsor_divider_inset_mm: f64,
    pub sponsor_logo_offset_mm: f64,
    pub crop_mark_length_mm: f64,
    pub crop_mark_gap_mm: f64,
    pub crop_mark_stroke_px: u32,
    pub qr_placeholder: String,
}

impl LayoutConfig {
    /// Coerce and validate every field of `spec`.
    ///
    /// Fails on the first offending parameter; no partially validated value
    /// escapes.
    pub fn from_spec(spec: &LayoutSpec) -> Result<Self> {
        let (content_width_mm, content_height_mm) = if spec.content_width_mm.is_sequence() {
            spec.content_width_mm.to_mm_pair("content_width_mm")?
        } else {
            (
                spec.content_width_mm.to_mm("content_width_mm")?,
                spec.content_height_mm.to_mm("content_height_mm")?,
            )
        };

        let dpi = spec.dpi.to_mm("dpi")?;
        positive("dpi", dpi)?;
        positive("content_width_mm", content_width_mm)?;
        positive("content_height_mm", content_height_mm)?;

        let logo_scale = spec.logo_scale.to_mm("logo_scale")?;
        if !(logo_scale > 0.0 && logo_scale <= 1.0) {
            return Err(BadgeError::InvalidConfig(format!(
                "logo_scale must be within (0, 1], got {logo_scale}"
            )));
        }

        let white_alpha = spec.sponsor_white_alpha.to_mm("sponsor_white_alpha")?;
        if !(0.0..=255.0).contains(&white_alpha) {
            return Err(BadgeError::InvalidConfig(format!(
                "sponsor_white_alpha must be within 0..=255, got {white_alpha}"
            )));
        }

        let blur = length("sponsor_blur_radius", &spec.sponsor_blur_radius)?;

        let config = Self {
            dpi,
            content_width_mm,
            content_height_mm,
            outer_margin_mm: length("outer_margin_mm", &spec.outer_margin_mm)?,
            lanyard_hole: spec.lanyard_hole,
            hole_diameter_mm: length("hole_diameter_mm", &spec.hole_diameter_mm)?,
            hole_offset_mm: length("hole_offset_mm", &spec.hole_offset_mm)?,
            logo_top_margin_mm: length("logo_top_margin_mm", &spec.logo_top_margin_mm)?,
            logo_scale,
            logo_max_height_mm: length("logo_max_height_mm", &spec.logo_max_height_mm)?,
            profile_height_mm: length("profile_height_mm", &spec.profile_height_mm)?,
            name_block_height_mm: length("name_block_height_mm", &spec.name_block_height_mm)?,
            gap_mm: length("gap_mm", &spec.gap_mm)?,
            three_col_row_height_mm: length(
                "three_col_row_height_mm",
                &spec.three_col_row_height_mm,
            )?,
            three_col_horizontal_margin_mm: length(
                "three_col_horizontal_margin_mm",
                &spec.three_col_horizontal_margin_mm,
            )?,
            three_col_gap_mm: length("three_col_gap_mm", &spec.three_col_gap_mm)?,
            three_col_vertical_offset_mm: spec
                .three_col_vertical_offset_mm
                .to_mm("three_col_vertical_offset_mm")?,
            fallback_bottom_margin_mm: length(
                "fallback_bottom_margin_mm",
                &spec.fallback_bottom_margin_mm,
            )?,
            sponsor_row_heights_mm: row_heights(&spec.sponsor_row_heights_mm)?,
            sponsor_row_gap_mm: length("sponsor_row_gap_mm", &spec.sponsor_row_gap_mm)?,
            sponsor_side_margin_mm: length("sponsor_side_margin_mm", &spec.sponsor_side_margin_mm)?,
            sponsor_bottom_gap_mm: length("sponsor_bottom_gap_mm", &spec.sponsor_bottom_gap_mm)?,
            sponsor_inner_pad_mm: length("sponsor_inner_pad_mm", &spec.sponsor_inner_pad_mm)?,
            sponsor_cell_gap_mm: length("sponsor_cell_gap_mm", &spec.sponsor_cell_gap_mm)?,
            sponsor_corner_radius_mm: length(
                "sponsor_corner_radius_mm",
                &spec.sponsor_corner_radius_mm,
            )?,
            sponsor_blur_radius: blur as f32,
            sponsor_white_alpha: white_alpha.round() as u8,
            sponsor_title_height_mm: length(
                "sponsor_title_height_mm",
                &spec.sponsor_title_height_mm,
            )?,
            sponsor_title_font_mm: length("sponsor_title_font_mm", &spec.sponsor_title_font_mm)?,
            sponsor_divider_inset_mm: length(
                "sponsor_divider_inset_mm",
                &spec.sponsor_divider_inset_mm,
            )?,
            sponsor_logo_offset_mm: length("sponsor_logo_offset_mm", &spec.sponsor_logo_offset_mm)?,
            crop_mark_length_mm: length("crop_mark_length_mm", &spec.crop_mark_length_mm)?,
            crop_mark_gap_mm: length("crop_mark_gap_mm", &spec.crop_mark_gap_mm)?,
            crop_mark_stroke_px: spec.crop_mark_stroke_px,
            qr_placeholder: spec.qr_placeholder.clone(),
        };

        debug!(
            dpi = config.dpi,
            width_mm = config.content_width_mm,
            height_mm = config.content_height_mm,
            "Layout configuration validated"
        );
        Ok(config)
    }
}

/// A non-negative length.
fn length(name: &str, value: &Measurement) -> Result<f64> {
    let mm = value.to_mm(name)?;
    if mm < 0.0 {
        return Err(BadgeError::InvalidConfig(format!(
            "{name} must not be negative, got {mm}"
        )));
    }
    Ok(mm)
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(BadgeError::InvalidConfig(format!(
            "{name} must be greater than zero, got {value}"
        )));
    }
    Ok(())
}

fn row_heights(value: &Measurement) -> Result<[f64; 3]> {
    let name = "sponsor_row_heights_mm";
    match value {
        Measurement::Sequence(items) if items.len() == 3 => Ok([
            length(name, &items[0])?,
            length(name, &items[1])?,
            length(name, &items[2])?,
        ]),
        _ => Err(BadgeError::InvalidConfig(format!(
            "{name} must list three heights (Supporting, Silver, Gold)"
        ))),
    }
}
