// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel geometry — every layout measurement converted once at the target DPI.
// Nothing downstream of this module sees millimetres.

use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::error::{BadgeError, Result};
use crate::units::{mm_pair_to_px, mm_to_px};

/// Largest side, in pixels, of either the content or the bordered canvas.
/// 65 535 px is 5.5 m at 300 dpi; anything beyond that is a typo in the DPI
/// or a dimension, and would not fit in memory anyway.
pub const MAX_CANVAS_SIDE: u32 = 65_535;
/// All layout measurements in pixels, derived from a [`LayoutConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGeometry {
    pub dpi: f64,
    pub content_width: i64,
    pub content_height: i64,
    pub outer_margin: i64,

    pub lanyard_hole: bool,
    pub hole_diameter: i64,
    pub hole_offset: i64,

    pub logo_top: i64,
    pub logo_scale: f64,
    pub logo_max_height: i64,
    pub profile_height: i64,
    pub name_height: i64,
    pub gap: i64,

    pub row_height: i64,
    pub row_margin_x: i64,
    pub row_gap: i64,
    pub row_offset: i64,
    pub fallback_bottom_margin: i64,

    pub sponsor_row_heights: [i64; 3],
    pub sponsor_row_gap: i64,
    pub sponsor_side_margin: i64,
    pub sponsor_bottom_gap: i64,
    pub sponsor_inner_pad: i64,
    pub sponsor_cell_gap: i64,
    pub sponsor_corner_radius: i64,
    pub sponsor_blur_sigma: f32,
    pub sponsor_white_alpha: u8,
    pub sponsor_title_height: i64,
    pub sponsor_title_font: i64,
    pub sponsor_divider_inset: i64,
    pub sponsor_logo_offset: i64,

    pub crop_mark_length: i64,
    pub crop_mark_gap: i64,
    pub crop_mark_stroke: i64,
}

/// Horizontal placement of the three-column row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub width: i64,
    pub height: i64,
    /// Left edge of the left, centre and right columns.
    pub xs: [i64; 3],
}

impl PixelGeometry {
    /// Convert `config` at its DPI.
    ///
    /// Rejects geometries with an empty content canvas or empty three-column
    /// cells, since nothing sensible can be drawn into them.
    #[instrument(skip_all, fields(dpi = config.dpi))]
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        let dpi = config.dpi;
        let px = |mm: f64| mm_to_px(mm, dpi);
        let (content_width, content_height) =
            mm_pair_to_px((config.content_width_mm, config.content_height_mm), dpi);

        let geometry = Self {
            dpi,
            content_width,
            content_height,
            outer_margin: px(config.outer_margin_mm),
            lanyard_hole: config.lanyard_hole,
            hole_diameter: px(config.hole_diameter_mm),
            hole_offset: px(config.hole_offset_mm),
            logo_top: px(config.logo_top_margin_mm),
            logo_scale: config.logo_scale,
            logo_max_height: px(config.logo_max_height_mm),
            profile_height: px(config.profile_height_mm),
            name_height: px(config.name_block_height_mm),
            gap: px(config.gap_mm),
            row_height: px(config.three_col_row_height_mm),
            row_margin_x: px(config.three_col_horizontal_margin_mm),
            row_gap: px(config.three_col_gap_mm),
            row_offset: px(config.three_col_vertical_offset_mm),
            fallback_bottom_margin: px(config.fallback_bottom_margin_mm),
            sponsor_row_heights: config.sponsor_row_heights_mm.map(px),
            sponsor_row_gap: px(config.sponsor_row_gap_mm),
            sponsor_side_margin: px(config.sponsor_side_margin_mm),
            sponsor_bottom_gap: px(config.sponsor_bottom_gap_mm),
            sponsor_inner_pad: px(config.sponsor_inner_pad_mm),
            sponsor_cell_gap: px(config.sponsor_cell_gap_mm),
            sponsor_corner_radius: px(config.sponsor_corner_radius_mm),
            sponsor_blur_sigma: config.sponsor_blur_radius,
            sponsor_white_alpha: config.sponsor_white_alpha,
            sponsor_title_height: px(config.sponsor_title_height_mm),
            sponsor_title_font: px(config.sponsor_title_font_mm),
            sponsor_divider_inset: px(config.sponsor_divider_inset_mm),
            sponsor_logo_offset: px(config.sponsor_logo_offset_mm),
            crop_mark_length: px(config.crop_mark_length_mm),
            crop_mark_gap: px(config.crop_mark_gap_mm),
            crop_mark_stroke: i64::from(config.crop_mark_stroke_px),
        };

        if geometry.content_width < 1 || geometry.content_height < 1 {
            return Err(BadgeError::InvalidConfig(format!(
                "content canvas is empty at {dpi} dpi ({}x{} px)",
                geometry.content_width, geometry.content_height
            )));
        }
        let (final_width, final_height) = geometry.final_size();
        if final_width.max(final_height) > i64::from(MAX_CANVAS_SIDE) {
            return Err(BadgeError::InvalidConfig(format!(
                "canvas of {final_width}x{final_height} px at {dpi} dpi exceeds the \
                 {MAX_CANVAS_SIDE} px limit; check dpi and content size"
            )));
        }
        let columns = geometry.columns();
        if columns.width < 1 || columns.height < 1 {
            return Err(BadgeError::InvalidConfig(format!(
                "three-column cells are empty ({}x{} px); reduce margins or gaps",
                columns.width, columns.height
            )));
        }

        debug!(
            content_width = geometry.content_width,
            content_height = geometry.content_height,
            outer_margin = geometry.outer_margin,
            "Pixel geometry computed"
        );
        Ok(geometry)
    }

    /// Size of the bordered print canvas: content plus the outer margin on
    /// every side.
    pub fn final_size(&self) -> (i64, i64) {
        (
            self.content_width + 2 * self.outer_margin,
            self.content_height + 2 * self.outer_margin,
        )
    }

    /// Content canvas size as image dimensions.
    pub fn content_dimensions(&self) -> Result<(u32, u32)> {
        Ok((
            canvas_side("content width", self.content_width)?,
            canvas_side("content height", self.content_height)?,
        ))
    }

    /// Bordered canvas size as image dimensions.
    pub fn final_dimensions(&self) -> Result<(u32, u32)> {
        let (width, height) = self.final_size();
        Ok((
            canvas_side("final width", width)?,
            canvas_side("final height", height)?,
        ))
    }

    /// Three equal columns across the content width minus side margins,
    /// separated by two equal gaps.
    pub fn columns(&self) -> ColumnLayout {
        let inner = self.content_width - 2 * self.row_margin_x;
        let width = (inner - 2 * self.row_gap).div_euclid(3);
        let step = width + self.row_gap;
        ColumnLayout {
            width,
            height: self.row_height,
            xs: [
                self.row_margin_x,
                self.row_margin_x + step,
                self.row_margin_x + 2 * step,
            ],
        }
    }

    /// Lower boundary for the three-column row when no sponsor panel exists.
    pub fn fallback_bottom(&self) -> i64 {
        self.content_height - self.fallback_bottom_margin
    }
}

fn canvas_side(name: &str, px: i64) -> Result<u32> {
    u32::try_from(px)
        .ok()
        .filter(|side| (1..=MAX_CANVAS_SIDE).contains(side))
        .ok_or_else(|| {
            BadgeError::InvalidConfig(format!(
                "{name} of {px} px is outside 1..={MAX_CANVAS_SIDE}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSpec;
    use crate::units::Measurement;

    fn geometry(spec: LayoutSpec) -> PixelGeometry {
        let config = LayoutConfig::from_spec(&spec).expect("valid config");
        PixelGeometry::new(&config).expect("valid geometry")
    }

    #[test]
    fn default_badge_is_945_by_1417() {
        let g = geometry(LayoutSpec::default());
        assert_eq!((g.content_width, g.content_height), (945, 1417));
        assert_eq!(g.outer_margin, 71);
        assert_eq!(g.final_size(), (1087, 1559));
    }

    #[test]
    fn columns_split_inner_width_evenly() {
        let g = geometry(LayoutSpec::default());
        let cols = g.columns();
        // 945 - 2*94 = 757; (757 - 2*71) / 3 = 205
        assert_eq!(g.row_margin_x, 94);
        assert_eq!(g.row_gap, 71);
        assert_eq!(cols.width, 205);
        assert_eq!(cols.xs, [94, 94 + 276, 94 + 552]);
        assert_eq!(cols.height, 118);
    }

    #[test]
    fn fallback_bottom_is_page_relative() {
        let g = geometry(LayoutSpec::default());
        assert_eq!(g.fallback_bottom(), 1417 - 94);
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let spec = LayoutSpec {
            three_col_horizontal_margin_mm: Measurement::Number(40.0),
            ..LayoutSpec::default()
        };
        let config = LayoutConfig::from_spec(&spec).expect("valid config");
        assert!(matches!(
            PixelGeometry::new(&config),
            Err(BadgeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn absurd_dpi_is_rejected_instead_of_truncated() {
        let spec = LayoutSpec {
            dpi: Measurement::Number(1.37e9),
            ..LayoutSpec::default()
        };
        let config = LayoutConfig::from_spec(&spec).expect("dpi itself is positive");
        let err = PixelGeometry::new(&config).expect_err("canvas far beyond the cap");
        assert!(matches!(err, BadgeError::InvalidConfig(_)));
        assert!(err.to_string().contains("65535"), "{err}");
    }

    #[test]
    fn canvas_at_the_cap_is_accepted() {
        // 65535 px final side with a zero margin: 65535 / 300 * 25.4 mm.
        let side_mm = f64::from(MAX_CANVAS_SIDE) / 300.0 * 25.4;
        let spec = LayoutSpec {
            content_height_mm: Measurement::Number(side_mm),
            outer_margin_mm: Measurement::Number(0.0),
            ..LayoutSpec::default()
        };
        let g = geometry(spec);
        assert_eq!(g.content_height, i64::from(MAX_CANVAS_SIDE));
        assert_eq!(g.final_dimensions().expect("within cap").1, MAX_CANVAS_SIDE);
    }

    #[test]
    fn dimensions_convert_to_image_sizes() {
        let g = geometry(LayoutSpec::default());
        assert_eq!(g.content_dimensions().expect("fits"), (945, 1417));
        assert_eq!(g.final_dimensions().expect("fits"), (1087, 1559));
    }

    #[test]
    fn sponsor_rows_convert_per_tier() {
        let g = geometry(LayoutSpec::default());
        assert_eq!(g.sponsor_row_heights, [35, 59, 71]);
        assert_eq!(g.sponsor_title_height, 30);
    }
}
