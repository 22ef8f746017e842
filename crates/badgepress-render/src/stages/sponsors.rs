// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sponsor panel stage — a bottom-anchored, frosted, rounded panel holding one
// logo row per sponsor tier. The panel's height comes from its own content
// only; the row stage reads its top edge afterwards.

use std::path::PathBuf;

use badgepress_core::PixelGeometry;
use badgepress_core::types::{SponsorLogos, SponsorTier};
use image::imageops;
use image::{Rgba, RgbaImage};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::draw::{self, TextAnchor};
use crate::fonts::BadgeFont;
use crate::image::ImageProcessor;

const TITLE_COLOR: Rgba<u8> = Rgba([60, 60, 60, 255]);
const DIVIDER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 150]);

/// Vertical placement of one tier inside the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierRow {
    pub tier: SponsorTier,
    pub title_y: i64,
    pub divider_y: i64,
    pub logos_top: i64,
    pub row_height: i64,
}

/// Panel rectangle and tier rows, in content pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelLayout {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
    pub rows: Vec<TierRow>,
}

impl PanelLayout {
    /// Lay out the panel for the tiers that have logos.
    ///
    /// Returns `None` when no tier has a logo: the panel then does not exist
    /// and contributes no anchor.
    pub fn plan(logos: &SponsorLogos, geometry: &PixelGeometry) -> Option<Self> {
        let tiers = logos.qualifying();
        if tiers.is_empty() {
            return None;
        }

        let g = geometry;
        let row_height = |tier: SponsorTier| g.sponsor_row_heights[tier.index()];
        let gaps = g.sponsor_row_gap * (tiers.len() as i64 - 1);
        let inner: i64 = tiers
            .iter()
            .map(|tier| row_height(*tier) + g.sponsor_title_height)
            .sum::<i64>()
            + gaps;
        let height = inner + 2 * g.sponsor_inner_pad;

        let bottom = g.content_height - g.sponsor_bottom_gap;
        let top = bottom - height;

        let mut cursor = top + g.sponsor_inner_pad;
        let rows = tiers
            .into_iter()
            .map(|tier| {
                let title_y = cursor;
                let divider_y = title_y + g.sponsor_title_height - g.sponsor_divider_inset;
                let logos_top = divider_y + g.sponsor_logo_offset;
                cursor = logos_top + row_height(tier) + g.sponsor_row_gap;
                TierRow {
                    tier,
                    title_y,
                    divider_y,
                    logos_top,
                    row_height: row_height(tier),
                }
            })
            .collect();

        Some(Self {
            left: g.sponsor_side_margin,
            right: g.content_width - g.sponsor_side_margin,
            top,
            bottom,
            rows,
        })
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

/// Width of each of `count` equal columns across `inner_width`, separated by
/// `gap`.
pub fn column_width(inner_width: i64, count: usize, gap: i64) -> i64 {
    let n = count.max(1) as i64;
    (inner_width - (n - 1) * gap) / n
}

/// What happened to one sponsor logo slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotOutcome {
    Placed { x: i64, y: i64, width: u32, height: u32 },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotReport {
    pub tier: SponsorTier,
    pub path: PathBuf,
    pub outcome: SlotOutcome,
}

/// Result of the sponsor stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SponsorPanel {
    /// `None` when no tier qualified.
    pub layout: Option<PanelLayout>,
    pub slots: Vec<SlotReport>,
}

impl SponsorPanel {
    /// Top edge of the panel, if it exists.
    pub fn top(&self) -> Option<i64> {
        self.layout.as_ref().map(|panel| panel.top)
    }

    pub fn skipped(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.outcome, SlotOutcome::Skipped { .. }))
            .count()
    }
}

/// Replace the panel area with a blurred, white-washed copy of what is
/// currently under it, clipped to rounded corners.
///
/// Must run after everything that should show through the glass and before
/// anything that should sit on top of it.
#[instrument(skip_all, fields(top = panel.top, bottom = panel.bottom))]
pub fn frost_panel(canvas: &mut RgbaImage, panel: &PanelLayout, geometry: &PixelGeometry) {
    let x0 = panel.left.max(0);
    let y0 = panel.top.max(0);
    let x1 = panel.right.min(i64::from(canvas.width()));
    let y1 = panel.bottom.min(i64::from(canvas.height()));
    if x1 <= x0 || y1 <= y0 {
        warn!("Sponsor panel lies outside the canvas, not frosted");
        return;
    }
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);

    let mut frosted = ImageProcessor::from_region(canvas, x0 as u32, y0 as u32, w, h)
        .blur(geometry.sponsor_blur_sigma)
        .into_rgba8();
    let wash = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, geometry.sponsor_white_alpha]));
    imageops::overlay(&mut frosted, &wash, 0, 0);

    let full_mask = draw::rounded_mask(
        panel.width().max(0) as u32,
        panel.height().max(0) as u32,
        geometry.sponsor_corner_radius.max(0) as u32,
    );
    let mask = imageops::crop_imm(
        &full_mask,
        (x0 - panel.left) as u32,
        (y0 - panel.top) as u32,
        w,
        h,
    )
    .to_image();
    draw::apply_mask(&mut frosted, &mask);
    draw::paste(canvas, &frosted, x0, y0);
}

/// Draw the sponsor panel: frosted backdrop, then each tier's title, divider
/// and logo row.
///
/// A logo that cannot be loaded leaves its slot empty and is recorded as
/// skipped; it never aborts the tier or the panel.
#[instrument(skip_all)]
pub fn render_sponsors(
    canvas: &mut RgbaImage,
    logos: &SponsorLogos,
    title_font: &BadgeFont,
    geometry: &PixelGeometry,
) -> SponsorPanel {
    let Some(panel) = PanelLayout::plan(logos, geometry) else {
        info!("No sponsor logos, panel omitted");
        return SponsorPanel::default();
    };

    frost_panel(canvas, &panel, geometry);

    let inner_left = panel.left + geometry.sponsor_inner_pad;
    let inner_right = panel.right - geometry.sponsor_inner_pad;
    let mut slots = Vec::new();

    for row in &panel.rows {
        draw::draw_text(
            canvas,
            title_font,
            TITLE_COLOR,
            inner_left,
            row.title_y,
            TextAnchor::TopLeft,
            &row.tier.title().to_uppercase(),
        );
        draw::blend_hline(canvas, inner_left, inner_right, row.divider_y, DIVIDER_COLOR);

        let paths = logos.for_tier(row.tier);
        let col_w = column_width(inner_right - inner_left, paths.len(), geometry.sponsor_cell_gap);
        for (i, path) in paths.iter().enumerate() {
            let x = inner_left + i as i64 * (col_w + geometry.sponsor_cell_gap);
            let outcome = place_logo(canvas, path, x, row.logos_top, col_w, row.row_height);
            if let SlotOutcome::Skipped { reason } = &outcome {
                warn!(tier = ?row.tier, path = %path.display(), reason, "Sponsor logo skipped");
            }
            slots.push(SlotReport {
                tier: row.tier,
                path: path.clone(),
                outcome,
            });
        }
    }

    debug!(top = panel.top, height = panel.height(), slots = slots.len(), "Sponsor panel drawn");
    SponsorPanel {
        layout: Some(panel),
        slots,
    }
}

fn place_logo(
    canvas: &mut RgbaImage,
    path: &std::path::Path,
    x: i64,
    y: i64,
    col_w: i64,
    col_h: i64,
) -> SlotOutcome {
    if col_w < 1 || col_h < 1 {
        return SlotOutcome::Skipped {
            reason: format!("cell too small ({col_w}x{col_h} px)"),
        };
    }
    let logo = match ImageProcessor::open(path) {
        Ok(logo) => logo.fit_to_box(col_w as u32, col_h as u32).into_rgba8(),
        Err(err) => {
            return SlotOutcome::Skipped {
                reason: err.to_string(),
            };
        }
    };
    let px = x + (col_w - i64::from(logo.width())).div_euclid(2);
    let py = y + (col_h - i64::from(logo.height())).div_euclid(2);
    draw::paste(canvas, &logo, px, py);
    SlotOutcome::Placed {
        x: px,
        y: py,
        width: logo.width(),
        height: logo.height(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badgepress_core::{LayoutConfig, LayoutSpec};

    fn geometry() -> PixelGeometry {
        let config = LayoutConfig::from_spec(&LayoutSpec::default()).expect("defaults");
        PixelGeometry::new(&config).expect("geometry")
    }

    fn logos(supporting: usize, silver: usize, gold: usize) -> SponsorLogos {
        let paths = |n: usize, tag: &str| (0..n).map(|i| PathBuf::from(format!("{tag}{i}.png"))).collect();
        SponsorLogos {
            supporting: paths(supporting, "sup"),
            silver: paths(silver, "sil"),
            gold: paths(gold, "gold"),
        }
    }

    #[test]
    fn no_logos_means_no_panel() {
        assert_eq!(PanelLayout::plan(&logos(0, 0, 0), &geometry()), None);
    }

    #[test]
    fn height_is_sum_of_rows_titles_gaps_and_padding() {
        let g = geometry();
        let panel = PanelLayout::plan(&logos(1, 2, 3), &g).expect("panel");
        // rows 35+59+71, titles 3*30, gaps 2*35, padding 2*35
        assert_eq!(panel.height(), 165 + 90 + 70 + 70);

        let gold_only = PanelLayout::plan(&logos(0, 0, 1), &g).expect("panel");
        assert_eq!(gold_only.height(), 71 + 30 + 70);
    }

    #[test]
    fn height_depends_only_on_tier_membership() {
        let g = geometry();
        let few = PanelLayout::plan(&logos(1, 1, 0), &g).expect("panel");
        let many = PanelLayout::plan(&logos(5, 3, 0), &g).expect("panel");
        assert_eq!(few.height(), many.height());
        assert_eq!(few, many);
    }

    #[test]
    fn panel_is_bottom_anchored() {
        let g = geometry();
        let panel = PanelLayout::plan(&logos(2, 0, 1), &g).expect("panel");
        assert_eq!(panel.bottom, 1417 - 71);
        assert_eq!(panel.top, panel.bottom - panel.height());
        assert_eq!((panel.left, panel.right), (71, 945 - 71));
    }

    #[test]
    fn tiers_keep_fixed_order_and_advance_cursor() {
        let g = geometry();
        let panel = PanelLayout::plan(&logos(1, 0, 1), &g).expect("panel");
        let tiers: Vec<_> = panel.rows.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![SponsorTier::Supporting, SponsorTier::Gold]);

        let first = &panel.rows[0];
        assert_eq!(first.title_y, panel.top + g.sponsor_inner_pad);
        assert_eq!(first.divider_y, first.title_y + 30 - 6);
        assert_eq!(first.logos_top, first.divider_y + 9);
        assert_eq!(panel.rows[1].title_y, first.logos_top + first.row_height + g.sponsor_row_gap);
    }

    #[test]
    fn columns_divide_inner_width() {
        assert_eq!(column_width(733, 2, 71), 331);
        assert_eq!(column_width(733, 1, 71), 733);
    }

    #[test]
    fn frosting_washes_panel_and_keeps_corners() {
        let g = geometry();
        let panel = PanelLayout::plan(&logos(0, 0, 1), &g).expect("panel");
        let mut canvas = RgbaImage::from_pixel(945, 1417, Rgba([0, 0, 0, 255]));
        frost_panel(&mut canvas, &panel, &g);

        let cx = ((panel.left + panel.right) / 2) as u32;
        let cy = ((panel.top + panel.bottom) / 2) as u32;
        let centre = canvas.get_pixel(cx, cy).0[0];
        assert!((135..=145).contains(&centre), "centre = {centre}");

        assert_eq!(canvas.get_pixel(panel.left as u32, panel.top as u32).0[0], 0);
        assert_eq!(canvas.get_pixel(cx, (panel.top - 1) as u32).0[0], 0);
    }

    #[test]
    fn frosting_captures_current_canvas_state() {
        let g = geometry();
        let panel = PanelLayout::plan(&logos(0, 0, 1), &g).expect("panel");
        let mut canvas = RgbaImage::from_pixel(945, 1417, Rgba([0, 0, 0, 255]));
        // Paint the left half of the panel white before frosting.
        let mid = (panel.left + panel.right) / 2;
        draw::fill_rect(&mut canvas, 0, 0, mid, 1417, Rgba([255, 255, 255, 255]));
        frost_panel(&mut canvas, &panel, &g);

        let y = ((panel.top + panel.bottom) / 2) as u32;
        let left = canvas.get_pixel((panel.left + 40) as u32, y).0[0];
        let right = canvas.get_pixel((panel.right - 40) as u32, y).0[0];
        assert!(left > right, "left {left} should be lighter than right {right}");
    }

    #[test]
    fn unreadable_logo_is_skipped_siblings_placed() {
        let Some(font_path) = crate::fonts::tests::system_font() else {
            return;
        };
        let g = geometry();
        let font = BadgeFont::load(font_path, 21.0).expect("font");
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.png");
        RgbaImage::from_pixel(300, 100, Rgba([200, 0, 0, 255]))
            .save(&good)
            .expect("write logo");

        let sponsors = SponsorLogos {
            supporting: vec![],
            silver: vec![dir.path().join("missing.png"), good.clone()],
            gold: vec![],
        };
        let mut canvas = RgbaImage::from_pixel(945, 1417, Rgba([20, 40, 60, 255]));
        let result = render_sponsors(&mut canvas, &sponsors, &font, &g);

        assert!(result.layout.is_some());
        assert_eq!(result.slots.len(), 2);
        assert_eq!(result.skipped(), 1);
        assert!(matches!(result.slots[0].outcome, SlotOutcome::Skipped { .. }));
        match &result.slots[1].outcome {
            SlotOutcome::Placed { width, height, .. } => {
                // cell is 331 x 59: height-bound, 177 x 59
                assert_eq!(*height, 59);
                assert_eq!(*width, 177);
            }
            other => panic!("expected placement, got {other:?}"),
        }
    }

    #[test]
    fn empty_tiers_render_nothing() {
        let Some(font_path) = crate::fonts::tests::system_font() else {
            return;
        };
        let font = BadgeFont::load(font_path, 21.0).expect("font");
        let g = geometry();
        let mut canvas = RgbaImage::from_pixel(945, 1417, Rgba([20, 40, 60, 255]));
        let before = canvas.clone();
        let result = render_sponsors(&mut canvas, &SponsorLogos::default(), &font, &g);
        assert_eq!(result.top(), None);
        assert_eq!(canvas, before);
    }
}
