// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Finishing stage — places the content area on a white print canvas with an
// outer margin and draws crop marks around the trim edge.

use badgepress_core::PixelGeometry;
use badgepress_core::error::Result;
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use tracing::{debug, instrument};

use crate::draw;

const MARK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Trim rectangle `(x0, y0, x1, y1)` in final-canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl TrimRect {
    pub fn of(geometry: &PixelGeometry) -> Self {
        let o = geometry.outer_margin;
        Self {
            x0: o,
            y0: o,
            x1: o + geometry.content_width,
            y1: o + geometry.content_height,
        }
    }
}

/// A straight crop mark from `start` to `end`, either horizontal or vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSegment {
    pub start: (i64, i64),
    pub end: (i64, i64),
}

impl MarkSegment {
    fn horizontal(y: i64, x_from: i64, x_to: i64) -> Self {
        Self { start: (x_from, y), end: (x_to, y) }
    }

    fn vertical(x: i64, y_from: i64, y_to: i64) -> Self {
        Self { start: (x, y_from), end: (x, y_to) }
    }
}

/// Two marks per corner, each `length` px long, ending `gap` px short of
/// the trim edge and collinear with it.
pub fn crop_mark_segments(rect: &TrimRect, length: i64, gap: i64) -> [MarkSegment; 8] {
    let TrimRect { x0, y0, x1, y1 } = *rect;
    [
        // top-left
        MarkSegment::horizontal(y0, x0 - gap - length, x0 - gap),
        MarkSegment::vertical(x0, y0 - gap - length, y0 - gap),
        // top-right
        MarkSegment::horizontal(y0, x1 + gap, x1 + gap + length),
        MarkSegment::vertical(x1, y0 - gap - length, y0 - gap),
        // bottom-left
        MarkSegment::horizontal(y1, x0 - gap - length, x0 - gap),
        MarkSegment::vertical(x0, y1 + gap, y1 + gap + length),
        // bottom-right
        MarkSegment::horizontal(y1, x1 + gap, x1 + gap + length),
        MarkSegment::vertical(x1, y1 + gap, y1 + gap + length),
    ]
}

fn draw_segment(canvas: &mut RgbaImage, segment: &MarkSegment, stroke: i64) {
    let stroke = stroke.max(1);
    let lead = stroke / 2;
    let (sx, sy) = segment.start;
    let (ex, ey) = segment.end;
    if sy == ey {
        draw::fill_rect(canvas, sx.min(ex), sy - lead, sx.max(ex) + 1, sy - lead + stroke, MARK_COLOR);
    } else {
        draw::fill_rect(canvas, sx - lead, sy.min(ey), sx - lead + stroke, sy.max(ey) + 1, MARK_COLOR);
    }
}

/// Composite `content` onto a white canvas of the final size, draw the crop
/// marks and flatten to RGB.
#[instrument(skip_all, fields(content_w = content.width(), content_h = content.height()))]
pub fn finalize(content: &RgbaImage, geometry: &PixelGeometry) -> Result<RgbImage> {
    let (final_w, final_h) = geometry.final_dimensions()?;
    let mut canvas = RgbaImage::from_pixel(final_w, final_h, Rgba([255, 255, 255, 255]));
    draw::paste(&mut canvas, content, geometry.outer_margin, geometry.outer_margin);

    let rect = TrimRect::of(geometry);
    for segment in crop_mark_segments(&rect, geometry.crop_mark_length, geometry.crop_mark_gap) {
        draw_segment(&mut canvas, &segment, geometry.crop_mark_stroke);
    }
    debug!(final_w, final_h, "Canvas finalized");
    Ok(DynamicImage::ImageRgba8(canvas).into_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use badgepress_core::{LayoutConfig, LayoutSpec};
    use image::Rgb;

    fn geometry() -> PixelGeometry {
        let config = LayoutConfig::from_spec(&LayoutSpec::default()).expect("defaults");
        PixelGeometry::new(&config).expect("geometry")
    }

    /// True when neither end of `segment` lies strictly inside `rect`.
    fn outside(segment: &MarkSegment, rect: &TrimRect) -> bool {
        let inside = |(x, y): (i64, i64)| x > rect.x0 && x < rect.x1 && y > rect.y0 && y < rect.y1;
        !inside(segment.start) && !inside(segment.end)
    }

    #[test]
    fn final_canvas_adds_outer_margin_on_each_side() {
        let g = geometry();
        let content = RgbaImage::from_pixel(945, 1417, Rgba([20, 40, 60, 255]));
        let out = finalize(&content, &g).expect("finalizes");
        assert_eq!(out.dimensions(), (1087, 1559));
        assert_eq!(*out.get_pixel(71, 71), Rgb([20, 40, 60]));
        assert_eq!(*out.get_pixel(71 + 944, 71 + 1416), Rgb([20, 40, 60]));
        assert_eq!(*out.get_pixel(5, 5), Rgb([255, 255, 255]));
    }

    #[test]
    fn marks_stop_short_of_the_trim_edge() {
        let g = geometry();
        let rect = TrimRect::of(&g);
        let segments = crop_mark_segments(&rect, g.crop_mark_length, g.crop_mark_gap);
        assert_eq!(segments.len(), 8);
        for segment in &segments {
            assert!(outside(segment, &rect), "{segment:?}");
        }
        // top-left horizontal: 35 px long, 12 px gap
        assert_eq!(segments[0], MarkSegment { start: (71 - 12 - 35, 71), end: (71 - 12, 71) });
    }

    #[test]
    fn marks_are_drawn_in_the_margin() {
        let g = geometry();
        let content = RgbaImage::from_pixel(945, 1417, Rgba([255, 255, 255, 255]));
        let out = finalize(&content, &g).expect("finalizes");
        let black = Rgb([0, 0, 0]);
        // along the top edge's line, left of the corner
        assert_eq!(*out.get_pixel(40, 71), black);
        // above the top-right corner
        assert_eq!(*out.get_pixel(71 + 945, 40), black);
        // below the bottom-left corner
        assert_eq!(*out.get_pixel(71, 71 + 1417 + 30), black);
        // the gap itself stays white
        assert_eq!(*out.get_pixel(71 - 5, 71), Rgb([255, 255, 255]));
    }

    #[test]
    fn transparent_content_shows_white() {
        let g = geometry();
        let content = RgbaImage::new(945, 1417);
        let out = finalize(&content, &g).expect("finalizes");
        assert_eq!(*out.get_pixel(500, 700), Rgb([255, 255, 255]));
    }
}
