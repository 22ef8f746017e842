// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing primitives over RGBA canvases: alpha paste, rectangles, blended
// lines, rounded masks, rings and anchored text. Coordinates are signed
// pixels; everything is clipped to the canvas.

use image::imageops;
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut,
    draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;

use crate::fonts::BadgeFont;

/// Reference point of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// `(x, y)` is the centre of the text box.
    Center,
    /// `(x, y)` is the top-left corner of the text box.
    TopLeft,
}

/// Alpha-composite `image` onto `canvas` with its top-left at `(x, y)`.
pub fn paste(canvas: &mut RgbaImage, image: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, image, x, y);
}

/// Set every pixel in `[x0, x1) x [y0, y1)` to `color` (no blending).
pub fn fill_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (w, h) = (x1 - x0, y1 - y0);
    if w <= 0 || h <= 0 {
        return;
    }
    let rect = Rect::at(x0 as i32, y0 as i32).of_size(w as u32, h as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

/// Blend a 1 px horizontal line from `x0` to `x1` inclusive.
pub fn blend_hline(canvas: &mut RgbaImage, x0: i64, x1: i64, y: i64, color: Rgba<u8>) {
    if y < 0 || y >= i64::from(canvas.height()) {
        return;
    }
    let start = x0.max(0);
    let end = x1.min(i64::from(canvas.width()) - 1);
    for x in start..=end {
        canvas.get_pixel_mut(x as u32, y as u32).blend(&color);
    }
}

/// Opaque rounded rectangle covering a `width` x `height` mask.
pub fn rounded_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }
    let r = radius.min(width / 2).min(height / 2);
    let on = Luma([255u8]);
    if r == 0 {
        mask.pixels_mut().for_each(|p| *p = on);
        return mask;
    }

    let (w, h, r) = (width as i32, height as i32, r as i32);
    if w - 2 * r > 0 {
        draw_filled_rect_mut(&mut mask, Rect::at(r, 0).of_size((w - 2 * r) as u32, h as u32), on);
    }
    if h - 2 * r > 0 {
        draw_filled_rect_mut(&mut mask, Rect::at(0, r).of_size(w as u32, (h - 2 * r) as u32), on);
    }
    for (cx, cy) in [(r, r), (w - 1 - r, r), (r, h - 1 - r), (w - 1 - r, h - 1 - r)] {
        draw_filled_circle_mut(&mut mask, (cx, cy), r, on);
    }
    mask
}

/// Multiply the alpha channel of `image` by `mask`. Both must share
/// dimensions; extra mask pixels are ignored.
pub fn apply_mask(image: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let m = mask.get_pixel_checked(x, y).map_or(0, |p| p.0[0]);
        pixel.0[3] = ((u16::from(pixel.0[3]) * u16::from(m)) / 255) as u8;
    }
}

/// Outlined circle with a stroke of `stroke` px, growing inward.
pub fn draw_ring(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: i64, stroke: i64, color: Rgba<u8>) {
    for inset in 0..stroke.max(1) {
        let r = radius - inset;
        if r <= 0 {
            break;
        }
        draw_hollow_circle_mut(canvas, (cx as i32, cy as i32), r as i32, color);
    }
}

/// 1 px plus-shaped marker centred on `(cx, cy)`.
pub fn draw_cross(canvas: &mut RgbaImage, cx: i64, cy: i64, half: i64, color: Rgba<u8>) {
    let (cx, cy, half) = (cx as f32, cy as f32, half as f32);
    draw_line_segment_mut(canvas, (cx - half, cy), (cx + half, cy), color);
    draw_line_segment_mut(canvas, (cx, cy - half), (cx, cy + half), color);
}

/// Draw `text` positioned by `anchor`.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &BadgeFont,
    color: Rgba<u8>,
    x: i64,
    y: i64,
    anchor: TextAnchor,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let (left, top) = match anchor {
        TextAnchor::TopLeft => (x, y),
        TextAnchor::Center => {
            // Glyphs hang from the ascent line, so centre the line box
            // (ascent to descent) rather than the inked height.
            let (w, _) = text_size(font.scale(), font.font(), text);
            let half_line = (font.line_height() / 2.0).round() as i64;
            (x - i64::from(w) / 2, y - half_line)
        }
    };
    draw_text_mut(canvas, color, left as i32, top as i32, font.scale(), font.font(), text);
}
