// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR payload -> square RGBA image of an exact pixel size.

use badgepress_core::error::{BadgeError, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use qrcode::QrCode;
use tracing::{debug, instrument};

/// Pixels per module before the final resample.
const MODULE_PX: u32 = 8;
/// Quiet-zone width in modules.
const BORDER_MODULES: u32 = 2;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Encode `payload` as a black-on-white QR code resampled to exactly
/// `size_px` x `size_px`.
#[instrument(skip(payload), fields(payload_len = payload.len(), size_px))]
pub fn generate_qr(payload: &str, size_px: u32) -> Result<RgbaImage> {
    if size_px == 0 {
        return Err(BadgeError::QrError("target size must be at least 1 px".into()));
    }
    let code = QrCode::new(payload.as_bytes()).map_err(|err| BadgeError::QrError(err.to_string()))?;
    let symbol = code
        .render::<Rgba<u8>>()
        .dark_color(DARK)
        .light_color(LIGHT)
        .quiet_zone(false)
        .module_dimensions(MODULE_PX, MODULE_PX)
        .build();

    // The renderer's own quiet zone is four modules; pad to two instead.
    let border = BORDER_MODULES * MODULE_PX;
    let side = symbol.width() + 2 * border;
    let mut raster = RgbaImage::from_pixel(side, side, LIGHT);
    imageops::overlay(&mut raster, &symbol, i64::from(border), i64::from(border));

    debug!(modules = code.width(), side, "QR rasterised");
    Ok(imageops::resize(&raster, size_px, size_px, FilterType::Lanczos3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_exactly_the_requested_square() {
        let img = generate_qr("https://example.com", 118).expect("encodes");
        assert_eq!(img.dimensions(), (118, 118));
    }

    #[test]
    fn corners_are_quiet_zone_white() {
        let img = generate_qr("badge:42", 200).expect("encodes");
        let corner = img.get_pixel(0, 0);
        assert!(corner.0[0] > 200, "{corner:?}");
    }

    #[test]
    fn contains_dark_modules() {
        let img = generate_qr("badge:42", 200).expect("encodes");
        assert!(img.pixels().any(|p| p.0[0] < 50));
    }

    #[test]
    fn quiet_zone_is_two_modules_wide() {
        // Version 1 (21 modules) plus 2 + 2 border modules: 25 modules over
        // 200 px, so the finder pattern starts 16 px in.
        let img = generate_qr("badge:42", 200).expect("encodes");
        let first_dark = (0..100).find(|&i| img.get_pixel(i, i).0[0] < 128);
        assert!(matches!(first_dark, Some(15..=17)), "{first_dark:?}");
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(generate_qr("x", 0).is_err());
    }

    #[test]
    fn oversized_payload_is_an_error() {
        let huge = "x".repeat(8000);
        assert!(matches!(generate_qr(&huge, 100), Err(BadgeError::QrError(_))));
    }
}
