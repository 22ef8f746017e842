// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, fit into boxes, copy regions and blur. Operates on
// in-memory images using the `image` and `imageproc` crates.

use std::path::Path;

use badgepress_core::error::BadgeError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor`, so the
/// steps chain:
///
/// ```ignore
/// let logo = ImageProcessor::open("logo.png")?
///     .fit_within(490, 354)
///     .into_rgba8();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load and decode an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BadgeError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            BadgeError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an RGBA buffer.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
        }
    }

    /// Copy the `width` x `height` region at `(x, y)` out of `source`,
    /// clipped to its bounds. The source is left untouched.
    pub fn from_region(source: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> Self {
        let region = imageops::crop_imm(source, x, y, width, height).to_image();
        debug!(x, y, width = region.width(), height = region.height(), "Region copied");
        Self::from_rgba(region)
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return RGBA pixels.
    pub fn into_rgba8(self) -> RgbaImage {
        self.image.into_rgba8()
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Shrink the image to fit within `max_width` x `max_height`, preserving
    /// aspect ratio. Images already inside the box are returned untouched:
    /// this never upscales.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        let (w, h) = (self.image.width(), self.image.height());
        if w <= max_width && h <= max_height {
            debug!(w, h, "Image fits, left at native size");
            return self;
        }
        self.scale_to_box(max_width, max_height)
    }

    /// Scale the image by `min(box_w / w, box_h / h)` so it fits the box
    /// exactly along one axis, up or down. Each side is at least 1 px.
    pub fn fit_to_box(self, box_width: u32, box_height: u32) -> Self {
        self.scale_to_box(box_width, box_height)
    }

    fn scale_to_box(self, box_width: u32, box_height: u32) -> Self {
        let (w, h) = (self.image.width(), self.image.height());
        if w == 0 || h == 0 {
            return self;
        }
        let scale = (box_width as f64 / w as f64).min(box_height as f64 / h as f64);
        // Nudge before truncating so `box / w * w` lands on `box`, not one below.
        let new_w = ((w as f64 * scale + 1e-9) as u32).max(1);
        let new_h = ((h as f64 * scale + 1e-9) as u32).max(1);
        info!(from_w = w, from_h = h, new_w, new_h, "Resizing image");
        self.resize_exact(new_w, new_h)
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized = self.image.resize_exact(width, height, FilterType::Lanczos3);
        Self { image: resized }
    }

    /// Gaussian blur with standard deviation `sigma` (pixels). A sigma of
    /// zero leaves the image unchanged.
    #[instrument(skip(self), fields(sigma))]
    pub fn blur(self, sigma: f32) -> Self {
        if sigma <= 0.0 {
            return self;
        }
        let blurred = gaussian_blur_f32(&self.image.to_rgba8(), sigma);
        Self::from_rgba(blurred)
    }
}
