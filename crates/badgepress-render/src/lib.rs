// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// badgepress-render — Layout and compositing for print-ready badges.
//
// Stacks the header blocks, frosts the sponsor panel, centres the
// three-column row between them, adds crop marks and writes PNG and PDF.

pub mod draw;
pub mod fonts;
pub mod image;
pub mod pdf;
pub mod pipeline;
pub mod qr;
pub mod stages;

// Re-export the primary types so callers can use `badgepress_render::BadgeRenderer` etc.
pub use fonts::{BadgeFont, FontSet};
pub use image::processor::ImageProcessor;
pub use pdf::writer::PdfWriter;
pub use pipeline::{BadgeOutput, BadgeRenderer, RenderReport, RenderedBadge};
pub use qr::generate_qr;
