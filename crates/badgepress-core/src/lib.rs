// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Badgepress — Core types, layout configuration and unit conversion shared
// across all crates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod human_errors;
pub mod types;
pub mod units;

pub use config::{LayoutConfig, LayoutSpec};
pub use error::BadgeError;
pub use geometry::PixelGeometry;
pub use types::*;
pub use units::{Measurement, mm_pair_to_px, mm_to_px};
