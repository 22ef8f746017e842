// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Badgepress.

use thiserror::Error;

/// Top-level error type for all Badgepress operations.
#[derive(Debug, Error)]
pub enum BadgeError {
    // -- Configuration errors --
    #[error("parameter '{name}' must be numeric (mm), got {value}")]
    InvalidMeasurement { name: String, value: String },

    #[error("parameter '{name}' must be a (width_mm, height_mm) pair: {detail}")]
    InvalidPair { name: String, detail: String },

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    // -- Rendering errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("no usable font for {slot} (tried: {})", tried.join(", "))]
    FontUnavailable { slot: String, tried: Vec<String> },

    #[error("QR encoding failed: {0}")]
    QrError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BadgeError>;
