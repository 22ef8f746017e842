// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people preparing badges.
//
// Every technical error is mapped to a plain sentence with a concrete next
// step. Severity tells the caller whether editing input can fix it.

use crate::error::BadgeError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The layout configuration must be corrected.
    ConfigFix,
    /// A file is missing, unreadable or in the wrong format.
    MissingAsset,
    /// Something failed while producing output (disk, encoder).
    OutputFailure,
}

/// A human-readable error with plain message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `BadgeError` into a `HumanError`.
pub fn humanize_error(err: &BadgeError) -> HumanError {
    match err {
        BadgeError::InvalidMeasurement { name, value } => HumanError {
            message: format!("The setting '{name}' is not a number."),
            suggestion: format!("Use a plain number of millimetres for '{name}' (got {value})."),
            severity: Severity::ConfigFix,
        },

        BadgeError::InvalidPair { name, detail } => HumanError {
            message: format!("The setting '{name}' should be a width and a height."),
            suggestion: format!("Write it as [width_mm, height_mm]. ({detail})"),
            severity: Severity::ConfigFix,
        },

        BadgeError::InvalidConfig(detail) => HumanError {
            message: "The badge layout doesn't fit together.".into(),
            suggestion: format!("Adjust the layout settings: {detail}"),
            severity: Severity::ConfigFix,
        },

        BadgeError::ImageError(detail) => HumanError {
            message: "An image couldn't be read.".into(),
            suggestion: format!(
                "Check that the background, logo and QR image paths exist and are PNG or JPEG files. ({detail})"
            ),
            severity: Severity::MissingAsset,
        },

        BadgeError::FontUnavailable { slot, tried } => HumanError {
            message: format!("No font could be loaded for the {slot} text."),
            suggestion: format!(
                "Put Bitcount-Regular.ttf in the fonts directory or install Arial or DejaVu Sans. Tried: {}",
                tried.join(", ")
            ),
            severity: Severity::MissingAsset,
        },

        BadgeError::QrError(detail) => HumanError {
            message: "The QR code couldn't be generated.".into(),
            suggestion: format!("Shorten the QR payload and try again. ({detail})"),
            severity: Severity::ConfigFix,
        },

        BadgeError::PdfError(detail) => HumanError {
            message: "The PDF couldn't be written.".into(),
            suggestion: format!("The PNG may still be usable. ({detail})"),
            severity: Severity::OutputFailure,
        },

        BadgeError::Io(io_err) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: format!("Check the output folder exists and is writable. ({io_err})"),
            severity: Severity::OutputFailure,
        },

        BadgeError::Serialization(json_err) => HumanError {
            message: "The layout file isn't valid.".into(),
            suggestion: format!("Fix the JSON in the layout file. ({json_err})"),
            severity: Severity::ConfigFix,
        },
    }
}
