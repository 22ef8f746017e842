// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Millimetre measurements and the mm -> px conversion boundary.

use serde::{Deserialize, Serialize};

use crate::error::{BadgeError, Result};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// A physical measurement as supplied by the user.
///
/// Accepts a JSON number, a numeric string (`"12.5"`), or a sequence of
/// measurements (used for width/height pairs). Nothing is interpreted until
/// [`Measurement::to_mm`] or [`Measurement::to_mm_pair`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    Number(f64),
    Text(String),
    Sequence(Vec<Measurement>),
}

impl Measurement {
    /// Coerce to a finite number of millimetres, naming `name` on failure.
    pub fn to_mm(&self, name: &str) -> Result<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid(name, self))?,
            Self::Sequence(_) => return Err(invalid(name, self)),
        };
        if !value.is_finite() {
            return Err(invalid(name, self));
        }
        Ok(value)
    }

    /// Coerce a two-element sequence to `(width_mm, height_mm)`.
    pub fn to_mm_pair(&self, name: &str) -> Result<(f64, f64)> {
        match self {
            Self::Sequence(items) if items.len() == 2 => {
                Ok((items[0].to_mm(name)?, items[1].to_mm(name)?))
            }
            Self::Sequence(items) => Err(BadgeError::InvalidPair {
                name: name.to_string(),
                detail: format!("expected 2 elements, got {}", items.len()),
            }),
            _ => Err(BadgeError::InvalidPair {
                name: name.to_string(),
                detail: format!("expected a sequence, got {}", self.describe()),
            }),
        }
    }

    /// Whether this measurement is a sequence rather than a scalar.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    fn describe(&self) -> String {
        match self {
            Self::Number(v) => format!("number -> {v}"),
            Self::Text(s) => format!("string -> {s:?}"),
            Self::Sequence(items) => format!("sequence of {}", items.len()),
        }
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn invalid(name: &str, value: &Measurement) -> BadgeError {
    BadgeError::InvalidMeasurement {
        name: name.to_string(),
        value: value.describe(),
    }
}

/// Convert millimetres to pixels at `dpi`, rounded to the nearest integer.
pub fn mm_to_px(mm: f64, dpi: f64) -> i64 {
    (mm / MM_PER_INCH * dpi).round() as i64
}

/// Convert a `(w, h)` pair element-wise.
pub fn mm_pair_to_px(mm: (f64, f64), dpi: f64) -> (i64, i64) {
    (mm_to_px(mm.0, dpi), mm_to_px(mm.1, dpi))
}
