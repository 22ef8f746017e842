// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout stages, in the order the pipeline runs them. Each stage draws onto
// the content canvas and hands the next one the anchor it needs.

pub mod finish;
pub mod header;
pub mod row;
pub mod sponsors;

pub use finish::{TrimRect, crop_mark_segments, finalize};
pub use header::{HeaderLayout, load_top_logo, render_header};
pub use row::{CenterSource, LowerBoundary, RowContent, RowPlacement, render_row};
pub use sponsors::{PanelLayout, SlotOutcome, SlotReport, SponsorPanel, render_sponsors};
