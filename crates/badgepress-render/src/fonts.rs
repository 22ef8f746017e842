// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font loading with an ordered fallback chain per text slot.

use std::fmt;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use badgepress_core::error::{BadgeError, Result};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// File name of the primary badge typeface inside the fonts directory.
pub const PRIMARY_FONT: &str = "Bitcount-Regular.ttf";

const DEJAVU_DIR: &str = "/usr/share/fonts/truetype/dejavu";

/// Text roles on the badge, each with its own size and fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSlot {
    Profile,
    Name,
    Affiliation,
    SponsorTitle,
}

impl fmt::Display for FontSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Profile => "profile",
            Self::Name => "name",
            Self::Affiliation => "affiliation",
            Self::SponsorTitle => "sponsor title",
        };
        f.write_str(label)
    }
}

/// One `(path, size)` attempt in a fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub struct FontCandidate {
    pub path: PathBuf,
    /// Pixel height.
    pub size: f32,
}

impl FontCandidate {
    pub fn new(path: impl Into<PathBuf>, size: f32) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// A decoded font bound to a pixel size.
pub struct BadgeFont {
    font: FontVec,
    size: f32,
    source: PathBuf,
}

impl BadgeFont {
    /// Read and parse a TrueType/OpenType file.
    pub fn load(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let font = FontVec::try_from_vec(bytes).map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}: {err}", path.display()),
            )
        })?;
        Ok(Self {
            font,
            size,
            source: path.to_path_buf(),
        })
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }

    pub fn scale(&self) -> PxScale {
        PxScale::from(self.size)
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Ascent to descent at this size: the height of the line box that
    /// `draw_text_mut` lays glyphs into.
    pub fn line_height(&self) -> f32 {
        let scaled = self.font.as_scaled(self.scale());
        scaled.ascent() - scaled.descent()
    }

    /// File the font was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl fmt::Debug for BadgeFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadgeFont")
            .field("source", &self.source)
            .field("size", &self.size)
            .finish()
    }
}

/// Try `candidates` in order; the first that loads wins.
///
/// Each rejected candidate is logged. Running out of candidates is fatal for
/// the render, since the slot's text cannot be drawn.
#[instrument(skip(candidates), fields(%slot, count = candidates.len()))]
pub fn load_first(slot: FontSlot, candidates: &[FontCandidate]) -> Result<BadgeFont> {
    let mut tried = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match BadgeFont::load(&candidate.path, candidate.size) {
            Ok(font) => {
                debug!(path = %candidate.path.display(), size = candidate.size, "Font loaded");
                return Ok(font);
            }
            Err(err) => {
                warn!(path = %candidate.path.display(), error = %err, "Font candidate rejected");
                tried.push(candidate.path.display().to_string());
            }
        }
    }
    Err(BadgeError::FontUnavailable {
        slot: slot.to_string(),
        tried,
    })
}

/// Fallback chain for `slot`: the primary typeface in `fonts_dir`, then
/// Arial, then DejaVu Sans from the standard Linux location.
pub fn candidates(fonts_dir: &Path, slot: FontSlot, title_px: f32) -> Vec<FontCandidate> {
    let primary = fonts_dir.join(PRIMARY_FONT);
    let dejavu_bold = Path::new(DEJAVU_DIR).join("DejaVuSans-Bold.ttf");
    let dejavu = Path::new(DEJAVU_DIR).join("DejaVuSans.ttf");
    match slot {
        FontSlot::Profile => vec![
            FontCandidate::new(primary, 80.0),
            FontCandidate::new("arialbd.ttf", 80.0),
            FontCandidate::new(dejavu_bold, 80.0),
        ],
        FontSlot::Name => vec![
            FontCandidate::new(primary, 60.0),
            FontCandidate::new("arialbd.ttf", 60.0),
            FontCandidate::new(dejavu_bold, 60.0),
        ],
        FontSlot::Affiliation => vec![
            FontCandidate::new(primary, 40.0),
            FontCandidate::new("arial.ttf", 40.0),
            FontCandidate::new(dejavu, 40.0),
        ],
        FontSlot::SponsorTitle => vec![
            FontCandidate::new(primary, title_px),
            FontCandidate::new("arialbd.ttf", title_px),
            FontCandidate::new(dejavu_bold, title_px),
        ],
    }
}

/// The file and size that ended up serving a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontChoice {
    pub slot: FontSlot,
    pub path: PathBuf,
    pub size: f32,
}

/// The four fonts a badge needs.
#[derive(Debug)]
pub struct FontSet {
    pub profile: BadgeFont,
    pub name: BadgeFont,
    pub affiliation: BadgeFont,
    pub sponsor_title: BadgeFont,
}

impl FontSet {
    /// Load every slot from its fallback chain. `title_px` is the sponsor
    /// title size, which scales with the DPI unlike the fixed text sizes.
    #[instrument(skip_all, fields(fonts_dir = %fonts_dir.display(), title_px))]
    pub fn load(fonts_dir: &Path, title_px: f32) -> Result<Self> {
        let slot = |slot| load_first(slot, &candidates(fonts_dir, slot, title_px));
        Ok(Self {
            profile: slot(FontSlot::Profile)?,
            name: slot(FontSlot::Name)?,
            affiliation: slot(FontSlot::Affiliation)?,
            sponsor_title: slot(FontSlot::SponsorTitle)?,
        })
    }

    /// Which candidate won for each slot, in slot order.
    pub fn choices(&self) -> Vec<FontChoice> {
        [
            (FontSlot::Profile, &self.profile),
            (FontSlot::Name, &self.name),
            (FontSlot::Affiliation, &self.affiliation),
            (FontSlot::SponsorTitle, &self.sponsor_title),
        ]
        .into_iter()
        .map(|(slot, font)| FontChoice {
            slot,
            path: font.source().to_path_buf(),
            size: font.size(),
        })
        .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A TrueType font installed on the test machine, if any. Prints a skip
    /// notice naming the calling test when there is none.
    pub(crate) fn system_font() -> Option<PathBuf> {
        let found = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.is_file());
        if found.is_none() {
            let thread = std::thread::current();
            eprintln!(
                "skipping {}: no system TrueType font installed",
                thread.name().unwrap_or("test")
            );
        }
        found
    }

    #[test]
    fn chain_starts_with_primary_typeface() {
        let chain = candidates(Path::new("assets/fonts"), FontSlot::Name, 21.0);
        assert_eq!(chain[0].path, Path::new("assets/fonts").join(PRIMARY_FONT));
        assert_eq!(chain[0].size, 60.0);
        assert_eq!(chain[1].path, PathBuf::from("arialbd.ttf"));
    }

    #[test]
    fn title_chain_uses_requested_size() {
        let chain = candidates(Path::new("x"), FontSlot::SponsorTitle, 21.0);
        assert!(chain.iter().all(|c| c.size == 21.0));
    }

    #[test]
    fn exhausted_chain_reports_every_attempt() {
        let chain = vec![
            FontCandidate::new("/nonexistent/a.ttf", 10.0),
            FontCandidate::new("/nonexistent/b.ttf", 10.0),
        ];
        match load_first(FontSlot::Affiliation, &chain) {
            Err(BadgeError::FontUnavailable { slot, tried }) => {
                assert_eq!(slot, "affiliation");
                assert_eq!(tried.len(), 2);
            }
            other => panic!("expected FontUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn garbage_file_falls_through_to_next_candidate() {
        let Some(real) = system_font() else {
            return;
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let bogus = dir.path().join("bogus.ttf");
        std::fs::write(&bogus, b"not a font").expect("write bogus font");

        let chain = vec![FontCandidate::new(&bogus, 12.0), FontCandidate::new(&real, 14.0)];
        let font = load_first(FontSlot::Profile, &chain).expect("second candidate loads");
        assert_eq!(font.source(), real.as_path());
        assert_eq!(font.size(), 14.0);
    }

    #[test]
    fn choices_name_the_winning_file_per_slot() {
        let Some(real) = system_font() else {
            return;
        };
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::copy(&real, dir.path().join(PRIMARY_FONT)).expect("copy font");

        let set = FontSet::load(dir.path(), 21.0).expect("primary font loads");
        let choices = set.choices();
        assert_eq!(
            choices.iter().map(|c| c.slot).collect::<Vec<_>>(),
            [FontSlot::Profile, FontSlot::Name, FontSlot::Affiliation, FontSlot::SponsorTitle]
        );
        assert!(choices.iter().all(|c| c.path == dir.path().join(PRIMARY_FONT)));
        assert_eq!(
            choices.iter().map(|c| c.size).collect::<Vec<_>>(),
            [80.0, 60.0, 40.0, 21.0]
        );
    }

    #[test]
    fn line_height_matches_pixel_size() {
        let Some(real) = system_font() else {
            return;
        };
        let font = BadgeFont::load(&real, 60.0).expect("loads");
        // PxScale maps ascent - descent onto the requested pixel height.
        assert!((font.line_height() - 60.0).abs() < 1.0, "{}", font.line_height());
    }
}
