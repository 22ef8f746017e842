// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Badgepress credential renderer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// RGB colour triple used for role bands.
pub type Rgb = [u8; 3];

/// Attendee roles with a dedicated band colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Organizer,
    Speaker,
    Sponsor,
    Attendee,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 4] = [Self::Organizer, Self::Speaker, Self::Sponsor, Self::Attendee];

    /// Exact label used on the badge and in requests.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Organizer => "Organizer",
            Self::Speaker => "Speaker",
            Self::Sponsor => "Sponsor",
            Self::Attendee => "Attendee",
        }
    }

    /// Look up a role by its exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }

    /// Band fill colour.
    pub fn color(&self) -> Rgb {
        match self {
            Self::Organizer => [255, 99, 71],
            Self::Speaker => [70, 130, 180],
            Self::Sponsor => [255, 165, 0],
            Self::Attendee => [34, 139, 34],
        }
    }
}

/// Band colour for an arbitrary role label. Unknown labels are black.
pub fn role_color(label: &str) -> Rgb {
    Role::from_label(label).map_or([0, 0, 0], |role| role.color())
}

/// Personal data printed on one badge.
///
/// The role is kept as the label the caller supplied so that labels outside
/// [`Role`] still render (in black) instead of failing the badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRequest {
    pub role: String,
    pub name: String,
    pub affiliation: String,
    /// QR payload. Empty or `None` falls back to the default image or the
    /// placeholder payload.
    #[serde(default)]
    pub qr_payload: Option<String>,
}

impl BadgeRequest {
    pub fn new(
        role: impl Into<String>,
        name: impl Into<String>,
        affiliation: impl Into<String>,
        qr_payload: Option<String>,
    ) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            affiliation: affiliation.into(),
            qr_payload,
        }
    }

    /// The QR payload, if one was given and is non-empty.
    pub fn payload(&self) -> Option<&str> {
        self.qr_payload.as_deref().filter(|p| !p.is_empty())
    }
}

/// Sponsorship categories, in the order they stack inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SponsorTier {
    Supporting,
    Silver,
    Gold,
}

impl SponsorTier {
    /// Fixed top-to-bottom order.
    pub const ORDER: [SponsorTier; 3] = [Self::Supporting, Self::Silver, Self::Gold];

    /// Title shown above the tier's logo row (rendered upper-case).
    pub fn title(&self) -> &'static str {
        match self {
            Self::Supporting => "Supporting Sponsor",
            Self::Silver => "Silver Sponsor",
            Self::Gold => "Golden Sponsor",
        }
    }

    /// Index into per-tier configuration arrays.
    pub fn index(&self) -> usize {
        match self {
            Self::Supporting => 0,
            Self::Silver => 1,
            Self::Gold => 2,
        }
    }
}

/// Logo paths per sponsor tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorLogos {
    #[serde(default)]
    pub supporting: Vec<PathBuf>,
    #[serde(default)]
    pub silver: Vec<PathBuf>,
    #[serde(default)]
    pub gold: Vec<PathBuf>,
}

impl SponsorLogos {
    pub fn for_tier(&self, tier: SponsorTier) -> &[PathBuf] {
        match tier {
            SponsorTier::Supporting => &self.supporting,
            SponsorTier::Silver => &self.silver,
            SponsorTier::Gold => &self.gold,
        }
    }

    /// Tiers with at least one logo, in [`SponsorTier::ORDER`].
    pub fn qualifying(&self) -> Vec<SponsorTier> {
        SponsorTier::ORDER
            .into_iter()
            .filter(|tier| !self.for_tier(*tier).is_empty())
            .collect()
    }
}

/// File inputs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeAssets {
    pub background: PathBuf,
    pub logo: PathBuf,
    /// Directory holding the primary badge typeface.
    pub fonts_dir: PathBuf,
    #[serde(default)]
    pub sponsors: SponsorLogos,
    #[serde(default)]
    pub logo_left: Option<PathBuf>,
    #[serde(default)]
    pub logo_right: Option<PathBuf>,
    /// Centre-column image used when the request carries no QR payload.
    #[serde(default)]
    pub qr_default: Option<PathBuf>,
}

impl BadgeAssets {
    pub fn new(
        background: impl Into<PathBuf>,
        logo: impl Into<PathBuf>,
        fonts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            background: background.into(),
            logo: logo.into(),
            fonts_dir: fonts_dir.into(),
            sponsors: SponsorLogos::default(),
            logo_left: None,
            logo_right: None,
            qr_default: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_lookup_is_exact() {
        assert_eq!(Role::from_label("Speaker"), Some(Role::Speaker));
        assert_eq!(Role::from_label("speaker"), None);
    }

    #[test]
    fn unknown_role_is_black() {
        assert_eq!(role_color("Volunteer"), [0, 0, 0]);
        assert_eq!(role_color("Organizer"), [255, 99, 71]);
    }

    #[test]
    fn empty_payload_counts_as_absent() {
        let req = BadgeRequest::new("Attendee", "Ada", "Lab", Some(String::new()));
        assert_eq!(req.payload(), None);
        let req = BadgeRequest::new("Attendee", "Ada", "Lab", Some("id:42".into()));
        assert_eq!(req.payload(), Some("id:42"));
    }

    #[test]
    fn qualifying_tiers_keep_fixed_order() {
        let logos = SponsorLogos {
            supporting: vec![],
            silver: vec!["s.png".into()],
            gold: vec!["g1.png".into(), "g2.png".into()],
        };
        assert_eq!(logos.qualifying(), vec![SponsorTier::Silver, SponsorTier::Gold]);
        assert!(SponsorLogos::default().qualifying().is_empty());
    }
}
