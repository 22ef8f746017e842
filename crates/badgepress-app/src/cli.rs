// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and their mapping onto render inputs.

use std::path::PathBuf;

use badgepress_core::error::Result;
use badgepress_core::types::{BadgeAssets, BadgeRequest, SponsorLogos};
use badgepress_core::{LayoutSpec, Measurement};
use clap::Parser;

/// Render a print-ready event badge to PNG and PDF.
#[derive(Parser, Debug)]
#[command(name = "badgepress")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Role label (Organizer, Speaker, Sponsor, Attendee). Other labels
    /// render with a black band.
    #[arg(short, long, required_unless_present = "print_default_config")]
    pub role: Option<String>,

    /// Attendee name
    #[arg(short, long, required_unless_present = "print_default_config")]
    pub name: Option<String>,

    /// Affiliation line under the name
    #[arg(short, long, default_value = "")]
    pub affiliation: String,

    /// QR payload. Without it the default QR image or the placeholder is used.
    #[arg(short, long)]
    pub qr: Option<String>,

    /// Background image, stretched to the content area
    #[arg(long, required_unless_present = "print_default_config")]
    pub background: Option<PathBuf>,

    /// Top logo
    #[arg(long, required_unless_present = "print_default_config")]
    pub logo: Option<PathBuf>,

    /// Directory holding the badge typeface
    #[arg(long, default_value = "fonts")]
    pub fonts_dir: PathBuf,

    /// Output path without extension; `.png` and `.pdf` are appended
    #[arg(short, long, default_value = "badge")]
    pub output: PathBuf,

    /// Layout JSON file. Missing keys keep their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the layout's resolution
    #[arg(long)]
    pub dpi: Option<f64>,

    /// Supporting-tier sponsor logo (repeatable)
    #[arg(long = "supporting")]
    pub supporting: Vec<PathBuf>,

    /// Silver-tier sponsor logo (repeatable)
    #[arg(long = "silver")]
    pub silver: Vec<PathBuf>,

    /// Gold-tier sponsor logo (repeatable)
    #[arg(long = "gold")]
    pub gold: Vec<PathBuf>,

    /// Logo for the left column of the row
    #[arg(long)]
    pub logo_left: Option<PathBuf>,

    /// Logo for the right column of the row
    #[arg(long)]
    pub logo_right: Option<PathBuf>,

    /// Centre-column image used when no QR payload is given
    #[arg(long)]
    pub qr_default: Option<PathBuf>,

    /// Print the layout report as JSON after rendering
    #[arg(long)]
    pub report: bool,

    /// Print the default layout as JSON and exit
    #[arg(long)]
    pub print_default_config: bool,

    /// Log level filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Layout from `--config` (or the defaults), with `--dpi` applied.
    pub fn layout(&self) -> Result<LayoutSpec> {
        let mut spec = match &self.config {
            Some(path) => LayoutSpec::load(path)?,
            None => LayoutSpec::default(),
        };
        if let Some(dpi) = self.dpi {
            spec.dpi = Measurement::Number(dpi);
        }
        Ok(spec)
    }

    pub fn request(&self) -> BadgeRequest {
        BadgeRequest::new(
            self.role.clone().unwrap_or_default(),
            self.name.clone().unwrap_or_default(),
            self.affiliation.clone(),
            self.qr.clone(),
        )
    }

    pub fn assets(&self) -> BadgeAssets {
        BadgeAssets {
            background: self.background.clone().unwrap_or_default(),
            logo: self.logo.clone().unwrap_or_default(),
            fonts_dir: self.fonts_dir.clone(),
            sponsors: SponsorLogos {
                supporting: self.supporting.clone(),
                silver: self.silver.clone(),
                gold: self.gold.clone(),
            },
            logo_left: self.logo_left.clone(),
            logo_right: self.logo_right.clone(),
            qr_default: self.qr_default.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "badgepress",
            "--role",
            "Speaker",
            "--name",
            "Ana Pérez",
            "--background",
            "bg.png",
            "--logo",
            "logo.png",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("arguments parse")
    }

    #[test]
    fn minimal_invocation_uses_defaults() {
        let args = parse(&[]);
        assert_eq!(args.output, PathBuf::from("badge"));
        assert_eq!(args.layout().expect("layout"), LayoutSpec::default());
        let request = args.request();
        assert_eq!(request.role, "Speaker");
        assert_eq!(request.payload(), None);
    }

    #[test]
    fn sponsor_flags_repeat_per_tier() {
        let args = parse(&["--gold", "a.png", "--gold", "b.png", "--silver", "c.png"]);
        let assets = args.assets();
        assert_eq!(assets.sponsors.gold.len(), 2);
        assert_eq!(assets.sponsors.silver, vec![PathBuf::from("c.png")]);
        assert!(assets.sponsors.supporting.is_empty());
    }

    #[test]
    fn dpi_flag_overrides_layout() {
        let args = parse(&["--dpi", "600"]);
        assert_eq!(args.layout().expect("layout").dpi, Measurement::Number(600.0));
    }

    #[test]
    fn required_inputs_are_enforced() {
        assert!(Args::try_parse_from(["badgepress", "--role", "Speaker"]).is_err());
    }

    #[test]
    fn default_config_needs_no_inputs() {
        let args = Args::try_parse_from(["badgepress", "--print-default-config"]).expect("parses");
        assert!(args.print_default_config);
    }
}
