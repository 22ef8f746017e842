// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Badgepress — print-ready badge renderer
//
// Entry point. Initialises logging, parses arguments and renders one badge.

mod cli;

use std::process::ExitCode;

use badgepress_core::error::Result;
use badgepress_core::human_errors::humanize_error;
use badgepress_core::LayoutSpec;
use badgepress_render::BadgeRenderer;
use clap::Parser;

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "badge generation failed");
            let human = humanize_error(&err);
            eprintln!("{}\n  {}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if args.print_default_config {
        println!("{}", serde_json::to_string_pretty(&LayoutSpec::default())?);
        return Ok(());
    }

    let renderer = BadgeRenderer::from_spec(&args.layout()?)?;
    tracing::info!(output = %args.output.display(), "Badgepress starting");

    let output = renderer.render_to_files(&args.request(), &args.assets(), &args.output)?;

    if args.report {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
    }
    println!(
        "Badge generated: {}.png / .pdf",
        args.output.display()
    );
    Ok(())
}
