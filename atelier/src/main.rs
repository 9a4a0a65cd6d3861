//! atelier - course chapter authoring tool
//!
//! A CLI for rendering, validating and publishing course documents
//! authored with the chapter/sub-chapter editor.

mod cli;

use anyhow::{Context, Result};
use atelier::client::BackendClient;
use atelier::course_config::CourseConfig;
use atelier::render::{self, RenderMode};
use atelier::store;
use clap::Parser;
use cli::{Cli, Commands, RenderModeArg};

/// Main entry point for the atelier CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            mode,
            asset_base,
            config,
            verbose,
        } => {
            init_logging(verbose);
            handle_render_command(input, output, mode, asset_base, config)?;
        }

        Commands::Validate { input, verbose } => {
            init_logging(verbose);
            handle_validate_command(input)?;
        }

        Commands::Push {
            input,
            config,
            verbose,
        } => {
            init_logging(verbose);
            handle_push_command(input, config)?;
        }
    }

    Ok(())
}

/// Initialize logging when verbose output is requested
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Handle the render command
fn handle_render_command(
    input: std::path::PathBuf,
    output: std::path::PathBuf,
    mode: RenderModeArg,
    asset_base: Option<String>,
    config_path: std::path::PathBuf,
) -> Result<()> {
    let course = store::load_course(&input)
        .with_context(|| format!("Failed to load course from {}", input.display()))?;

    // CLI flag wins; otherwise the config supplies the asset base
    let asset_base = match asset_base {
        Some(base) => base,
        None => {
            let config = CourseConfig::load(&config_path).with_context(|| {
                format!("Failed to load configuration from {}", config_path.display())
            })?;
            config.asset_base
        }
    };

    let mode = match mode {
        RenderModeArg::Reading => RenderMode::Reading,
        RenderModeArg::Preview => RenderMode::Preview,
    };

    println!("Rendering course...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    render::to_html(&course, &output, mode, &asset_base)
        .with_context(|| format!("Failed to export HTML to {}", output.display()))?;

    println!(
        "✓ Rendered {} chapters ({} sub-chapters, {} images)",
        course.chapters.len(),
        course.sub_chapter_count(),
        course.image_count()
    );
    println!("✓ Successfully wrote: {}", output.display());

    Ok(())
}

/// Handle the validate command
fn handle_validate_command(input: std::path::PathBuf) -> Result<()> {
    let course = store::load_course(&input)
        .with_context(|| format!("Failed to load course from {}", input.display()))?;

    println!("Validating image tokens...");
    let dangling = render::scan_dangling(&course);

    if dangling.is_empty() {
        println!("✓ No dangling image tokens found");
        return Ok(());
    }

    for d in &dangling {
        println!(
            "  chapter {}, sub-chapter {}: {} has no image at position {}",
            d.chapter, d.sub_chapter, d.token, d.token.image
        );
    }
    anyhow::bail!("{} dangling image token(s) found", dangling.len());
}

/// Handle the push command
fn handle_push_command(
    input: std::path::PathBuf,
    config_path: std::path::PathBuf,
) -> Result<()> {
    let course = store::load_course(&input)
        .with_context(|| format!("Failed to load course from {}", input.display()))?;

    let config = CourseConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    println!("Pushing course to {}...", config.backend_url);
    let client = BackendClient::new(config.backend_url.as_str());
    client
        .push_course(&course)
        .context("Failed to push course to the backend")?;

    println!("✓ Course document replaced server-side");
    Ok(())
}
