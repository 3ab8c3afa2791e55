// src/main.rs

//! `mlbook-vis`: renders a built-in figure to a static SVG file.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use mlbook_vis::figures::{figure_by_name, FIGURE_NAMES};
use mlbook_vis::{Sketch, SvgOverlay, SvgSurface, ThemeId, ThemeState, VisConfig};

/// Render a textbook figure to SVG
#[derive(Parser, Debug, PartialEq)]
#[command(name = "mlbook-vis", version, about)]
struct CliArgs {
    /// Figure to render (see --list)
    #[arg(required_unless_present = "list")]
    figure: Option<String>,

    /// Theme to render in: light or dark
    #[arg(long, value_parser = ThemeId::from_str)]
    theme: Option<ThemeId>,

    /// Number of frames to advance before writing the last one
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    frames: u64,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (stdout when absent)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the available figures and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = CliArgs::parse();
    if args.list {
        for name in FIGURE_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }
    let figure_name = args.figure.context("No figure given; see --list")?;

    let config = VisConfig::load_or_default(args.config.as_deref())?;
    let theme_id = args.theme.unwrap_or_else(|| config.initial_theme());
    info!("Rendering '{}' in {} theme", figure_name, theme_id);

    let theme = ThemeState::new(theme_id);
    let figure = figure_by_name(&figure_name, theme, &config)?;
    let mut surface = SvgSurface::new(0.0, 0.0, config.svg.clone());
    let mut overlay = SvgOverlay::new(config.canvas_origin, config.svg.clone());
    let mut sketch = Sketch::new(figure);

    sketch
        .setup(&mut surface, &mut overlay)
        .with_context(|| format!("Failed to set up figure '{}'", figure_name))?;
    for _ in 0..args.frames {
        sketch
            .frame(&mut surface, &mut overlay)
            .with_context(|| format!("Failed to draw frame {}", sketch.frame_count()))?;
    }
    debug!(
        "Drew {} frames, {} elements",
        sketch.frame_count(),
        surface.element_count()
    );

    let document = surface.to_svg(Some(&overlay));
    match args.out {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => std::io::stdout()
            .write_all(document.as_bytes())
            .context("Failed to write SVG to stdout")?,
    }
    Ok(())
}
