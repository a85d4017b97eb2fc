//! Headless table renderer
//!
//! Renders configured tables to PNG without opening a window.
//!
//! Usage:
//!   cargo run --bin screenshot -- --config samples/tables.yaml --table Nations --out nations.png
//!   cargo run --bin screenshot -- --config samples/tables.yaml --table Nations --sort GDP --descending
//!   cargo run --bin screenshot -- --config samples/tables.yaml --all --out-dir screenshots

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use stat_tables::config::{AppConfig, TableConfig};
use stat_tables::deck::build_table;
use stat_tables::header::SortDirection;
use stat_tables::surface::Frame;
use stat_tables::text::{load_typesetter, Typesetter};

#[derive(Parser, Debug)]
#[command(name = "screenshot", about = "Render stat-tables tables to PNG")]
struct Args {
    /// Config file (default: ~/.config/stat-tables/tables.yaml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Render the table with this name (default: the first one)
    #[arg(long)]
    table: Option<String>,
    /// Render every table into --out-dir
    #[arg(long)]
    all: bool,
    /// Output PNG for a single table
    #[arg(long, default_value = "screenshot.png")]
    out: PathBuf,
    /// Output directory for --all
    #[arg(long, default_value = "screenshots")]
    out_dir: PathBuf,
    /// Sort by this field before rendering
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending (with --sort)
    #[arg(long)]
    descending: bool,
    /// Scroll down this many steps before rendering
    #[arg(long, default_value_t = 0)]
    scroll: u32,
    /// Override the fonts directory
    #[arg(long)]
    fonts: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };
    if let Some(fonts) = &args.fonts {
        config.fonts_dir = Some(fonts.clone());
    }
    if config.tables.is_empty() {
        bail!("no tables configured");
    }

    let fonts_dir = config.resolved_fonts_dir();
    let mut typesetter = load_typesetter(fonts_dir.as_deref(), config.default_font.as_deref());

    if args.all {
        for table_config in &config.tables {
            let path = args.out_dir.join(format!("{}.png", table_config.name));
            render_table(&config, table_config, &args, typesetter.as_mut(), &path)?;
        }
        return Ok(());
    }

    let table_config = match &args.table {
        Some(name) => config
            .tables
            .iter()
            .find(|t| &t.name == name)
            .with_context(|| format!("no table named {}", name))?,
        None => &config.tables[0],
    };
    render_table(&config, table_config, &args, typesetter.as_mut(), &args.out)
}

fn render_table(
    config: &AppConfig,
    table_config: &TableConfig,
    args: &Args,
    typesetter: &mut dyn Typesetter,
    out: &Path,
) -> Result<()> {
    let mut table = build_table(config, table_config, typesetter)?;

    if let Some(field) = &args.sort {
        let direction = if args.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        table
            .sort(field, direction)
            .with_context(|| format!("sorting {}", table_config.name))?;
    }
    for _ in 0..args.scroll {
        table.scroll(-1);
    }

    let (width, height) = (config.window.width, config.window.height);
    let mut buffer = vec![0u32; (width as usize) * (height as usize)];
    {
        let mut frame = Frame::new(&mut buffer, width as usize, height as usize);
        frame.clear(0xFFFFFFFF);
        table.draw(&mut frame);
    }

    save_png(&buffer, width, height, out)?;
    println!("{} -> {}", table_config.name, out.display());
    Ok(())
}

fn save_png(buffer: &[u32], width: u32, height: u32, path: &Path) -> Result<()> {
    // Convert ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    let img = image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(width, height, rgba)
        .context("failed to create image buffer")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("saving PNG to {}", path.display()))?;

    Ok(())
}
