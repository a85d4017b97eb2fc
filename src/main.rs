mod runtime;

use anyhow::{Context, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use stat_tables::cli::CliArgs;
use stat_tables::deck::TableDeck;
use stat_tables::text::load_typesetter;

use runtime::App;

fn main() -> Result<()> {
    stat_tables::tracing::init();

    let startup = CliArgs::parse()
        .into_config()
        .map_err(|e| anyhow::anyhow!(e))?;
    let config = startup.app_config().context("loading config")?;
    if let Some(log) = stat_tables::config_paths::log_file() {
        tracing::info!("Logging to {}", log.display());
    }

    let fonts_dir = config.resolved_fonts_dir();
    let mut typesetter = load_typesetter(fonts_dir.as_deref(), config.default_font.as_deref());
    let deck = TableDeck::from_config(&config, typesetter.as_mut())
        .context("no tables to show; pass data files or configure tables.yaml")?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config.window, deck);
    event_loop.run_app(&mut app)?;

    Ok(())
}
