mod app;
mod cli;
mod config;
mod event;
mod logging;
mod terminal;
mod ui;

use app::{App, DirectoryAssets};
use clap::Parser;
use cli::CliArgs;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use config::{init_app_config, AppConfig};
use logging::{init_logging, LogTarget};
use neighborhood_map_core::map::MarkerLayer;
use neighborhood_map_core::sync::SyncOptions;
use neighborhood_map_core::{
    Catalog, CatalogError, CategoryFilter, Controller, ControllerOptions, ViewState,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Fall back to headless mode when stdout is not a terminal
    let headless = args.headless || args.json || !is_terminal();
    let log_target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone())
    };
    init_logging(&log_target, config.debug)?;
    tracing::debug!(?config, headless, "configuration loaded");

    let catalog = load_catalog(config.catalog_path.as_deref()).await?;
    let initial = initial_state(&config, &args)?;
    let controller = Controller::with_assets(
        catalog,
        MarkerLayer::default(),
        ControllerOptions {
            initial,
            search_debounce: config.search_debounce,
            sync: SyncOptions {
                hide_filtered_markers: config.hide_filtered_markers,
            },
        },
        Box::new(DirectoryAssets::new(&config.asset_dir)),
    );

    if headless {
        return event::run_headless(&controller, args.json);
    }

    let mut app = App::new(controller);
    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app);

    terminal::cleanup(true, true);

    result
}

async fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        tracing::info!("using built-in catalog");
        return Ok(Catalog::embedded()?);
    };

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let catalog = Catalog::from_json_str(&json)?;
    tracing::info!(path = %path.display(), locations = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn initial_state(config: &AppConfig, args: &CliArgs) -> Result<ViewState> {
    let mut state = ViewState::new();
    state.set_language(config.language());

    if let Some(name) = &args.category {
        let filter =
            CategoryFilter::parse(name).ok_or_else(|| eyre!("Unknown category `{name}`"))?;
        state.set_category_filter(filter);
    }
    if let Some(text) = &args.search {
        state.set_search_text(text.trim());
    }
    Ok(state)
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
