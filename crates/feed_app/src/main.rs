mod cli;
mod favorites;
mod logging;
mod refresh;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use feed_engine::{FeedDriver, HistoryStore, Library, ReqwestFetcher, ScratchCache, WebCatalog};
use feed_logging::feed_info;

use crate::cli::Cli;
use crate::refresh::LoggingRefresh;
use crate::settings::{Settings, SETTINGS_FILENAME};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.level());

    // One request in flight at a time; a single-threaded runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| base_dir.join(SETTINGS_FILENAME));
    let mut settings = Settings::load(&settings_path)?;
    cli.apply_overrides(&mut settings);
    let paths = settings.resolve(&base_dir);

    let queue = favorites::load_or_create(&paths.favorites_file)
        .with_context(|| format!("failed to read favorites from {:?}", paths.favorites_file))?;

    let fetcher = ReqwestFetcher::new(settings.fetch_settings())?;
    let catalog = WebCatalog::new(fetcher, &settings.catalog_url)
        .with_context(|| format!("bad catalog url {:?}", settings.catalog_url))?;

    let mut driver = FeedDriver::new(
        Arc::new(catalog),
        HistoryStore::new(&paths.history_file),
        Library::new(&paths.library_dir),
        ScratchCache::new(&paths.scratch_dir),
        Box::new(LoggingRefresh::new(paths.library_dir.clone())),
    )
    .with_page_stride(settings.page_stride);

    let report = driver.run(queue).await;
    feed_info!(
        "Run complete: {} downloaded, {} skipped, {} mappers not found",
        report.downloaded(),
        report.skipped(),
        report.unresolved.len()
    );

    if !report.history_saved {
        bail!(
            "download history could not be written to {:?}",
            paths.history_file
        );
    }
    Ok(())
}
