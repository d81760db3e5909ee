use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use tracing::info;

use stockroom::{logging, Catalog, Console, ItemFactory, Settings, VERSION};

fn main() -> Result<()> {
    let settings = Settings::parse();
    logging::init(&settings.log_level, settings.json_logs);
    info!(version = VERSION, grid_columns = settings.grid_columns.get(), "starting session");

    // One catalog and one id sequence per session; both are dropped on exit.
    let mut catalog = Catalog::new();
    let mut factory = ItemFactory::new();

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), settings.grid_columns);
    console
        .run(&mut catalog, &mut factory)
        .context("console session failed")?;

    info!(
        items = catalog.len(),
        constructed = factory.constructed(),
        "session ended"
    );
    Ok(())
}
