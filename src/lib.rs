// Stockroom - Core Library
// In-memory inventory catalog, CSV export and the console driver built on it

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod item;
pub mod logging;

// Only compile the table browser when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, Statistics};
pub use config::Settings;
pub use console::Console;
pub use error::{InventoryError, Result};
pub use export::{read_csv, render_csv, write_csv, ExportRecord};
pub use item::{Item, ItemDetails, ItemFactory, ItemKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
