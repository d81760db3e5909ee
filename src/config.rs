// ⚙️ Runtime settings from the command line
//
// There is no config file. Logging can additionally be tuned with RUST_LOG.

use clap::Parser;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom", version, about = "Interactive in-memory inventory tracker")]
pub struct Settings {
    /// Default log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Columns used by the grid view
    #[arg(long, default_value = "3")]
    pub grid_columns: NonZeroUsize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: "warn".to_string(),
            json_logs: false,
            grid_columns: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
