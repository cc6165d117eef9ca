// BIN Lookup - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod matcher;
pub mod record;
pub mod stats;
pub mod validation;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::LookupError;
pub use export::{results_to_csv, EXPORT_FILENAME};
pub use loader::{load_bins, parse_bins, DatasetSource};
pub use matcher::{find_many, find_one};
pub use record::{BinRecord, CSV_HEADER};
pub use stats::DatasetStats;
pub use validation::{parse_bin_list, Limits};

#[cfg(feature = "server")]
pub use api::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
